//! Linear-time modular decomposition via recursive factorizing permutations.
//!
//! The driver keeps a single compute forest. The outer loop walks the problem tree in DFS
//! order: an unvisited problem is split around its first vertex (the pivot) into neighbor,
//! pivot and non-neighbor subproblems; once all subproblems of a problem have returned, the
//! trailing non-pivot components are stripped off, the layers are flattened, and the
//! refinement, promotion and assembly stages shape the problem's own decomposition tree,
//! which is finally merged with the stripped components.

mod assembly;
mod node;
mod pivot;
mod promotion;
mod refinement;

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::NodeIdx;
use crate::forest::Forest;
use crate::graph::{DenseGraph, Graph};
use crate::md_tree::{MdNode, MdTree};
use self::node::ComputeNode;


/// Decomposes `g` with the linear-time solver.
pub(crate) fn decompose<TGraph : Graph>( g : &TGraph ) -> MdTree<TGraph::Vertex> {
	let ( dense, labels ) = DenseGraph::build( g );
	let ( forest, root, order ) = solve( &dense );
	MdTree::from_parts( forest, root, order, labels )
}


/// Runs the solver on a dense graph, returning the MD forest, its root, and the factorizing
/// permutation.
pub(crate) fn solve( graph : &DenseGraph ) -> ( Forest<MdNode>, NodeIdx, Vec<u32> ) {
	let n = graph.num_vertices();
	assert!( n > 0, "empty graph" );

	let mut forest : Forest<ComputeNode> = Forest::new();

	// the main problem, with vertex leaves attached in reverse order
	let main_prob = forest.create_node( ComputeNode::new_problem( false ) );
	let vertex_nodes : Vec<NodeIdx> =
		( 0..n ).map( |v| forest.create_node( ComputeNode::new_vertex( v as u32 ) ) ).collect();
	for v in ( 0..n ).rev() {
		forest.move_to( vertex_nodes[v], main_prob );
	}

	let comp_root = compute( graph, &mut forest, &vertex_nodes, main_prob );
	translate( &forest, comp_root )
}


/// The outer loop. Consumes the problem tree and returns the root of the finished compute
/// tree.
fn compute(
	graph : &DenseGraph,
	forest : &mut Forest<ComputeNode>,
	vertex_nodes : &[NodeIdx],
	main_prob : NodeIdx
) -> NodeIdx {
	let n = graph.num_vertices();
	let mut alpha : Vec<HashSet<u32>> = vec![HashSet::new(); n];
	let mut visited = vec![false; n];

	let mut current = Some( main_prob );
	let mut result = None;

	while let Some( cur ) = current {
		let fc = forest.first_child( cur ).expect( "problem without children" );
		forest.data_mut( cur ).set_active( true );

		if !forest.data( fc ).is_problem() {
			// the first child is a vertex: pivot here, or extend alpha in the base case
			let pivot = forest.data( fc ).vertex().expect( "leaf without vertex" );
			visited[pivot as usize] = true;

			if forest.has_only_one_child( cur ) {
				pivot::process_neighbors( graph, forest, vertex_nodes, &mut alpha, &visited, pivot, cur, None );
			}
			else {
				let pivoted = pivot::do_pivot( graph, forest, vertex_nodes, &mut alpha, &visited, cur, pivot );

				// dig into the first subproblem
				current = Some( forest.first_child( pivoted ).expect( "pivoted problem without subproblems" ) );
				continue;
			}
		}
		else {
			// all subproblems below have returned
			trace!( "resolving problem with pivot {:?}", forest.data( cur ).vertex() );
			let extra = remove_extra_components( forest, cur );

			remove_layers( forest, cur );
			complete_alpha_lists( forest, &mut alpha, cur );
			refinement::refine( forest, vertex_nodes, &alpha, cur );
			promotion::promote( forest, cur );
			assembly::assemble( forest, vertex_nodes, &alpha, cur );
			merge_components( forest, cur, extra );

			// clear scratch state and evict alpha entries local to this problem
			let fc = forest.first_child( cur ).expect( "resolved problem without a result" );
			for c in forest.dfs_reverse_preorder( fc ) {
				if forest.is_leaf( c ) {
					if let Some( v ) = forest.data( c ).vertex() {
						alpha[v as usize].clear();
					}
				}
				forest.data_mut( c ).clear();
			}
		}

		result = forest.first_child( cur );
		current = forest.right( cur ).or_else( || forest.parent( cur ) );

		debug_assert_eq!( forest.num_roots(), 1, "unclean forest" );
	}

	// detach the finished tree from the drained main problem
	let result = result.expect( "no result computed" );
	let result_parent = forest.parent( result ).expect( "result is not attached" );
	forest.detach( result );
	forest.remove( result_parent );
	result
}


/// Strips the trailing non-connected subproblem, if any, and returns its computed body. What
/// remains in it are exactly the components not containing the pivot.
fn remove_extra_components( forest : &mut Forest<ComputeNode>, prob : NodeIdx ) -> Option<NodeIdx> {
	let mut subprob = forest.first_child( prob );
	while let Some( sp ) = subprob {
		if !forest.data( sp ).is_connected() {
			break;
		}
		subprob = forest.right( sp );
	}

	subprob.map( |sp| {
		let ret = forest.first_child( sp ).expect( "unresolved extra-component subproblem" );
		forest.detach( ret );
		assert!( forest.is_leaf( sp ) );
		forest.remove( sp );
		ret
	} )
}


/// Replaces each child subproblem of `prob` by its children, in place.
fn remove_layers( forest : &mut Forest<ComputeNode>, prob : NodeIdx ) {
	for c in forest.children( prob ) {
		forest.replace_by_children( c );
		forest.remove( c );
	}
}


/// Makes the alpha lists of this subproblem symmetric.
fn complete_alpha_lists( forest : &Forest<ComputeNode>, alpha : &mut [HashSet<u32>], prob : NodeIdx ) {
	for v in forest.leaves( prob ) {
		let vtx = forest.data( v ).vertex().expect( "non-vertex leaf" );
		let entries : Vec<u32> = alpha[vtx as usize].iter().copied().collect();
		for a in entries {
			alpha[a as usize].insert( vtx );
		}
	}
}


/// Reattaches the stripped components below a PARALLEL root above the problem's result.
fn merge_components( forest : &mut Forest<ComputeNode>, prob : NodeIdx, new_components : Option<NodeIdx> ) {
	let extra = match new_components {
		Some( x ) => x,
		None => return
	};
	let fc = forest.first_child( prob ).expect( "problem without a result" );

	if forest.data( extra ).is_operation() && forest.data( extra ).op_type() == crate::Operation::Parallel {
		if forest.data( fc ).is_operation() && forest.data( fc ).op_type() == crate::Operation::Parallel {
			forest.add_children_from( fc, extra );
			forest.remove( extra );
		}
		else {
			forest.move_to( fc, extra );
			forest.move_to( extra, prob );
		}
	}
	else {
		let new_root = forest.create_node( ComputeNode::new_operation( crate::Operation::Parallel ) );
		forest.move_to( new_root, prob );
		forest.move_to( extra, new_root );
		forest.move_to( fc, new_root );
	}
}


/// Translates the finished compute tree into an MD-node forest, returning it with its root and
/// the factorizing permutation.
fn translate( forest : &Forest<ComputeNode>, comp_root : NodeIdx ) -> ( Forest<MdNode>, NodeIdx, Vec<u32> ) {
	let mut result : Forest<MdNode> = Forest::new();
	let mut mapping : HashMap<NodeIdx, NodeIdx> = HashMap::new();
	let mut order = vec![];

	for ( i, leaf ) in forest.leaves( comp_root ).into_iter().enumerate() {
		let v = forest.data( leaf ).vertex().expect( "non-vertex leaf" );
		order.push( v );
		let nd = result.create_node( MdNode::new_vertex( v, i, i + 1 ) );
		mapping.insert( leaf, nd );
	}

	// internal nodes from the bottom
	for comp_node in forest.bfs( comp_root ).into_iter().rev() {
		if forest.data( comp_node ).is_vertex() {
			continue;
		}
		assert!( forest.data( comp_node ).is_operation(), "problem node in a finished tree" );

		let children = forest.children( comp_node );
		let begin = children.iter().map( |c| result.data( mapping[c] ).vertices_begin ).min().unwrap();
		let end = children.iter().map( |c| result.data( mapping[c] ).vertices_end ).max().unwrap();
		let nd = result.create_node( MdNode::new_operation( forest.data( comp_node ).op_type(), begin, end ) );
		for c in children.into_iter().rev() {
			result.move_to( mapping[&c], nd );
		}
		mapping.insert( comp_node, nd );
	}

	( result, mapping[&comp_root], order )
}
