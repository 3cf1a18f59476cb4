//! Pivot stage: splits a problem around its chosen pivot vertex.
//!
//! Pivoting restructures the current problem into a replacement problem with up to three layers,
//! ordered left to right: the pivot's neighbors, the pivot itself, and the remaining
//! non-neighbors. Neighbors of the pivot living in other layers are either recorded as active
//! edges (if already visited) or pulled forward toward the pivot's layer.

use std::collections::HashSet;

use log::trace;

use crate::NodeIdx;
use crate::forest::Forest;
use crate::graph::DenseGraph;
use super::node::ComputeNode;


/// Processes the neighbors of a freshly visited pivot.
///
/// Visited neighbors record the pivot on their alpha list; unvisited neighbors still in
/// `current_prob` move into `nbr_prob`; all other neighbors are pulled toward their previous
/// layer.
pub(crate) fn process_neighbors(
	graph : &DenseGraph,
	forest : &mut Forest<ComputeNode>,
	vertex_nodes : &[NodeIdx],
	alpha : &mut [HashSet<u32>],
	visited : &[bool],
	pivot : u32,
	current_prob : NodeIdx,
	nbr_prob : Option<NodeIdx>
) {
	for &nbr in graph.neighbors( pivot ) {
		if visited[nbr as usize] {
			alpha[nbr as usize].insert( pivot );
		}
		else if forest.parent( vertex_nodes[nbr as usize] ) == Some( current_prob ) {
			let nbr_prob = nbr_prob.expect( "pivoting requires a neighbor subproblem" );
			forest.move_to( vertex_nodes[nbr as usize], nbr_prob );
		}
		else {
			pull_forward( forest, vertex_nodes, nbr );
		}
	}
}


/// Whether `node` is the layer holding its problem's pivot.
fn is_pivot_layer( forest : &Forest<ComputeNode>, node : NodeIdx ) -> bool {
	let ( p, fc ) = match ( forest.parent( node ), forest.first_child( node ) ) {
		( Some( p ), Some( fc ) ) => ( p, fc ),
		_ => return false
	};
	forest.data( p ).is_problem() && forest.data( p ).vertex() == forest.data( fc ).vertex()
}


/// Hoists `v` into the layer immediately left of its current layer, creating a new connected
/// layer if the previous one cannot absorb it. Removes the old layer if it runs empty.
fn pull_forward( forest : &mut Forest<ComputeNode>, vertex_nodes : &[NodeIdx], v : u32 ) {
	let current_layer = forest.parent( vertex_nodes[v as usize] ).expect( "vertex without a layer" );

	if forest.data( current_layer ).is_connected() {
		return;
	}
	debug_assert!( forest.data( current_layer ).is_problem(), "pull_forward: not a problem node" );

	let mut prev_layer = forest.left( current_layer ).expect( "pull_forward: no previous layer" );

	// form a new layer
	if forest.data( prev_layer ).is_active() || is_pivot_layer( forest, prev_layer ) {
		let new_layer = forest.create_node( ComputeNode::new_problem( true ) );
		forest.move_to_before( new_layer, current_layer );
		prev_layer = new_layer;
	}

	if forest.data( prev_layer ).is_connected() {
		forest.move_to( vertex_nodes[v as usize], prev_layer );
	}

	if forest.is_leaf( current_layer ) {
		// all leaves in this layer have been removed
		forest.remove( current_layer );
	}
}


/// Splits `prob` around `pivot`, returning the replacement problem whose ordered children are
/// the neighbor layer, the pivot layer, and what remains of `prob` (the non-neighbors).
///
/// Emptied by-products are removed; the non-neighbor layer keeps `connected = false` so that
/// the components not containing the pivot can later be stripped off.
pub(crate) fn do_pivot(
	graph : &DenseGraph,
	forest : &mut Forest<ComputeNode>,
	vertex_nodes : &[NodeIdx],
	alpha : &mut [HashSet<u32>],
	visited : &[bool],
	prob : NodeIdx,
	pivot : u32
) -> NodeIdx {
	trace!( "pivoting at {pivot}" );

	// duplicate the problem node
	let replacement = forest.create_node( forest.data( prob ).copied() );
	forest.swap( prob, replacement );
	forest.move_to( prob, replacement );
	forest.data_mut( replacement ).set_pivot( Some( pivot ) );

	// the old node becomes the non-neighbor subproblem
	let d = forest.data_mut( prob );
	d.set_active( false );
	d.set_connected( false );
	d.set_pivot( None );

	// subproblem for the pivot
	let pivot_prob = forest.create_node( ComputeNode::new_problem( true ) );
	forest.move_to( pivot_prob, replacement );
	forest.move_to( vertex_nodes[pivot as usize], pivot_prob );

	// subproblem for the neighbors of the pivot
	let nbr_prob = forest.create_node( ComputeNode::new_problem( true ) );
	forest.move_to( nbr_prob, replacement );
	process_neighbors( graph, forest, vertex_nodes, alpha, visited, pivot, prob, Some( nbr_prob ) );

	// clean up
	if forest.is_leaf( prob ) {
		forest.remove( prob );
	}
	if forest.is_leaf( nbr_prob ) {
		forest.remove( nbr_prob );
	}

	replacement
}
