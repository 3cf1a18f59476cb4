//! Refinement stage: splits the subproblem results along active edges.
//!
//! For every vertex `v` of the problem, the maximal subtrees whose leaves all lie in α(v) are
//! located, grouped per parent, and refined: degenerate parents are split in two, children of
//! root operators ascend beside their parent, and split marks are placed and propagated to
//! record in which direction the affected nodes must later be promoted.
//!
//! Split-child counters are maintained incrementally throughout; after this stage every
//! operation node's counter equals the number of its children marked in that direction.

use std::collections::HashSet;

use crate::{NodeIdx, Operation};
use crate::forest::Forest;
use super::node::{ComputeNode, SplitDirection};


/// Whether `node` is the root of one of the problem's trees, i.e., hangs directly below a
/// problem node (or is a forest root).
fn is_root_operator( forest : &Forest<ComputeNode>, node : NodeIdx ) -> bool {
	match forest.parent( node ) {
		Some( p ) => forest.data( p ).is_problem(),
		None => true
	}
}


/// Assigns component numbers below `prob`: children on the pivot's left split along SERIES
/// nodes, children on the right along PARALLEL nodes; everything else keeps one number per
/// subtree. A split node itself stays unnumbered.
fn number_by_comp( forest : &mut Forest<ComputeNode>, prob : NodeIdx ) {
	let pivot = forest.data( prob ).vertex();
	let mut comp = 0;
	let mut op = Operation::Series;

	for c in forest.children( prob ) {
		if forest.data( c ).vertex() == pivot {
			op = Operation::Parallel;
		}
		if forest.data( c ).is_operation() && forest.data( c ).op_type() == op {
			for sub in forest.children( c ) {
				for x in forest.dfs_preorder( sub ) {
					forest.data_mut( x ).comp_number = comp;
				}
				comp += 1;
			}
		}
		else {
			for x in forest.dfs_preorder( c ) {
				forest.data_mut( x ).comp_number = comp;
			}
			comp += 1;
		}
	}
}


/// Assigns each direct child of `prob` a distinct tree number, propagated to all descendants.
fn number_by_tree( forest : &mut Forest<ComputeNode>, prob : NodeIdx ) {
	let mut tn = 0;
	for c in forest.children( prob ) {
		for x in forest.dfs_preorder( c ) {
			forest.data_mut( x ).tree_number = tn;
		}
		tn += 1;
	}
}


/// Returns the maximal nodes whose entire leaf set lies within `leaves`.
///
/// Iterated charging: a parent all of whose children are fully charged becomes fully charged;
/// the maximal elements are the fully charged nodes without a fully charged parent. Mark
/// counters are cleared again before returning.
pub(crate) fn get_max_subtrees( forest : &mut Forest<ComputeNode>, leaves : &[NodeIdx] ) -> Vec<NodeIdx> {
	let mut fully_charged : Vec<NodeIdx> = leaves.to_vec();

	let mut idx = 0;
	while idx < fully_charged.len() {
		let x = fully_charged[idx];
		if let Some( p ) = forest.parent( x ) {
			forest.data_mut( p ).add_mark();
			if forest.data( p ).num_marks == forest.num_children( p ) {
				fully_charged.push( p );
			}
		}
		idx += 1;
	}

	let ret = fully_charged.iter().copied().filter( |x| {
		match forest.parent( *x ) {
			Some( p ) => forest.data( p ).num_marks < forest.num_children( p ),
			None => true
		}
	} ).collect();

	for &x in &fully_charged {
		forest.data_mut( x ).clear_marks();
		if let Some( p ) = forest.parent( x ) {
			forest.data_mut( p ).clear_marks();
		}
	}

	ret
}


/// Groups the given sibling sets: tree roots stay singleton; siblings sharing a parent become
/// that parent's first children and, if more than one, are wrapped under a fresh copy of the
/// parent. Returns each group with its new-prime flag (true iff a fresh group was cut out of a
/// PRIME parent).
pub(crate) fn group_sibling_nodes( forest : &mut Forest<ComputeNode>, nodes : &[NodeIdx] )
		-> Vec<(NodeIdx, bool)>
{
	let mut groups = vec![];
	let mut parents = vec![];

	for &node in nodes {
		if is_root_operator( forest, node ) {
			groups.push( ( node, false ) );
		}
		else {
			forest.make_first_child( node );
			let p = forest.parent( node ).unwrap();
			if forest.data( p ).num_marks == 0 {
				parents.push( p );
			}
			forest.data_mut( p ).add_mark();
		}
	}

	for p in parents {
		let num_marks = forest.data( p ).num_marks;
		forest.data_mut( p ).clear_marks();

		if num_marks == 1 {
			groups.push( ( forest.first_child( p ).unwrap(), false ) );
			continue;
		}

		let new_prime = forest.data( p ).op_type() == Operation::Prime;
		let grouped = forest.create_node( forest.data( p ).copied() );
		forest.move_to( grouped, p );
		for s in [SplitDirection::Left, SplitDirection::Right] {
			if forest.data( grouped ).is_split_marked( s ) {
				forest.data_mut( p ).increment_num_split_children( s );
			}
		}

		let marked : Vec<NodeIdx> = forest.children( p )[1..=num_marks].to_vec();
		for &c in marked.iter().rev() {
			forest.move_to( c, grouped );
			for s in [SplitDirection::Left, SplitDirection::Right] {
				if forest.data( c ).is_split_marked( s ) {
					forest.data_mut( p ).decrement_num_split_children( s );
					forest.data_mut( grouped ).increment_num_split_children( s );
				}
			}
		}

		groups.push( ( grouped, new_prime ) );
	}

	groups
}


/// Places `split` on `node`: records the mark (NONE becomes `split`, the opposite becomes
/// MIXED) and counts it on an operation parent. If requested and `node` is PRIME, unmarked
/// children are marked along.
fn add_split_mark( forest : &mut Forest<ComputeNode>, node : NodeIdx, split : SplitDirection, should_recurse : bool ) {
	if !forest.data( node ).is_split_marked( split ) {
		if let Some( p ) = forest.parent( node ) {
			if forest.data( p ).is_operation() {
				forest.data_mut( p ).increment_num_split_children( split );
			}
		}
		forest.data_mut( node ).set_split_mark( split );
	}

	if !should_recurse || forest.data( node ).op_type() != Operation::Prime || !forest.data( node ).is_operation() {
		return;
	}
	for c in forest.children( node ) {
		if !forest.data( c ).is_split_marked( split ) {
			forest.data_mut( c ).set_split_mark( split );
			forest.data_mut( node ).increment_num_split_children( split );
		}
	}
}


/// Marks every ancestor of `node` up to (excluding) the enclosing problem node.
fn mark_ancestors_by_split( forest : &mut Forest<ComputeNode>, node : NodeIdx, split : SplitDirection ) {
	let mut x = node;
	while let Some( p ) = forest.parent( x ) {
		if forest.data( p ).is_problem() {
			break;
		}
		add_split_mark( forest, p, split, true );
		x = p;
	}
}


/// Refines the tree at a single group node, restructuring around its parent and placing split
/// marks.
pub(crate) fn refine_one_node( forest : &mut Forest<ComputeNode>, node : NodeIdx, split : SplitDirection, new_prime : bool ) {
	if is_root_operator( forest, node ) {
		return;
	}
	let par = forest.parent( node ).unwrap();
	let mut new_sibling = None;

	if is_root_operator( forest, par ) {
		// node ascends beside its parent
		if split == SplitDirection::Left {
			forest.move_to_before( node, par );
		}
		else {
			forest.move_to_after( node, par );
		}
		for s in [SplitDirection::Left, SplitDirection::Right] {
			if forest.data( node ).is_split_marked( s ) {
				forest.data_mut( par ).decrement_num_split_children( s );
			}
		}
		new_sibling = Some( par );

		if forest.has_only_one_child( par ) {
			forest.replace_by_children( par );
			forest.remove( par );
			new_sibling = None;
		}
	}
	else if forest.data( par ).op_type() != Operation::Prime {
		// split a degenerate parent in two
		for s in [SplitDirection::Left, SplitDirection::Right] {
			if forest.data( node ).is_split_marked( s ) {
				forest.data_mut( par ).decrement_num_split_children( s );
			}
		}

		let replacement = forest.create_node( forest.data( par ).copied() );
		forest.swap( par, replacement );
		forest.move_to( node, replacement );
		forest.move_to( par, replacement );

		for s in [SplitDirection::Left, SplitDirection::Right] {
			if forest.data( node ).is_split_marked( s ) {
				forest.data_mut( replacement ).increment_num_split_children( s );
			}
			if forest.data( par ).is_split_marked( s ) {
				forest.data_mut( replacement ).increment_num_split_children( s );
			}
		}

		new_sibling = Some( par );
	}
	// PRIME parents keep their children in place

	add_split_mark( forest, node, split, new_prime );
	mark_ancestors_by_split( forest, node, split );
	if let Some( s ) = new_sibling {
		add_split_mark( forest, s, split, true );
	}
}


/// Refines with a single refiner vertex `v` against the given pivot.
fn refine_with(
	forest : &mut Forest<ComputeNode>,
	vertex_nodes : &[NodeIdx],
	alpha : &[HashSet<u32>],
	v : u32,
	pivot : u32
) {
	let leaves : Vec<NodeIdx> = alpha[v as usize].iter().map( |w| vertex_nodes[*w as usize] ).collect();
	let subtrees = get_max_subtrees( forest, &leaves );
	let groups = group_sibling_nodes( forest, &subtrees );

	let tn_refiner = forest.data( vertex_nodes[v as usize] ).tree_number;
	let tn_pivot = forest.data( vertex_nodes[pivot as usize] ).tree_number;

	for ( group, new_prime ) in groups {
		let tn_group = forest.data( group ).tree_number;
		let split = if tn_group < tn_pivot || tn_refiner < tn_group {
			SplitDirection::Left
		}
		else {
			SplitDirection::Right
		};
		refine_one_node( forest, group, split, new_prime );
	}
}


/// Runs the refinement stage on `prob`.
pub(crate) fn refine(
	forest : &mut Forest<ComputeNode>,
	vertex_nodes : &[NodeIdx],
	alpha : &[HashSet<u32>],
	prob : NodeIdx
) {
	number_by_comp( forest, prob );
	number_by_tree( forest, prob );

	let pivot = forest.data( prob ).vertex().expect( "refining an unpivoted problem" );
	for v in forest.leaves( prob ) {
		let vtx = forest.data( v ).vertex().expect( "non-vertex leaf" );
		refine_with( forest, vertex_nodes, alpha, vtx, pivot );
	}
}
