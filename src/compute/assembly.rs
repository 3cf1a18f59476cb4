//! Assembly stage: builds the decomposition tree of a resolved problem.
//!
//! The refined and promoted subtree roots, read left to right, form a factorizing permutation
//! around the pivot. Joins between parts are recovered from the alpha lists, mu values bound
//! how far every part "sees" across the pivot, and the delineation walks outward from the
//! pivot, emitting one module boundary per composition step. The final tree is a left-leaning
//! spine of operation nodes over those boundaries.

use std::collections::{HashSet, VecDeque};

use crate::{NodeIdx, Operation};
use crate::forest::Forest;
use super::node::ComputeNode;


/// `ret[i]` is true iff parts `i-1` and `i` (both left of the pivot) are fragments of the same
/// co-component.
fn determine_left_cocomp_fragments( forest : &Forest<ComputeNode>, ps : &[NodeIdx], pi : usize ) -> Vec<bool> {
	let mut ret = vec![false; ps.len()];
	for i in 1..pi {
		let a = forest.data( ps[i - 1] ).comp_number;
		let b = forest.data( ps[i] ).comp_number;
		ret[i] = a >= 0 && a == b;
	}
	ret
}

/// `ret[i]` is true iff parts `i` and `i+1` (both right of the pivot) are fragments of the same
/// component. The last index is never set.
fn determine_right_comp_fragments( forest : &Forest<ComputeNode>, ps : &[NodeIdx], pi : usize ) -> Vec<bool> {
	let mut ret = vec![false; ps.len()];
	for i in ( pi + 1 )..ps.len().saturating_sub( 1 ) {
		let a = forest.data( ps[i] ).comp_number;
		let b = forest.data( ps[i + 1] ).comp_number;
		ret[i] = a >= 0 && a == b;
	}
	ret
}

/// `ret[i]` is true iff some leaf of part `i` (right of the pivot) has an active edge into a
/// later layer.
fn determine_right_layer_neighbor(
	forest : &Forest<ComputeNode>,
	vertex_nodes : &[NodeIdx],
	alpha : &[HashSet<u32>],
	ps : &[NodeIdx],
	pi : usize
) -> Vec<bool> {
	let mut ret = vec![false; ps.len()];
	for i in ( pi + 1 )..ps.len() {
		let tn = forest.data( ps[i] ).tree_number;
		'part: for l in forest.leaves( ps[i] ) {
			let v = forest.data( l ).vertex().expect( "non-vertex leaf" );
			for &a in &alpha[v as usize] {
				if forest.data( vertex_nodes[a as usize] ).tree_number > tn {
					ret[i] = true;
					break 'part;
				}
			}
		}
	}
	ret
}


/// Recovers the factorizing-permutation joins: `i` and `j` are neighbors iff every vertex of
/// part `i` is adjacent to every vertex of part `j`. Leaves are renumbered with their part
/// index as a side effect.
pub(crate) fn compute_fact_perm_edges(
	forest : &mut Forest<ComputeNode>,
	vertex_nodes : &[NodeIdx],
	alpha : &[HashSet<u32>],
	ps : &[NodeIdx]
) -> Vec<Vec<usize>> {
	let k = ps.len();
	let mut sizes = vec![0usize; k];

	for ( i, &p ) in ps.iter().enumerate() {
		let ls = forest.leaves( p );
		sizes[i] = ls.len();
		for l in ls {
			forest.data_mut( l ).comp_number = i as i32;
		}
	}

	let mut neighbors : Vec<Vec<usize>> = vec![vec![]; k];
	let mut marks = vec![0usize; k];
	for ( i, &p ) in ps.iter().enumerate() {
		let mut touched = vec![];
		for l in forest.leaves( p ) {
			let v = forest.data( l ).vertex().expect( "non-vertex leaf" );
			for &a in &alpha[v as usize] {
				let j = forest.data( vertex_nodes[a as usize] ).comp_number;
				debug_assert!( j >= 0, "active edge out of the current problem" );
				let j = j as usize;
				if marks[j] == 0 {
					touched.push( j );
				}
				marks[j] += 1;
			}
		}
		for j in touched {
			if sizes[i] * sizes[j] == marks[j] {
				neighbors[i].push( j );
			}
			marks[j] = 0;
		}
	}
	neighbors
}


/// Computes the mu values: for a part left of the pivot, the rightmost part it is joined to;
/// for a part right of the pivot, the first left index it is not universal to.
pub(crate) fn compute_mu( pi : usize, neighbors : &[Vec<usize>] ) -> Vec<usize> {
	let k = neighbors.len();
	let mut mu : Vec<usize> = ( 0..k ).map( |i| if i < pi { pi } else { 0 } ).collect();

	for i in 0..pi {
		for &j in &neighbors[i] {
			if mu[j] == i {
				// j is universal up to and including i
				mu[j] = i + 1;
			}
			if j > mu[i] {
				mu[i] = j;
			}
		}
	}
	mu
}


/// Delineates the module boundaries around the pivot.
///
/// Each round tries a series composition (extend left), then a parallel composition (extend
/// right), then a prime composition pulling from both sides with two work queues. Absorbing a
/// part with an active edge into a later layer forces the module to cover the whole interval.
pub(crate) fn delineate(
	pi : usize,
	lcocomp : &[bool],
	rcomp : &[bool],
	rlayer : &[bool],
	mu : &[usize]
) -> Vec<(usize, usize)> {
	let k = mu.len();
	let mut boundaries = vec![];

	let mut lb = pi as isize - 1;
	let mut rb = pi + 1;
	let ( mut lli, mut rli ) = ( pi, pi ); // last included on each side

	while lb >= 0 && rb < k {
		let mut composed = false;

		// series: extend to the left while the candidate sees nothing beyond the module
		while lb >= 0 && mu[lb as usize] <= rli && !lcocomp[lb as usize] {
			composed = true;
			lli = lb as usize;
			lb -= 1;
		}
		if composed {
			boundaries.push( ( lli, rli ) );
			continue;
		}

		// parallel: extend to the right while the candidate is universal to the module's left
		while rb < k && lli <= mu[rb] && !rcomp[rb] && !rlayer[rb] {
			composed = true;
			rli = rb;
			rb += 1;
		}
		if composed {
			boundaries.push( ( lli, rli ) );
			continue;
		}

		// prime: pull from the left, satisfy mu ranges on both sides via two queues
		let mut left_q = VecDeque::new();
		let mut right_q = VecDeque::new();
		let mut full = false;

		loop {
			lli = lb as usize;
			lb -= 1;
			left_q.push_back( lli );
			if !lcocomp[lli] {
				break;
			}
		}

		while !full && !( left_q.is_empty() && right_q.is_empty() ) {
			while let Some( x ) = left_q.pop_front() {
				while mu[x] > rli {
					loop {
						rli = rb;
						rb += 1;
						right_q.push_back( rli );
						if rlayer[rli] {
							full = true;
							break;
						}
						if !rcomp[rli] {
							break;
						}
					}
					if full {
						break;
					}
				}
				if full {
					break;
				}
			}
			if full {
				break;
			}
			while let Some( y ) = right_q.pop_front() {
				while mu[y] < lli {
					loop {
						lli = lb as usize;
						lb -= 1;
						left_q.push_back( lli );
						if !lcocomp[lli] {
							break;
						}
					}
				}
			}
		}

		if full {
			lli = 0;
			rli = k - 1;
			lb = -1;
			rb = k;
		}
		boundaries.push( ( lli, rli ) );
	}

	boundaries
}


/// Builds the left-leaning spine over the boundaries, absorbing left neighbors from the right
/// and right non-neighbors from the left; anything not covered by an explicit boundary is
/// swept up by a final implicit one.
pub(crate) fn assemble_tree(
	forest : &mut Forest<ComputeNode>,
	ps : &[NodeIdx],
	pi : usize,
	boundaries : &[(usize, usize)]
) -> NodeIdx {
	let k = ps.len();
	let mut lb = pi as isize - 1;
	let mut rb = pi + 1;
	let mut ret = ps[pi];
	let mut bi = 0;

	while lb >= 0 || rb < k {
		let ( lbound, rbound ) = if bi < boundaries.len() { boundaries[bi] } else { ( 0, k - 1 ) };
		bi += 1;

		let new_node = forest.create_node( ComputeNode::new_operation( Operation::Prime ) );
		forest.move_to( ret, new_node );

		let mut added_nbrs = false;
		let mut added_nonnbrs = false;
		while lb >= 0 && lb as usize >= lbound {
			added_nbrs = true;
			forest.move_to( ps[lb as usize], new_node );
			lb -= 1;
		}
		while rb < k && rb <= rbound {
			added_nonnbrs = true;
			forest.move_to( ps[rb], new_node );
			rb += 1;
		}

		let op = match ( added_nbrs, added_nonnbrs ) {
			( true, true ) => Operation::Prime,
			( true, false ) => Operation::Series,
			( false, _ ) => Operation::Parallel
		};
		forest.data_mut( new_node ).set_op_type( op );
		ret = new_node;
	}
	ret
}


/// Splices out non-PRIME operation nodes whose parent carries the same operation (associative
/// flattening), bottom-up.
pub(crate) fn remove_degenerate_duplicates( forest : &mut Forest<ComputeNode>, root : NodeIdx ) {
	for x in forest.dfs_preorder( root ).into_iter().rev() {
		let d = forest.data( x );
		if !d.is_operation() || d.op_type() == Operation::Prime {
			continue;
		}
		if let Some( p ) = forest.parent( x ) {
			let pd = forest.data( p );
			if pd.is_operation() && pd.op_type() == d.op_type() {
				forest.replace_by_children( x );
				forest.remove( x );
			}
		}
	}
}


/// Runs the assembly stage on `prob`, replacing its children with the finished subtree.
pub(crate) fn assemble(
	forest : &mut Forest<ComputeNode>,
	vertex_nodes : &[NodeIdx],
	alpha : &[HashSet<u32>],
	prob : NodeIdx
) {
	assert!( !forest.is_leaf( prob ) );

	// the problem's children around the pivot form the factorizing permutation
	let current_pivot = forest.data( prob ).vertex();
	debug_assert!( current_pivot.is_some(), "assembling an unpivoted problem" );

	let mut ps = vec![];
	let mut pivot_index = None;
	for p in forest.children( prob ) {
		if forest.data( p ).vertex() == current_pivot {
			pivot_index = Some( ps.len() );
		}
		ps.push( p );
	}
	let pi = pivot_index.expect( "roots must include a pivot" );

	let lcocomp = determine_left_cocomp_fragments( forest, &ps, pi );
	let rcomp = determine_right_comp_fragments( forest, &ps, pi );
	let rlayer = determine_right_layer_neighbor( forest, vertex_nodes, alpha, &ps, pi );
	let neighbors = compute_fact_perm_edges( forest, vertex_nodes, alpha, &ps );
	let mu = compute_mu( pi, &neighbors );
	let boundaries = delineate( pi, &lcocomp, &rcomp, &rlayer, &mu );

	let root = assemble_tree( forest, &ps, pi, &boundaries );
	remove_degenerate_duplicates( forest, root );

	forest.replace_children( prob, root );
}
