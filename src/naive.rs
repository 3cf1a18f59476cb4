//! Naive modular decomposition via implication classes.
//!
//! Implements the decomposition of Buer and Möhring: label the edges of a shrinking working
//! copy of the graph with implication-class indices by BFS over the forcing relation, then
//! recursively partition each vertex set into connected components, co-components, or the
//! adjacency classes of the covering implication class. O(n⁴), kept as the reference
//! implementation the linear solver is checked against.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use log::trace;

use crate::{NodeIdx, Operation};
use crate::forest::Forest;
use crate::graph::{DenseGraph, Graph};
use crate::md_tree::{MdNode, MdTree};


/// Decomposes `g` with the naive solver.
pub(crate) fn decompose<TGraph : Graph>( g : &TGraph ) -> MdTree<TGraph::Vertex> {
	let ( dense, labels ) = DenseGraph::build( g );
	let ( forest, root, order ) = solve( &dense );
	MdTree::from_parts( forest, root, order, labels )
}


/// Computes the matrix of implication-class indices.
///
/// Entry `(i, j)` holds the class of the edge `{i, j}`, or 0 if the edge is absent. Classes
/// are seeded from the lexicographically first unlabeled edge; each BFS step follows the
/// forcing relation "neighbor of exactly one endpoint", and a finished class is removed from
/// the working copy before the next seed is taken.
pub(crate) fn compute_implication_matrix( graph : &DenseGraph ) -> Vec<Vec<u32>> {
	let n = graph.num_vertices();
	let mut h : Vec<HashSet<u32>> =
		graph.adj.iter().map( |nbrs| nbrs.iter().copied().collect() ).collect();
	let mut m = vec![vec![0u32; n]; n];
	let mut label = 0;

	for u in 0..n as u32 {
		for &v in graph.neighbors( u ) {
			if v < u || m[u as usize][v as usize] > 0 {
				continue;
			}
			label += 1;

			let mut q : VecDeque<(u32, u32)> = VecDeque::new();
			q.push_back( ( u, v ) );
			let mut target = vec![];

			while let Some( ( a, b ) ) = q.pop_front() {
				debug_assert!( a < b );
				if m[a as usize][b as usize] > 0 {
					continue;
				}
				m[a as usize][b as usize] = label;
				target.push( ( a, b ) );

				for &c in &h[a as usize] {
					if !h[b as usize].contains( &c ) {
						let ( aa, cc ) = ( a.min( c ), a.max( c ) );
						if m[aa as usize][cc as usize] == 0 {
							q.push_back( ( aa, cc ) );
						}
					}
				}
				for &d in &h[b as usize] {
					if !h[a as usize].contains( &d ) {
						let ( bb, dd ) = ( b.min( d ), b.max( d ) );
						if m[bb as usize][dd as usize] == 0 {
							q.push_back( ( bb, dd ) );
						}
					}
				}
			}

			for ( a, b ) in target {
				h[a as usize].remove( &b );
				h[b as usize].remove( &a );
			}
		}
	}

	// symmetrize
	for i in 0..n {
		for j in 0..i {
			m[i][j] = m[j][i];
		}
	}
	m
}


/// Groups equal rows of a boolean matrix, returning the index classes ordered by row content.
pub(crate) fn equivalent_classes( rows : &[Vec<bool>] ) -> Vec<Vec<usize>> {
	let mut classes : BTreeMap<&Vec<bool>, Vec<usize>> = BTreeMap::new();
	for ( i, row ) in rows.iter().enumerate() {
		classes.entry( row ).or_default().push( i );
	}
	classes.into_values().collect()
}


/// Collects the connected components of the subgraph (or complement subgraph) induced by `xs`,
/// each in BFS order.
fn components( graph : &DenseGraph, xs : &[u32], complement : bool ) -> Vec<Vec<u32>> {
	let mut seen : HashSet<u32> = HashSet::new();
	let mut ret = vec![];

	for &s in xs {
		if seen.contains( &s ) {
			continue;
		}
		let mut comp = vec![];
		let mut q = VecDeque::new();
		q.push_back( s );
		seen.insert( s );
		while let Some( x ) = q.pop_front() {
			comp.push( x );
			for &y in xs {
				if y == x || seen.contains( &y ) {
					continue;
				}
				if graph.has_edge( x, y ) != complement {
					seen.insert( y );
					q.push_back( y );
				}
			}
		}
		ret.push( comp );
	}
	ret
}


/// The implication class appearing in every row of the matrix restricted to `xs`.
fn find_covering_class( m : &[Vec<u32>], xs : &[u32] ) -> u32 {
	let mut cnt : HashMap<u32, usize> = HashMap::new();
	for &u in xs {
		let row_classes : HashSet<u32> =
			xs.iter().map( |v| m[u as usize][*v as usize] ).filter( |k| *k != 0 ).collect();
		for k in row_classes {
			let c = cnt.entry( k ).or_insert( 0 );
			*c += 1;
			if *c == xs.len() {
				return k;
			}
		}
	}
	panic!( "there must be exactly one covering class" );
}


/// Runs the naive solver on a dense graph.
pub(crate) fn solve( graph : &DenseGraph ) -> ( Forest<MdNode>, NodeIdx, Vec<u32> ) {
	let n = graph.num_vertices();
	assert!( n > 0, "empty graph" );

	let m = compute_implication_matrix( graph );
	trace!( "implication classes computed" );

	let mut vertices : Vec<u32> = ( 0..n as u32 ).collect();
	let mut forest : Forest<MdNode> = Forest::new();
	let root = forest.create_node( MdNode::new_operation( Operation::Prime, 0, n ) );

	let mut q = VecDeque::new();
	q.push_back( root );

	while let Some( node ) = q.pop_front() {
		let ( begin, end ) = {
			let d = forest.data( node );
			( d.vertices_begin, d.vertices_end )
		};

		if end - begin == 1 {
			forest.data_mut( node ).vertex = Some( vertices[begin] );
			continue;
		}

		let xs : Vec<u32> = vertices[begin..end].to_vec();

		let comps = components( graph, &xs, false );
		let parts : Vec<Vec<u32>> = if comps.len() > 1 {
			forest.data_mut( node ).op = Operation::Parallel;
			comps
		}
		else {
			let cocomps = components( graph, &xs, true );
			if cocomps.len() > 1 {
				forest.data_mut( node ).op = Operation::Series;
				cocomps
			}
			else {
				forest.data_mut( node ).op = Operation::Prime;

				let target = find_covering_class( &m, &xs );
				let rows : Vec<Vec<bool>> = xs.iter()
					.map( |u| xs.iter().map( |v| m[*u as usize][*v as usize] == target ).collect() )
					.collect();
				equivalent_classes( &rows ).into_iter()
					.map( |class| class.into_iter().map( |i| xs[i] ).collect() )
					.collect()
			}
		};

		let mut index = begin;
		for vs in parts {
			vertices[index..index + vs.len()].copy_from_slice( &vs );
			let child = forest.create_node( MdNode::new_operation( Operation::Prime, index, index + vs.len() ) );
			forest.move_to( child, node );
			q.push_back( child );
			index += vs.len();
		}
	}

	( forest, root, vertices )
}
