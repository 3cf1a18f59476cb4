//! The modular decomposition tree handed back to callers.
//!
//! Leaves carry graph vertices, internal nodes an [Operation] label together with the
//! half-open interval its module occupies in the factorizing permutation. Rendering follows
//! the parenthesized form `(L C₁ C₂ …)` with no separators.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::{NodeIdx, Operation};
use crate::forest::Forest;
use crate::graph::VertexId;


/// Payload of an MD-tree node: a vertex leaf or an operation over an index range.
#[derive(Clone, Debug)]
pub(crate) struct MdNode {
	pub(crate) vertex : Option<u32>,
	pub(crate) op : Operation,
	pub(crate) vertices_begin : usize,
	pub(crate) vertices_end : usize
}

impl MdNode {
	pub(crate) fn new_vertex( v : u32, begin : usize, end : usize ) -> MdNode {
		MdNode{ vertex : Some( v ), op : Operation::Prime, vertices_begin : begin, vertices_end : end }
	}

	pub(crate) fn new_operation( op : Operation, begin : usize, end : usize ) -> MdNode {
		MdNode{ vertex : None, op, vertices_begin : begin, vertices_end : end }
	}

	pub(crate) fn is_vertex( &self ) -> bool {
		self.vertex.is_some()
	}

	pub(crate) fn size( &self ) -> usize {
		self.vertices_end - self.vertices_begin
	}
}


/// A modular decomposition tree.
///
/// The leaves, read left to right, are a factorizing permutation of the graph's vertices:
/// every strong module is a contiguous interval, and every internal node records its interval.
pub struct MdTree<TVertex : VertexId> {
	forest : Forest<MdNode>,
	root : NodeIdx,
	order : Vec<u32>,
	labels : Vec<TVertex>
}

impl<TVertex : VertexId> MdTree<TVertex> {
	pub(crate) fn from_parts(
		forest : Forest<MdNode>,
		root : NodeIdx,
		order : Vec<u32>,
		labels : Vec<TVertex>
	) -> MdTree<TVertex> {
		debug_assert_eq!( order.len(), labels.len() );
		MdTree{ forest, root, order, labels }
	}

	/// The number of vertices.
	pub fn size( &self ) -> usize {
		self.labels.len()
	}

	/// The factorizing permutation: all vertices in tree order, left to right.
	pub fn vertices( &self ) -> Vec<TVertex> {
		self.order.iter().map( |v| self.labels[*v as usize].clone() ).collect()
	}

	/// The `[begin, end)` interval of every tree node into [Self::vertices], in preorder. The
	/// intervals of internal nodes are exactly the strong modules of the graph.
	pub fn modules( &self ) -> Vec<(usize, usize)> {
		self.forest.dfs_preorder( self.root ).iter()
			.map( |x| {
				let d = self.forest.data( *x );
				( d.vertices_begin, d.vertices_end )
			} )
			.collect()
	}

	/// The maximum number of children of any PRIME node, or 0 if there is none.
	pub fn modular_width( &self ) -> usize {
		let mut ret = 0;
		for c in self.forest.dfs_reverse_preorder( self.root ) {
			let d = self.forest.data( c );
			if !d.is_vertex() && d.op == Operation::Prime {
				ret = ret.max( self.forest.num_children( c ) );
			}
		}
		ret
	}

	/// Sorts the tree into canonical order: each node's children are arranged so that the child
	/// containing the smallest vertex comes first, and the stored intervals are reassigned to
	/// match. Idempotent.
	pub fn sort( &mut self ) {
		let level_order = self.forest.bfs( self.root );

		// bottom-up: the smallest vertex in each subtree (dense ids follow label order)
		let mut min_vertex : HashMap<NodeIdx, u32> = HashMap::new();
		for &node in level_order.iter().rev() {
			if self.forest.is_leaf( node ) {
				min_vertex.insert( node, self.forest.data( node ).vertex.expect( "leaf without vertex" ) );
			}
			if let Some( p ) = self.forest.parent( node ) {
				let m = min_vertex[&node];
				min_vertex.entry( p )
					.and_modify( |x| *x = ( *x ).min( m ) )
					.or_insert( m );
			}
		}

		// top-down: reorder children and reassign intervals contiguously
		let mut new_begin : HashMap<NodeIdx, usize> = HashMap::from( [( self.root, 0 )] );
		for node in level_order {
			let nb = new_begin[&node];
			let size = self.forest.data( node ).size();

			if self.forest.is_leaf( node ) {
				self.order[nb] = self.forest.data( node ).vertex.unwrap();
			}
			else {
				let mut idx = nb + size;
				let ranked : Vec<(u32, NodeIdx)> = self.forest.children( node ).iter()
					.map( |c| ( min_vertex[c], *c ) )
					.sorted()
					.collect();
				for ( _, c ) in ranked.into_iter().rev() {
					idx -= self.forest.data( c ).size();
					new_begin.insert( c, idx );
					self.forest.make_first_child( c );
				}
			}

			let d = self.forest.data_mut( node );
			d.vertices_begin = nb;
			d.vertices_end = nb + size;
		}
	}
}

impl<TVertex : VertexId> Display for MdTree<TVertex> {
	fn fmt( &self, f : &mut Formatter<'_> ) -> std::fmt::Result {
		let s = self.forest.format_with( self.root, |d| match d.vertex {
			Some( v ) => format!( "{}", self.labels[v as usize] ),
			None => format!( "{}", d.op )
		} );
		write!( f, "{s}" )
	}
}
