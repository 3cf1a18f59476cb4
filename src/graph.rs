//! Input graph interface and a ready-made adjacency-list implementation.
//!
//! The decomposition engine only needs to know the vertex count, the vertices in sorted order,
//! and the neighbors of each vertex. Vertices may carry arbitrary ordered, displayable labels;
//! they are relabeled internally to dense integers `0..n-1` in sorted label order, and the
//! original labels are preserved for output.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Display};


/// Requirements on vertex labels: ordered, displayable, cloneable.
pub trait VertexId : Clone + Ord + Debug + Display {}

impl<T : Clone + Ord + Debug + Display> VertexId for T {}


/// A finite simple undirected graph, as seen by the decomposition engine.
///
/// Implementations must not report self-loops or parallel edges.
pub trait Graph {
	/// The vertex label type.
	type Vertex : VertexId;

	/// The number of vertices.
	fn num_vertices( &self ) -> usize;

	/// All vertices in ascending label order.
	fn vertices( &self ) -> Vec<Self::Vertex>;

	/// The neighbors of `v`, in any order.
	fn neighbors( &self, v : &Self::Vertex ) -> Vec<Self::Vertex>;
}


/// Error raised when building an invalid graph.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GraphError<TVertex : VertexId> {
	/// A self-loop was supplied; the engine only handles simple graphs.
	#[error("self-loop detected on vertex {0}")]
	SelfLoop( TVertex )
}


/// An adjacency-list graph over arbitrary vertex labels.
///
/// Vertices are kept in sorted order; inserting an edge twice is a no-op.
#[derive(Clone, Debug, Default)]
pub struct AdjGraph<TVertex : VertexId> {
	adj : BTreeMap<TVertex, BTreeSet<TVertex>>
}

impl<TVertex : VertexId> AdjGraph<TVertex> {
	/// Creates a graph with no vertices.
	pub fn new() -> AdjGraph<TVertex> {
		AdjGraph{ adj : BTreeMap::new() }
	}

	/// Adds an isolated vertex. No-op if the vertex exists.
	pub fn add_vertex( &mut self, v : TVertex ) {
		self.adj.entry( v ).or_default();
	}

	/// Adds the undirected edge `{u, v}`, inserting missing endpoints. No-op if the edge exists.
	pub fn add_edge( &mut self, u : TVertex, v : TVertex ) -> Result<(), GraphError<TVertex>> {
		if u == v {
			return Err( GraphError::SelfLoop( u ) );
		}
		self.adj.entry( u.clone() ).or_default().insert( v.clone() );
		self.adj.entry( v ).or_default().insert( u );
		Ok( () )
	}

	/// Adds every edge in `edges`.
	pub fn add_edges( &mut self, edges : impl IntoIterator<Item = (TVertex, TVertex)> )
			-> Result<(), GraphError<TVertex>>
	{
		for ( u, v ) in edges {
			self.add_edge( u, v )?;
		}
		Ok( () )
	}

	/// Builds a graph from an edge list. Vertices are exactly the edge endpoints.
	pub fn from_edges( edges : impl IntoIterator<Item = (TVertex, TVertex)> )
			-> Result<AdjGraph<TVertex>, GraphError<TVertex>>
	{
		let mut g = AdjGraph::new();
		g.add_edges( edges )?;
		Ok( g )
	}

	/// The number of edges.
	pub fn num_edges( &self ) -> usize {
		self.adj.values().map( |nbrs| nbrs.len() ).sum::<usize>() / 2
	}

	/// Whether the edge `{u, v}` is present.
	pub fn has_edge( &self, u : &TVertex, v : &TVertex ) -> bool {
		self.adj.get( u ).map( |nbrs| nbrs.contains( v ) ).unwrap_or( false )
	}
}

impl AdjGraph<u32> {
	/// Creates an edgeless graph on vertices `0..n`.
	pub fn with_vertex_count( n : u32 ) -> AdjGraph<u32> {
		let mut g = AdjGraph::new();
		for v in 0..n {
			g.add_vertex( v );
		}
		g
	}
}

impl<TVertex : VertexId> Graph for AdjGraph<TVertex> {
	type Vertex = TVertex;

	fn num_vertices( &self ) -> usize {
		self.adj.len()
	}

	fn vertices( &self ) -> Vec<TVertex> {
		self.adj.keys().cloned().collect()
	}

	fn neighbors( &self, v : &TVertex ) -> Vec<TVertex> {
		match self.adj.get( v ) {
			Some( nbrs ) => nbrs.iter().cloned().collect(),
			None => vec![]
		}
	}
}


/// A graph relabeled to dense vertex ids `0..n`, in sorted label order.
///
/// Both solvers run on this representation; neighbor lists are sorted ascending.
pub(crate) struct DenseGraph {
	pub(crate) adj : Vec<Vec<u32>>
}

impl DenseGraph {
	/// Relabels `g`, returning the dense graph and the labels by dense id.
	pub(crate) fn build<TGraph : Graph>( g : &TGraph ) -> ( DenseGraph, Vec<TGraph::Vertex> ) {
		let labels = g.vertices();
		debug_assert!( labels.windows( 2 ).all( |w| w[0] < w[1] ), "vertices must be sorted and distinct" );

		let adj = labels.iter().map( |v| {
			let mut nbrs : Vec<u32> = g.neighbors( v ).iter()
				.map( |w| labels.binary_search( w ).expect( "neighbor is not a vertex" ) as u32 )
				.collect();
			nbrs.sort_unstable();
			nbrs
		} ).collect();

		( DenseGraph{ adj }, labels )
	}

	/// Builds a dense graph directly from dense edges on vertices `0..n`. Test helper.
	#[cfg(test)]
	pub(crate) fn from_edges( n : usize, edges : &[(u32, u32)] ) -> DenseGraph {
		let mut adj = vec![vec![]; n];
		for ( u, v ) in edges {
			adj[*u as usize].push( *v );
			adj[*v as usize].push( *u );
		}
		for nbrs in adj.iter_mut() {
			nbrs.sort_unstable();
			nbrs.dedup();
		}
		DenseGraph{ adj }
	}

	pub(crate) fn num_vertices( &self ) -> usize {
		self.adj.len()
	}

	pub(crate) fn neighbors( &self, v : u32 ) -> &[u32] {
		&self.adj[v as usize]
	}

	pub(crate) fn has_edge( &self, u : u32, v : u32 ) -> bool {
		self.adj[u as usize].binary_search( &v ).is_ok()
	}
}
