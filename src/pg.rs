//! Decomposition input based on the petgraph library.

use petgraph::graph::{NodeIndex, UnGraph};

use crate::graph::Graph;


fn conv_idx( v : usize ) -> NodeIndex {
	NodeIndex::new( v )
}


/// A petgraph undirected graph is a valid decomposition input; its vertices are the node
/// indices `0..node_count`.
impl<N, E> Graph for UnGraph<N, E> {
	type Vertex = usize;

	fn num_vertices( &self ) -> usize {
		self.node_count()
	}

	fn vertices( &self ) -> Vec<usize> {
		( 0..self.node_count() ).collect()
	}

	fn neighbors( &self, v : &usize ) -> Vec<usize> {
		UnGraph::neighbors( self, conv_idx( *v ) ).map( |x| x.index() ).collect()
	}
}
