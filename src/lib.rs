/*!
Modular decomposition of finite simple undirected graphs.

This crate computes the unique *modular decomposition tree* (MD-tree) of a graph: a rooted,
ordered tree whose leaves are the vertices of the graph and whose internal nodes are labeled
parallel (disjoint union), series (join), or prime (irreducible). The tree encodes every strong
module of the graph; reading the leaves left to right yields a factorizing permutation, an
ordering of the vertices in which every strong module is a contiguous interval.

Two independent solvers are provided and produce the same tree (up to canonical sorting):

* [SolverKind::Linear]: a linear-time algorithm in the style of Tedder, Corneil, Habib and Paul
  \[TCHP08\], based on pivot factorization, refinement by active edges, promotion of
  split-marked nodes, and assembly along a factorizing permutation.
* [SolverKind::Naive]: an O(n⁴) algorithm based on implication classes \[BM83\], retained as a
  straightforward reference implementation.

Input graphs are presented through the [graph::Graph] trait; [graph::AdjGraph] is a ready-made
adjacency-list implementation, and the `petgraph` feature accepts petgraph undirected graphs.

# Examples

```
use mdtree::{modular_decomposition, SolverKind};
use mdtree::graph::AdjGraph;

// The path on four vertices is prime
let mut g = AdjGraph::with_vertex_count( 4 );
g.add_edges( [( 0, 1 ), ( 1, 2 ), ( 2, 3 )] ).unwrap();

let t = modular_decomposition( &g, SolverKind::Linear, true ).unwrap();
assert_eq!( t.to_string(), "(P(0)(1)(2)(3))" );
assert_eq!( t.modular_width(), 4 );
```

```
use mdtree::{modular_decomposition, SolverKind};
use mdtree::graph::AdjGraph;

// A join of two vertices decomposes into a series node; both solvers agree
let mut g = AdjGraph::with_vertex_count( 2 );
g.add_edges( [( 0, 1 )] ).unwrap();

let naive = modular_decomposition( &g, SolverKind::Naive, true ).unwrap();
let linear = modular_decomposition( &g, SolverKind::Linear, true ).unwrap();
assert_eq!( naive.to_string(), "(J(0)(1))" );
assert_eq!( naive.to_string(), linear.to_string() );

// The empty graph has no decomposition tree
let empty = AdjGraph::<u32>::new();
assert!( modular_decomposition( &empty, SolverKind::Linear, true ).is_none() );
```

# Crate feature flags

The following crate feature flags are available. They are configured in your `Cargo.toml`.

* `space_efficient_nodes`
	* Optional, requires the `nonmax` crate.
	* Improve forest node space usage. Disallows the maximum node index 2^64-1 and incurs a
		small runtime cost to check that this node index is not used.
* `petgraph`
	* Optional, requires the `petgraph` crate.
	* Allow petgraph undirected graphs as decomposition input.
* `generate`
	* Optional, requires the `rand` crate.
	* Enables functionality to randomly generate graphs. Used for tests.

# Literature

\[TCHP08\] Marc Tedder, Derek G. Corneil, Michel Habib and Christophe Paul. Simpler
Linear-Time Modular Decomposition via Recursive Factorizing Permutations.
Automata, Languages and Programming, ICALP 2008, 634–645, 2008.
doi:[10.1007/978-3-540-70575-8_52](https://doi.org/10.1007/978-3-540-70575-8_52)

\[BM83\] Hermann Buer and Rolf H. Möhring. A Fast Algorithm for the Decomposition of Graphs
and Posets. Mathematics of Operations Research, 8(2):170–184, 1983.
doi:[10.1287/moor.8.2.170](https://doi.org/10.1287/moor.8.2.170)
*/

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::private_doc_tests)]


use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg( feature = "space_efficient_nodes" )]
use nonmax::NonMaxUsize;

pub mod forest;
pub mod graph;
pub mod md_tree;

mod compute;
mod naive;

#[cfg( feature = "generate" )]
pub mod generate;

#[cfg( feature = "petgraph" )]
pub mod pg;

pub use crate::graph::{AdjGraph, Graph};
pub use crate::md_tree::MdTree;


/// Represents a node in a forest to the outside world.
#[cfg( not( feature = "space_efficient_nodes" ) )]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeIdx {
	raw_idx : usize
}

#[cfg( not( feature = "space_efficient_nodes" ) )]
impl NodeIdx {
	/// Convert `usize` into `NodeIdx`.
	///
	/// Use with care, as this can circumvent bounds checking.
	pub fn new( idx : usize ) -> NodeIdx {
		NodeIdx { raw_idx: idx }
	}

	/// Convert this into `usize`.
	#[inline]
	pub fn index( &self ) -> usize {
		self.raw_idx
	}
}


/// Represents a node in a forest to the outside world.
#[cfg( feature = "space_efficient_nodes" )]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeIdx {
	raw_idx : NonMaxUsize
}

#[cfg( feature = "space_efficient_nodes" )]
impl NodeIdx {
	/// Convert `usize` into `NodeIdx`.
	///
	/// Use with care, as this can circumvent bounds checking.
	pub fn new( idx : usize ) -> NodeIdx {
		NodeIdx { raw_idx : NonMaxUsize::new( idx ).unwrap() }
	}

	/// Convert this into `usize`.
	#[inline]
	pub fn index( &self ) -> usize {
		self.raw_idx.get()
	}
}

impl Display for NodeIdx {
	fn fmt( &self, f: &mut Formatter<'_> ) -> std::fmt::Result {
		write!( f, "{}", self.index() )
	}
}


/// The label of an internal MD-tree node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Operation {
	/// Irreducible; the children admit no coarser grouping.
	Prime,

	/// Join; every pair of vertices from distinct children is adjacent.
	Series,

	/// Disjoint union; no vertex of one child is adjacent to a vertex of another.
	Parallel
}

impl Display for Operation {
	fn fmt( &self, f : &mut Formatter<'_> ) -> std::fmt::Result {
		let c = match self {
			Operation::Prime => 'P',
			Operation::Series => 'J',
			Operation::Parallel => 'U'
		};
		write!( f, "{c}" )
	}
}


/// Selects one of the two decomposition algorithms.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SolverKind {
	/// The O(n⁴) implication-class algorithm.
	Naive,

	/// The linear-time factorizing-permutation algorithm.
	Linear
}

/// Error returned when parsing an unrecognized solver name.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown solver: {0}")]
pub struct UnknownSolverError( String );

impl FromStr for SolverKind {
	type Err = UnknownSolverError;

	fn from_str( s : &str ) -> Result<Self, Self::Err> {
		match s {
			"naive" => Ok( SolverKind::Naive ),
			"linear" => Ok( SolverKind::Linear ),
			_ => Err( UnknownSolverError( s.to_string() ) )
		}
	}
}


/// Computes the modular decomposition tree of `g` with the chosen solver.
///
/// Returns `None` for the empty graph. If `sorted` is true, the tree is brought into canonical
/// order (see [MdTree::sort]) before it is returned.
pub fn modular_decomposition<TGraph : Graph>( g : &TGraph, solver : SolverKind, sorted : bool )
		-> Option<MdTree<TGraph::Vertex>>
{
	if g.num_vertices() == 0 {
		return None;
	}
	let mut ret = match solver {
		SolverKind::Naive => naive::decompose( g ),
		SolverKind::Linear => compute::decompose( g )
	};
	if sorted {
		ret.sort();
	}
	Some( ret )
}
