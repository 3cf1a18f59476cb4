//! Various helpers to randomly generate graphs.

use std::collections::HashSet;

use rand::Rng;

use crate::graph::AdjGraph;


/// Generate a G(n, p) random graph: every edge is present independently with probability `p`.
pub fn generate_gnp( n : u32, p : f64, rng : &mut impl Rng ) -> AdjGraph<u32> {
	let mut g = AdjGraph::with_vertex_count( n );
	for u in 0..n {
		for v in ( u + 1 )..n {
			if rng.gen_bool( p ) {
				g.add_edge( u, v ).unwrap();
			}
		}
	}
	g
}


/// Generate a graph of modular width at most `max( max_mw, 3 )` by repeated substitution.
///
/// Starting from a single vertex, a random vertex is replaced by a random G(nn, p) on at most
/// `max_mw` vertices, wired to the replaced vertex's whole neighborhood, until `n` vertices
/// exist. Every step substitutes a module, so the decomposition tree's prime nodes stay small.
pub fn generate_mw_bounded( n : u32, max_mw : u32, p : f64, rng : &mut impl Rng ) -> AdjGraph<u32> {
	let mut g = AdjGraph::new();
	if n == 0 {
		return g;
	}
	let max_mw = max_mw.max( 3 );

	let mut adj : Vec<HashSet<u32>> = vec![HashSet::new()];
	while ( adj.len() as u32 ) < n {
		let prev_n = adj.len() as u32;

		// pick a vertex to substitute and the replacement size
		let x = rng.gen_range( 0..prev_n );
		let nn = ( n - prev_n + 1 ).min( max_mw );
		let label = |i : u32| if i < nn - 1 { prev_n + i } else { x };

		let nbrs : Vec<u32> = adj[x as usize].iter().copied().collect();
		for &w in &nbrs {
			adj[w as usize].remove( &x );
		}
		adj[x as usize].clear();
		for _ in 0..( nn - 1 ) {
			adj.push( HashSet::new() );
		}

		// random edges inside the replacement
		for u in 0..nn {
			for v in ( u + 1 )..nn {
				if rng.gen_bool( p ) {
					let ( a, b ) = ( label( u ), label( v ) );
					adj[a as usize].insert( b );
					adj[b as usize].insert( a );
				}
			}
		}

		// the whole replacement sees x's old neighborhood
		for i in 0..nn {
			for &w in &nbrs {
				adj[label( i ) as usize].insert( w );
				adj[w as usize].insert( label( i ) );
			}
		}
	}

	for v in 0..adj.len() as u32 {
		g.add_vertex( v );
	}
	for ( u, nbrs ) in adj.iter().enumerate() {
		for &w in nbrs {
			if ( u as u32 ) < w {
				g.add_edge( u as u32, w ).unwrap();
			}
		}
	}
	g
}
