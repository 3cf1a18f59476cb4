use rand::prelude::StdRng;
use rand::SeedableRng;

use mdtree::{modular_decomposition, SolverKind};
use mdtree::generate::{generate_gnp, generate_mw_bounded};

use crate::util;

#[test]
fn test_random_agreement() {
	let mut rng = StdRng::seed_from_u64( 12345 );
	let ( min_n, max_n ) = ( 5u32, 20u32 );
	let num_iterations = 2;

	for n in min_n..=max_n {
		for _ in 0..num_iterations {
			for p in [1.0 / n as f64, 0.1, 0.2, 0.3] {
				let g = generate_gnp( n, p, &mut rng );
				util::check_property( &g );
			}
		}
	}
}

#[test]
fn test_random_larger_sparse_and_dense() {
	let mut rng = StdRng::seed_from_u64( 999 );
	for n in [30u32, 40, 50] {
		for p in [0.08, 0.5, 0.9] {
			let g = generate_gnp( n, p, &mut rng );
			util::check_property( &g );
		}
	}
}

#[test]
fn test_random_mw_bounded() {
	let mut rng = StdRng::seed_from_u64( 12345 );
	let mw = 5;

	for n in [30u32, 35, 40, 45, 50] {
		for _ in 0..3 {
			let g = generate_mw_bounded( n, mw, 0.5, &mut rng );
			let t = modular_decomposition( &g, SolverKind::Linear, false ).unwrap();
			assert!( t.modular_width() <= mw as usize );
			util::check_property( &g );
		}
	}
}

#[test]
fn test_mw_bounded_large() {
	// deep substitution trees; all traversals must cope without native recursion
	let mut rng = StdRng::seed_from_u64( 12345 );
	for _ in 0..3 {
		let g = generate_mw_bounded( 500, 4, 0.5, &mut rng );
		let t = modular_decomposition( &g, SolverKind::Linear, false ).unwrap();
		assert!( t.modular_width() <= 4 );

		let mut sorted = t.vertices();
		sorted.sort_unstable();
		assert_eq!( sorted, ( 0..500 ).collect::<Vec<_>>() );
	}
}
