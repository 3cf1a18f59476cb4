use mdtree::{modular_decomposition, AdjGraph, SolverKind};

use crate::util;

fn check_both( n : u32, edges : &[(u32, u32)], expected : &str, width : usize ) {
	let g = util::graph( n, edges );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &g, solver );
		assert_eq!( t.to_string(), expected, "{solver:?}" );
		assert_eq!( t.modular_width(), width, "{solver:?}" );
	}
}

#[test]
fn test_empty_graph() {
	let g = AdjGraph::<u32>::new();
	assert!( modular_decomposition( &g, SolverKind::Naive, true ).is_none() );
	assert!( modular_decomposition( &g, SolverKind::Linear, true ).is_none() );
}

#[test]
fn test_trivial_graphs() {
	check_both( 1, &[], "(0)", 0 );
	check_both( 2, &[], "(U(0)(1))", 0 );
	check_both( 2, &[( 0, 1 )], "(J(0)(1))", 0 );
	check_both( 5, &[], "(U(0)(1)(2)(3)(4))", 0 );
	check_both( 10, &[], "(U(0)(1)(2)(3)(4)(5)(6)(7)(8)(9))", 0 );
}

#[test]
fn test_path_and_cycle() {
	// P4 is the smallest prime graph
	check_both( 4, &[( 0, 1 ), ( 1, 2 ), ( 2, 3 )], "(P(0)(1)(2)(3))", 4 );

	// C4 with both chords is complete
	check_both( 4, &[( 0, 1 ), ( 1, 2 ), ( 2, 3 ), ( 3, 0 ), ( 0, 2 ), ( 1, 3 )], "(J(0)(1)(2)(3))", 0 );
}

#[test]
fn test_two_components_with_joins() {
	check_both( 6, &[( 1, 2 ), ( 1, 0 ), ( 4, 3 ), ( 3, 4 )], "(U(J(U(0)(2))(1))(J(3)(4))(5))", 0 );
}

#[test]
fn test_five_vertices_nested() {
	check_both(
		5,
		&[( 0, 1 ), ( 0, 2 ), ( 0, 3 ), ( 1, 2 ), ( 1, 4 ), ( 2, 4 ), ( 3, 4 )],
		"(J(U(0)(4))(U(J(1)(2))(3)))",
		0
	);
}

#[test]
fn test_prime_and_degenerate_mix() {
	let edges = [
		( 1, 8 ), ( 1, 11 ), ( 1, 2 ), ( 1, 10 ), ( 1, 12 ), ( 1, 9 ), ( 1, 13 ), ( 8, 11 ), ( 2, 10 ),
		( 0, 4 ), ( 0, 7 ), ( 0, 3 ), ( 4, 5 ), ( 4, 7 ), ( 3, 7 ), ( 3, 5 ), ( 3, 6 ), ( 5, 6 ), ( 7, 6 )
	];
	check_both(
		14, &edges,
		"(U(P(0)(3)(4)(5)(6)(7))(J(1)(U(J(2)(10))(J(8)(11))(9)(12)(13))))",
		6
	);

	let g = util::graph( 14, &edges );
	let c = util::complement( &g );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(J(P(0)(3)(4)(5)(6)(7))(U(1)(J(U(2)(10))(U(8)(11))(9)(12)(13))))" );
		assert_eq!( t.modular_width(), 6 );
	}
}

#[test]
fn test_nested_prime() {
	let edges = [
		( 0, 1 ), ( 1, 2 ), ( 2, 3 ),
		( 8, 9 ),
		( 8, 0 ), ( 8, 1 ), ( 8, 2 ), ( 8, 3 ),
		( 9, 4 )
	];
	check_both( 10, &edges, "(U(P(P(0)(1)(2)(3))(4)(8)(9))(5)(6)(7))", 4 );

	let g = util::graph( 10, &edges );
	let c = util::complement( &g );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(J(P(P(0)(1)(2)(3))(4)(8)(9))(5)(6)(7))" );
		assert_eq!( t.modular_width(), 4 );
	}
}

#[test]
fn test_self_complementary_structure() {
	let edges = [
		( 0, 1 ), ( 1, 2 ), ( 2, 3 ), ( 4, 5 ), ( 5, 6 ), ( 6, 7 ),
		( 8, 9 ),
		( 8, 0 ), ( 8, 1 ), ( 8, 2 ), ( 8, 3 ),
		( 9, 4 ), ( 9, 5 ), ( 9, 6 ), ( 9, 7 )
	];
	check_both( 10, &edges, "(P(P(0)(1)(2)(3))(P(4)(5)(6)(7))(8)(9))", 4 );

	let g = util::graph( 10, &edges );
	let c = util::complement( &g );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(P(P(0)(1)(2)(3))(P(4)(5)(6)(7))(8)(9))" );
	}
}

#[test]
fn test_universal_vertex() {
	let edges = [
		( 0, 1 ), ( 0, 2 ), ( 0, 3 ), ( 0, 4 ), ( 0, 5 ), ( 0, 6 ),
		( 1, 2 ), ( 2, 3 ), ( 3, 4 ), ( 5, 6 )
	];
	check_both( 7, &edges, "(J(0)(U(P(1)(2)(3)(4))(J(5)(6))))", 4 );

	let g = util::graph( 7, &edges );
	let c = util::complement( &g );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(U(0)(J(P(1)(2)(3)(4))(U(5)(6))))" );
		assert_eq!( t.modular_width(), 4 );
	}
}

#[test]
fn test_disjoint_paths_with_apexes() {
	let edges = [
		( 0, 4 ), ( 4, 2 ), ( 2, 6 ), ( 9, 7 ), ( 7, 1 ), ( 1, 5 ), ( 3, 8 ),
		( 3, 9 ), ( 3, 7 ), ( 3, 1 ), ( 3, 5 ), ( 8, 0 ), ( 8, 4 ), ( 8, 2 ), ( 8, 6 )
	];
	check_both( 10, &edges, "(P(P(0)(2)(4)(6))(P(1)(5)(7)(9))(3)(8))", 4 );

	let g = util::graph( 10, &edges );
	let c = util::complement( &g );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(P(P(0)(2)(4)(6))(P(1)(5)(7)(9))(3)(8))" );
	}
}

#[test]
fn test_two_paths_fully_joined() {
	let edges = [
		( 1, 2 ), ( 2, 3 ), ( 3, 4 ),
		( 5, 6 ), ( 6, 7 ), ( 7, 8 ),
		( 0, 1 ), ( 0, 2 ), ( 0, 3 ), ( 0, 4 ),
		( 9, 5 ), ( 9, 6 ), ( 9, 7 ), ( 9, 8 ),
		( 1, 5 ), ( 1, 6 ), ( 1, 7 ), ( 1, 8 ),
		( 2, 5 ), ( 2, 6 ), ( 2, 7 ), ( 2, 8 ),
		( 3, 5 ), ( 3, 6 ), ( 3, 7 ), ( 3, 8 ),
		( 4, 5 ), ( 4, 6 ), ( 4, 7 ), ( 4, 8 )
	];
	check_both( 10, &edges, "(P(0)(P(1)(2)(3)(4))(P(5)(6)(7)(8))(9))", 4 );

	let g = util::graph( 10, &edges );
	let c = util::complement( &g );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(P(0)(P(1)(2)(3)(4))(P(5)(6)(7)(8))(9))" );
	}
}

#[test]
fn test_sparse_fixed_graphs() {
	check_both( 6, &[( 0, 2 ), ( 2, 4 ), ( 4, 3 )], "(U(P(0)(2)(3)(4))(1)(5))", 4 );
	let c = util::complement( &util::graph( 6, &[( 0, 2 ), ( 2, 4 ), ( 4, 3 )] ) );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(J(P(0)(2)(3)(4))(1)(5))" );
		assert_eq!( t.modular_width(), 4 );
	}

	check_both( 7, &[( 5, 2 ), ( 5, 0 ), ( 5, 6 ), ( 1, 3 )], "(U(J(U(0)(2)(6))(5))(J(1)(3))(4))", 0 );
	let c = util::complement( &util::graph( 7, &[( 5, 2 ), ( 5, 0 ), ( 5, 6 ), ( 1, 3 )] ) );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(J(U(J(0)(2)(6))(5))(U(1)(3))(4))" );
	}

	let edges = [
		( 1, 9 ), ( 2, 8 ), ( 2, 11 ), ( 3, 5 ), ( 3, 7 ), ( 4, 11 ), ( 5, 9 ), ( 6, 12 ), ( 7, 10 )
	];
	check_both( 13, &edges, "(U(0)(P(1)(3)(5)(7)(9)(10))(P(2)(4)(8)(11))(J(6)(12)))", 6 );
	let c = util::complement( &util::graph( 13, &edges ) );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(J(0)(P(1)(3)(5)(7)(9)(10))(P(2)(4)(8)(11))(U(6)(12)))" );
		assert_eq!( t.modular_width(), 6 );
	}
}

#[test]
fn test_two_disjoint_p4() {
	let edges = [( 0, 1 ), ( 1, 2 ), ( 2, 3 ), ( 4, 5 ), ( 5, 6 ), ( 6, 7 )];
	check_both( 8, &edges, "(U(P(0)(1)(2)(3))(P(4)(5)(6)(7)))", 4 );

	let g = util::graph( 8, &edges );
	let c = util::complement( &g );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = util::decompose_sorted( &c, solver );
		assert_eq!( t.to_string(), "(J(P(0)(1)(2)(3))(P(4)(5)(6)(7)))" );
		assert_eq!( t.modular_width(), 4 );
	}
}

#[test]
fn test_fully_prime_graphs() {
	check_both( 6, &[( 0, 1 ), ( 1, 2 ), ( 2, 3 ), ( 2, 4 ), ( 4, 5 )], "(P(0)(1)(2)(3)(4)(5))", 6 );
	let c = util::complement( &util::graph( 6, &[( 0, 1 ), ( 1, 2 ), ( 2, 3 ), ( 2, 4 ), ( 4, 5 )] ) );
	for solver in [SolverKind::Naive, SolverKind::Linear] {
		assert_eq!( util::decompose_sorted( &c, solver ).to_string(), "(P(0)(1)(2)(3)(4)(5))" );
	}

	check_both( 6, &[( 1, 5 ), ( 2, 4 ), ( 3, 5 ), ( 3, 4 ), ( 3, 0 ), ( 5, 4 )], "(P(0)(1)(2)(3)(4)(5))", 6 );
}

#[test]
fn test_shallow_substitution_tree() {
	let edges = [
		( 0, 1 ), ( 0, 2 ), ( 0, 3 ), ( 1, 4 ), ( 1, 5 ), ( 1, 6 ), ( 2, 7 ), ( 2, 8 ), ( 2, 9 ),
		( 3, 10 ), ( 3, 11 ), ( 3, 12 ), ( 4, 13 ), ( 4, 14 ), ( 4, 15 ), ( 5, 16 ), ( 5, 17 ), ( 5, 18 ),
		( 6, 19 ), ( 6, 20 ), ( 6, 21 ), ( 7, 22 ), ( 7, 23 ), ( 7, 24 )
	];
	let g = util::graph( 25, &edges );
	let t = util::decompose_sorted( &g, SolverKind::Linear );
	assert_eq!(
		t.to_string(),
		"(P(0)(1)(2)(3)(4)(5)(6)(7)(U(8)(9))(U(10)(11)(12))(U(13)(14)(15))(U(16)(17)(18))(U(19)(20)(21))(U(22)(23)(24)))"
	);
	assert_eq!( t.modular_width(), 14 );
	util::check_property( &g );
}

#[test]
fn test_cube_is_prime() {
	// Q3: vertices are 3-bit words, edges differ in exactly one bit
	let mut edges = vec![];
	for u in 0u32..8 {
		for b in 0..3 {
			let v = u ^ ( 1 << b );
			if u < v {
				edges.push( ( u, v ) );
			}
		}
	}
	check_both( 8, &edges, "(P(0)(1)(2)(3)(4)(5)(6)(7))", 8 );
}

#[test]
fn test_arbitrary_labels() {
	let mut g = AdjGraph::new();
	g.add_vertex( "a" );
	g.add_vertex( "b" );
	g.add_vertex( "c" );
	g.add_vertex( "d" );
	g.add_edges( [( "a", "b" ), ( "b", "c" ), ( "c", "a" ), ( "b", "d" )] ).unwrap();

	for solver in [SolverKind::Naive, SolverKind::Linear] {
		let t = modular_decomposition( &g, solver, true ).unwrap();
		assert_eq!( t.to_string(), "(J(U(J(a)(c))(d))(b))" );
		assert_eq!( t.modular_width(), 0 );
	}
}

#[test]
fn test_fixed_property_graphs() {
	let fixtures : Vec<( u32, Vec<(u32, u32)> )> = vec![
		( 14, vec![
			( 0, 2 ), ( 0, 5 ), ( 1, 2 ), ( 1, 3 ), ( 2, 4 ), ( 3, 5 ), ( 3, 12 ), ( 5, 13 ),
			( 6, 10 ), ( 6, 13 ), ( 7, 8 ), ( 7, 11 ), ( 9, 13 ), ( 11, 13 )
		] ),
		( 9, vec![( 0, 7 ), ( 1, 4 ), ( 2, 4 ), ( 2, 7 ), ( 2, 8 ), ( 4, 5 )] ),
		( 12, vec![( 0, 8 ), ( 1, 6 ), ( 1, 7 ), ( 4, 8 ), ( 5, 7 ), ( 6, 8 ), ( 6, 9 ), ( 8, 9 ), ( 9, 11 )] ),
		( 11, vec![( 0, 5 ), ( 1, 3 ), ( 1, 8 ), ( 3, 8 ), ( 4, 9 ), ( 7, 8 ), ( 8, 9 )] ),
		( 14, vec![
			( 0, 10 ), ( 0, 13 ), ( 1, 3 ), ( 1, 10 ), ( 2, 13 ), ( 3, 9 ), ( 3, 10 ), ( 3, 13 ),
			( 4, 7 ), ( 5, 9 ), ( 5, 10 ), ( 9, 10 ), ( 11, 13 )
		] ),
		( 8, vec![
			( 0, 3 ), ( 0, 7 ), ( 1, 3 ), ( 1, 6 ), ( 2, 3 ), ( 2, 4 ), ( 2, 5 ), ( 3, 4 ),
			( 3, 6 ), ( 3, 7 ), ( 4, 5 ), ( 4, 6 )
		] ),
		( 13, vec![
			( 0, 12 ), ( 1, 2 ), ( 1, 3 ), ( 1, 9 ), ( 3, 4 ), ( 3, 5 ), ( 3, 6 ),
			( 3, 8 ), ( 3, 10 ), ( 3, 11 ), ( 3, 12 ), ( 4, 11 ), ( 5, 10 ), ( 6, 11 ), ( 6, 12 ),
			( 7, 12 ), ( 8, 9 ), ( 8, 12 ), ( 9, 10 ), ( 9, 12 ), ( 10, 11 )
		] ),
		( 14, vec![
			( 0, 1 ), ( 0, 4 ), ( 0, 7 ), ( 0, 8 ), ( 0, 12 ), ( 1, 7 ), ( 1, 9 ), ( 1, 10 ),
			( 1, 11 ), ( 2, 4 ), ( 3, 5 ), ( 3, 6 ), ( 3, 9 ), ( 3, 11 ), ( 3, 13 ), ( 4, 12 ),
			( 5, 12 ), ( 6, 13 ), ( 7, 8 ), ( 8, 12 ), ( 9, 11 ), ( 9, 13 )
		] )
	];

	for ( n, edges ) in fixtures {
		util::check_property( &util::graph( n, &edges ) );
	}
}

#[test]
fn test_repeated_runs_are_deterministic() {
	// there used to be a non-deterministic bug in the reference this is ported from
	let edges = [
		( 0, 1 ), ( 0, 4 ), ( 0, 7 ), ( 0, 8 ), ( 0, 12 ), ( 1, 7 ), ( 1, 9 ), ( 1, 10 ),
		( 1, 11 ), ( 2, 4 ), ( 3, 5 ), ( 3, 6 ), ( 3, 9 ), ( 3, 11 ), ( 3, 13 ), ( 4, 12 ),
		( 5, 12 ), ( 6, 13 ), ( 7, 8 ), ( 8, 12 ), ( 9, 11 ), ( 9, 13 )
	];
	let g = util::graph( 14, &edges );
	let first = util::decompose_sorted( &g, SolverKind::Linear ).to_string();
	for _ in 0..10 {
		assert_eq!( util::decompose_sorted( &g, SolverKind::Linear ).to_string(), first );
		util::check_property( &g );
	}
}
