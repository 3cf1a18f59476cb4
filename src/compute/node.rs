//! Payload of the compute forest used by the linear-time solver.
//!
//! Every node is a vertex leaf, an operation node, or a recursion frame (problem). On top of the
//! discriminant, each node carries scratch state written by the refinement, promotion and
//! assembly stages and cleared when the enclosing problem resolves.

use crate::Operation;


/// The discriminant of a compute node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ComputeKind {
	/// A leaf representing a graph vertex.
	Vertex( u32 ),

	/// An internal node of the (partial) decomposition tree.
	Operation( Operation ),

	/// A recursion frame.
	Problem {
		/// Whether the content of this subproblem is known to be connected to an earlier layer.
		connected : bool,
		/// The pivot this problem was split around, once chosen.
		pivot : Option<u32>,
		/// Whether the driver has started working on this problem.
		active : bool
	}
}

/// Directional tag placed during refinement to guide promotion.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum SplitDirection {
	None,
	Left,
	Right,
	Mixed
}


/// A node of the compute forest: a tagged kind plus per-stage scratch state.
#[derive(Clone, Debug)]
pub(crate) struct ComputeNode {
	pub(crate) kind : ComputeKind,

	// Scratch state; cleared between problems. A value of -1 means unassigned.
	pub(crate) comp_number : i32,
	pub(crate) tree_number : i32,
	pub(crate) num_marks : usize,
	pub(crate) split_type : SplitDirection,
	pub(crate) num_left_split_children : usize,
	pub(crate) num_right_split_children : usize
}

impl ComputeNode {
	fn new( kind : ComputeKind ) -> ComputeNode {
		ComputeNode {
			kind,
			comp_number : -1,
			tree_number : -1,
			num_marks : 0,
			split_type : SplitDirection::None,
			num_left_split_children : 0,
			num_right_split_children : 0
		}
	}

	pub(crate) fn new_vertex( v : u32 ) -> ComputeNode {
		ComputeNode::new( ComputeKind::Vertex( v ) )
	}

	pub(crate) fn new_operation( op : Operation ) -> ComputeNode {
		ComputeNode::new( ComputeKind::Operation( op ) )
	}

	pub(crate) fn new_problem( connected : bool ) -> ComputeNode {
		ComputeNode::new( ComputeKind::Problem{ connected, pivot : None, active : false } )
	}

	/// A copy carrying the kind, numbering and split mark, but fresh mark counters.
	pub(crate) fn copied( &self ) -> ComputeNode {
		ComputeNode {
			kind : self.kind,
			comp_number : self.comp_number,
			tree_number : self.tree_number,
			num_marks : 0,
			split_type : self.split_type,
			num_left_split_children : 0,
			num_right_split_children : 0
		}
	}

	pub(crate) fn is_vertex( &self ) -> bool {
		matches!( self.kind, ComputeKind::Vertex( _ ) )
	}

	pub(crate) fn is_operation( &self ) -> bool {
		matches!( self.kind, ComputeKind::Operation( _ ) )
	}

	pub(crate) fn is_problem( &self ) -> bool {
		matches!( self.kind, ComputeKind::Problem{ .. } )
	}

	/// The vertex of a leaf, or the pivot of a problem.
	pub(crate) fn vertex( &self ) -> Option<u32> {
		match self.kind {
			ComputeKind::Vertex( v ) => Some( v ),
			ComputeKind::Operation( _ ) => None,
			ComputeKind::Problem{ pivot, .. } => pivot
		}
	}

	/// The operation label; non-operation nodes read as [Operation::Prime].
	pub(crate) fn op_type( &self ) -> Operation {
		match self.kind {
			ComputeKind::Operation( op ) => op,
			_ => Operation::Prime
		}
	}

	pub(crate) fn set_op_type( &mut self, op : Operation ) {
		debug_assert!( self.is_operation() );
		self.kind = ComputeKind::Operation( op );
	}

	pub(crate) fn is_connected( &self ) -> bool {
		match self.kind {
			ComputeKind::Problem{ connected, .. } => connected,
			_ => false
		}
	}

	pub(crate) fn set_connected( &mut self, value : bool ) {
		match &mut self.kind {
			ComputeKind::Problem{ connected, .. } => *connected = value,
			_ => panic!( "not a problem node" )
		}
	}

	pub(crate) fn is_active( &self ) -> bool {
		match self.kind {
			ComputeKind::Problem{ active, .. } => active,
			_ => false
		}
	}

	pub(crate) fn set_active( &mut self, value : bool ) {
		match &mut self.kind {
			ComputeKind::Problem{ active, .. } => *active = value,
			_ => panic!( "not a problem node" )
		}
	}

	pub(crate) fn set_pivot( &mut self, value : Option<u32> ) {
		match &mut self.kind {
			ComputeKind::Problem{ pivot, .. } => *pivot = value,
			_ => panic!( "not a problem node" )
		}
	}

	pub(crate) fn add_mark( &mut self ) {
		self.num_marks += 1;
	}

	pub(crate) fn clear_marks( &mut self ) {
		self.num_marks = 0;
	}

	/// Whether this node carries `split` (a MIXED mark carries both directions).
	pub(crate) fn is_split_marked( &self, split : SplitDirection ) -> bool {
		self.split_type == split || self.split_type == SplitDirection::Mixed
	}

	/// Adds `split` to this node's mark: NONE becomes `split`, the opposite direction becomes
	/// MIXED.
	pub(crate) fn set_split_mark( &mut self, split : SplitDirection ) {
		debug_assert!( split == SplitDirection::Left || split == SplitDirection::Right );

		if self.split_type == split {
			// already set
		}
		else if self.split_type == SplitDirection::None {
			self.split_type = split;
		}
		else {
			self.split_type = SplitDirection::Mixed;
		}
	}

	pub(crate) fn increment_num_split_children( &mut self, split : SplitDirection ) {
		debug_assert!( split == SplitDirection::Left || split == SplitDirection::Right );

		if split == SplitDirection::Left {
			self.num_left_split_children += 1;
		}
		else {
			self.num_right_split_children += 1;
		}
	}

	pub(crate) fn decrement_num_split_children( &mut self, split : SplitDirection ) {
		debug_assert!( split == SplitDirection::Left || split == SplitDirection::Right );

		if split == SplitDirection::Left {
			self.num_left_split_children -= 1;
		}
		else {
			self.num_right_split_children -= 1;
		}
	}

	pub(crate) fn num_split_children( &self, split : SplitDirection ) -> usize {
		debug_assert!( split == SplitDirection::Left || split == SplitDirection::Right );

		if split == SplitDirection::Left { self.num_left_split_children } else { self.num_right_split_children }
	}

	pub(crate) fn clear_num_split_children( &mut self ) {
		self.num_left_split_children = 0;
		self.num_right_split_children = 0;
	}

	/// Resets the scratch state written by the stages (the mark counter is managed separately by
	/// the maximal-subtree search).
	pub(crate) fn clear( &mut self ) {
		self.comp_number = -1;
		self.tree_number = -1;
		self.split_type = SplitDirection::None;
		self.clear_num_split_children();
	}

	/// Rendering without the split mark: the vertex, the operation letter, or `C<pivot>`.
	pub(crate) fn symbol( &self ) -> String {
		match &self.kind {
			ComputeKind::Vertex( v ) => format!( "{v}" ),
			ComputeKind::Operation( op ) => format!( "{op}" ),
			ComputeKind::Problem{ pivot, .. } => match pivot {
				Some( p ) => format!( "C{p}" ),
				None => "C-".to_string()
			}
		}
	}

	/// Rendering with the split mark appended to vertex and operation nodes. Test aid.
	#[cfg(test)]
	pub(crate) fn marked_symbol( &self ) -> String {
		let mark = match self.split_type {
			SplitDirection::None => "-",
			SplitDirection::Left => "<",
			SplitDirection::Right => ">",
			SplitDirection::Mixed => "+"
		};
		if self.is_problem() {
			self.symbol()
		}
		else {
			format!( "{}{}", self.symbol(), mark )
		}
	}
}

impl std::fmt::Display for ComputeNode {
	fn fmt( &self, f : &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		write!( f, "{}", self.symbol() )
	}
}
