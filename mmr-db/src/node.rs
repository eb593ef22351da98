// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Node addressing.

use crate::{math, Error, PeakState, Result};

/// A node of the range: its flat position and its height.
///
/// Parents are deliberately absent: a node gets a parent only once a later
/// sibling is appended, so the parent is a property of a range size, see
/// [`parent_at`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
	/// Flat position.
	pub pos: u64,
	/// Height, zero for leaves.
	pub height: u32,
}

impl Node {
	/// Node at `pos` with the given height. The pair is trusted to be consistent.
	pub const fn new(pos: u64, height: u32) -> Self {
		Node { pos, height }
	}

	/// Node at an arbitrary historical position.
	///
	/// Equivalent to building the peaks of a range of size `pos` and appending
	/// one node. Runs in `O(log pos)`.
	///
	/// # Panics
	///
	/// If `pos` is `u64::MAX`, which no range can address.
	pub fn at(pos: u64) -> Self {
		PeakState::new(pos).advance()
	}

	/// Whether this node is an internal node.
	pub fn has_children(&self) -> bool {
		self.height > 0
	}

	/// Left child, an error for leaves.
	pub fn left_child(&self) -> Result<Node> {
		math::left_child(self.pos, self.height).map(|pos| Node::new(pos, self.height - 1))
	}

	/// Right child, an error for leaves.
	pub fn right_child(&self) -> Result<Node> {
		math::right_child(self.pos, self.height).map(|pos| Node::new(pos, self.height - 1))
	}

	/// First position covered by the subtree rooted at this node.
	pub fn first_position(&self) -> u64 {
		self.pos + 1 - math::block_size(self.height)
	}

	/// Whether `pos` belongs to the subtree rooted at this node.
	pub fn covers(&self, pos: u64) -> bool {
		pos <= self.pos && pos >= self.first_position()
	}
}

/// Parent of the node at `pos` in a range of `size` nodes.
///
/// Returns `None` while `pos` is a peak of that range. The answer may change
/// as the range grows, which is why it is never cached on [`Node`].
pub fn parent_at(pos: u64, size: u64) -> Result<Option<Node>> {
	if pos >= size {
		return Err(Error::PositionOutOfRange { pos, size })
	}
	let height = math::height(pos);
	// A right child is immediately followed by its parent; a left child is
	// followed by the first leaf of its sibling.
	let parent = if math::height(pos + 1) == height + 1 {
		math::parent_from_right_child(pos)
	} else {
		math::parent_from_left_child(pos, height)
	};
	Ok(if parent < size { Some(Node::new(parent, height + 1)) } else { None })
}
