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

//! Position and height arithmetic.
//!
//! All functions here work on flat positions only: a node is fully described
//! by its position and height, and its relatives are computed, never looked up.

use crate::{Error, Result};

/// Largest `k` such that `2^k <= x`. `x` must be non zero.
#[inline]
pub fn log2_floor(x: u64) -> u32 {
	debug_assert!(x > 0);
	63 - x.leading_zeros()
}

/// Number of nodes in a perfect tree of the given height (`2^(height+1) - 1`).
#[inline]
pub fn block_size(height: u32) -> u64 {
	(1u64 << height << 1).wrapping_sub(1)
}

/// Height of the node at `pos`, counting from zero at the leaves.
///
/// Starts from the smallest perfect tree covering `pos` and walks down the
/// candidate block sizes, removing every perfect tree that lies fully to the
/// left of `pos`. What remains is the distance of `pos` from the left edge of
/// its own subtree, which is its height.
///
/// Runs in `O(log pos)`.
pub fn height(pos: u64) -> u32 {
	if pos == 0 {
		return 0
	}
	let mut pos = pos;
	let mut peak_size = u64::MAX >> pos.leading_zeros();
	while peak_size != 0 {
		if pos >= peak_size {
			pos -= peak_size;
		}
		peak_size >>= 1;
	}
	pos as u32
}

/// Position of the left child of the node at `pos` with height `height`.
#[inline]
pub fn left_child(pos: u64, height: u32) -> Result<u64> {
	if height == 0 {
		return Err(Error::LeafHasNoChildren(pos))
	}
	Ok(pos - (1u64 << height))
}

/// Position of the right child of the node at `pos` with height `height`.
#[inline]
pub fn right_child(pos: u64, height: u32) -> Result<u64> {
	if height == 0 {
		return Err(Error::LeafHasNoChildren(pos))
	}
	Ok(pos - 1)
}

/// Position of the parent of `pos`, assuming `pos` is a left child of height `height`.
///
/// Saturates at `u64::MAX`, which no range can contain.
#[inline]
pub fn parent_from_left_child(pos: u64, height: u32) -> u64 {
	pos.saturating_add(block_size(height)).saturating_add(1)
}

/// Position of the parent of `pos`, assuming `pos` is a right child.
#[inline]
pub fn parent_from_right_child(pos: u64) -> u64 {
	pos + 1
}

/// Flat position of the leaf with the given leaf index.
///
/// Every leaf `i` is preceded by `i` other leaves and by one internal node for
/// each merge those leaves caused, that is `i - popcount(i)` of them.
#[inline]
pub fn leaf_position(index: u64) -> u64 {
	2 * index - index.count_ones() as u64
}
