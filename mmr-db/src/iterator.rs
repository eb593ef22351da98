// Copyright 2017, 2024 Parity Technologies
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

use crate::{peaks::MAX_PEAKS, peaks_and_heights, Node};
use smallvec::SmallVec;

/// Incrementally maintained peaks of a growing range.
///
/// Each call to [`PeakState::advance`] creates the node at the next flat
/// position: either a new leaf, or the parent of the two rightmost peaks when
/// they have the same height. Leaves and merge nodes share the one position
/// counter.
///
/// As an iterator, `PeakState` yields the same nodes until no position is left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeakState {
	size: u64,
	peaks: SmallVec<[u64; MAX_PEAKS]>,
	heights: SmallVec<[u32; MAX_PEAKS]>,
}

impl PeakState {
	/// State of a range of `size` nodes, in `O(log size)`.
	///
	/// The next call to `advance` returns the node at position `size`.
	pub fn new(size: u64) -> Self {
		let peaks = peaks_and_heights(size);
		PeakState {
			size,
			peaks: peaks.iter().map(|peak| peak.pos).collect(),
			heights: peaks.iter().map(|peak| peak.height).collect(),
		}
	}

	/// State of an empty range.
	pub fn begin() -> Self {
		Self::default()
	}

	/// Number of nodes created so far.
	pub fn size(&self) -> u64 {
		self.size
	}

	/// Positions of the current peaks, left to right.
	pub fn peak_positions(&self) -> &[u64] {
		&self.peaks
	}

	/// Heights of the current peaks, left to right.
	pub fn peak_heights(&self) -> &[u32] {
		&self.heights
	}

	/// Current peaks, left to right.
	pub fn peaks(&self) -> impl Iterator<Item = Node> + '_ {
		self.peaks.iter().zip(self.heights.iter()).map(|(pos, height)| Node::new(*pos, *height))
	}

	/// Whether the next node will merge the two rightmost peaks.
	pub fn next_is_merge(&self) -> bool {
		let np = self.heights.len();
		np >= 2 && self.heights[np - 1] == self.heights[np - 2]
	}

	/// Whether the range already holds `u64::MAX` nodes, the most `u64`
	/// positions can address.
	pub fn is_full(&self) -> bool {
		self.size == u64::MAX
	}

	/// Create the node at the next position and return it.
	///
	/// Amortized `O(1)`.
	///
	/// # Panics
	///
	/// If the state [is full](PeakState::is_full): the last addressable
	/// position is `u64::MAX - 1`.
	pub fn advance(&mut self) -> Node {
		assert!(!self.is_full(), "position {} is not addressable", u64::MAX);
		let height = if self.next_is_merge() {
			let np = self.heights.len();
			let height = self.heights[np - 1] + 1;
			self.peaks.truncate(np - 2);
			self.heights.truncate(np - 2);
			height
		} else {
			0
		};
		let node = Node::new(self.size, height);
		self.peaks.push(node.pos);
		self.heights.push(node.height);
		self.size += 1;
		node
	}
}

impl Iterator for PeakState {
	type Item = Node;

	fn next(&mut self) -> Option<Node> {
		if self.is_full() {
			return None
		}
		Some(self.advance())
	}
}
