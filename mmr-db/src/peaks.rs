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

//! Decomposition of a range size into its peaks.

use crate::rstd::vec::Vec;
use crate::Node;
use smallvec::SmallVec;

/// Inline capacity for peak stacks. A range addressed by `u64` positions never
/// holds more than this many peaks plus one pending merge.
pub const MAX_PEAKS: usize = 64;

/// Peaks of a range, left to right.
pub type Peaks = SmallVec<[Node; MAX_PEAKS]>;

/// Peaks of a range of `size` nodes, left to right.
///
/// The perfect trees rooted at the peaks partition `[0, size)` in order.
/// Heights never increase from left to right, and only the two rightmost
/// peaks may share a height: the next append merges them.
///
/// Runs in `O(log size)`.
pub fn peaks_and_heights(size: u64) -> Peaks {
	let mut peaks = Peaks::new();
	let mut pos = 0u64;
	while pos < size {
		// Largest perfect tree fitting in what is left.
		let remaining = (size - pos) as u128 + 1;
		let peak_height = 127 - remaining.leading_zeros();
		let peak_size = ((1u128 << peak_height) - 1) as u64;
		peaks.push(Node::new(pos + peak_size - 1, peak_height - 1));
		pos += peak_size;
	}
	peaks
}

/// Positions of the peaks of a range of `size` nodes.
pub fn peak_positions(size: u64) -> Vec<u64> {
	peaks_and_heights(size).iter().map(|peak| peak.pos).collect()
}

/// Number of leaves in a range of `size` nodes.
pub fn leaf_count(size: u64) -> u64 {
	peaks_and_heights(size).iter().map(|peak| 1u64 << peak.height).sum()
}

/// Index and node of the peak whose subtree contains `pos`.
pub(crate) fn containing_peak(peaks: &[Node], pos: u64) -> Option<(usize, Node)> {
	peaks.iter().position(|peak| peak.pos >= pos).map(|index| (index, peaks[index]))
}
