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

use mmr_db::{leaf_count, math::block_size, peak_positions, peaks_and_heights};
use reference_mmr::ReferenceMmr;

fn pairs(size: u64) -> Vec<(u64, u32)> {
	peaks_and_heights(size).iter().map(|peak| (peak.pos, peak.height)).collect()
}

#[test]
fn peaks_match_reference() {
	let mut reference = ReferenceMmr::default();
	for size in 0..3_000u64 {
		assert_eq!(pairs(size), reference.peaks(), "peaks of {}", size);
		assert_eq!(leaf_count(size), reference.leaf_count());
		reference.grow();
	}
}

#[test]
fn large_sizes_partition() {
	for &size in &[583_987u64, (1 << 37) - 499, (1 << 34) - 7, u64::MAX / 3, u64::MAX - 1] {
		let peaks = peaks_and_heights(size);
		let covered: u128 = peaks.iter().map(|peak| block_size(peak.height) as u128).sum();
		assert_eq!(covered, size as u128);
		assert_eq!(peaks.last().map(|peak| peak.pos), Some(size - 1));
		assert_eq!(peak_positions(size).len(), peaks.len());
		assert!(peaks.len() <= 64);
	}
}

#[test]
fn heights_decrease() {
	for size in 1..2_000u64 {
		let heights: Vec<u32> = peaks_and_heights(size).iter().map(|peak| peak.height).collect();
		let n = heights.len();
		for i in 1..n {
			if i == n - 1 {
				assert!(heights[i - 1] >= heights[i]);
			} else {
				assert!(heights[i - 1] > heights[i], "size {}", size);
			}
		}
	}
}
