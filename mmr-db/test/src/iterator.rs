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

use mmr_db::{math, Node, PeakState};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use reference_mmr::ReferenceMmr;

#[test]
fn grows_like_reference() {
	let mut reference = ReferenceMmr::default();
	let mut state = PeakState::begin();
	for _ in 0..5_000 {
		let expected = reference.grow();
		assert_eq!(state.advance(), Node::new(expected.pos, expected.height));
		let peaks: Vec<(u64, u32)> = state.peaks().map(|peak| (peak.pos, peak.height)).collect();
		assert_eq!(peaks, reference.peaks());
	}
}

#[test]
fn resumes_anywhere() {
	let mut rng = SmallRng::seed_from_u64(42);
	for _ in 0..200 {
		let size = rng.gen_range(0..1u64 << 50);
		let mut state = PeakState::new(size);
		for step in 0..40 {
			let node = state.advance();
			assert_eq!(node.pos, size + step);
			assert_eq!(node.height, math::height(node.pos));
		}
		assert_eq!(state, PeakState::new(size + 40));
	}
}

#[test]
fn iterates_without_end() {
	let positions: Vec<u64> = PeakState::new(100).map(|node| node.pos).take(3).collect();
	assert_eq!(positions, vec![100, 101, 102]);
}
