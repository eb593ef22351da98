// Copyright 2020, 2024 Parity Technologies
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

//! Tests for mmr-db crate.

#[cfg(test)]
mod codec;
#[cfg(test)]
mod inclusion;
#[cfg(test)]
mod iterator;
#[cfg(test)]
mod math;
#[cfg(test)]
mod peaks;

use mmr_db::{Hasher, MmrLayout};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Testing value store type.
pub type MemoryStore<L> = memory_store::MemoryStore<<L as MmrLayout>::Hash>;

/// Testing range type.
pub type TestMmr<L> = mmr_db::Mmr<L, MemoryStore<L>>;

/// Store holding `count` distinct values.
pub fn test_store<L: MmrLayout>(count: u64) -> MemoryStore<L> {
	(0..count).map(|i| format!("value {}", i).into_bytes()).collect()
}

/// Hash of a value as stored by [`test_store`].
pub fn value_hash<L: MmrLayout>(i: u64) -> <L::Hash as Hasher>::Out {
	L::Hash::hash(format!("value {}", i).as_bytes())
}

/// Pairs `(small, large)` of range sizes with `small <= large < limit`.
pub fn random_size_pairs(seed: u64, count: usize, limit: u64) -> Vec<(u64, u64)> {
	let mut rng = SmallRng::seed_from_u64(seed);
	(0..count)
		.map(|_| {
			let large = rng.gen_range(1..limit);
			let small = rng.gen_range(0..=large);
			(small, large)
		})
		.collect()
}
