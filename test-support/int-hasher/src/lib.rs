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

//! Eight byte FNV-1a `Hasher`, for tests where speed matters more than
//! collision resistance.

#![cfg_attr(not(feature = "std"), no_std)]

use core::hash;
use mmr_hash::Hasher;

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(state: u64, bytes: &[u8]) -> u64 {
	bytes.iter().fold(state, |acc, byte| (acc ^ *byte as u64).wrapping_mul(PRIME))
}

/// FNV-1a 64 bit hasher, output as little endian bytes.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct IntHasher;

impl Hasher for IntHasher {
	type Out = [u8; 8];

	type StdHasher = IntStdHasher;

	const LENGTH: usize = 8;

	fn hash(x: &[u8]) -> Self::Out {
		fnv1a(OFFSET_BASIS, x).to_le_bytes()
	}
}

/// `std::hash::Hasher` for maps keyed by `IntHasher` outputs.
#[derive(Debug, Clone, Copy)]
pub struct IntStdHasher(u64);

impl Default for IntStdHasher {
	fn default() -> Self {
		IntStdHasher(OFFSET_BASIS)
	}
}

impl hash::Hasher for IntStdHasher {
	fn finish(&self) -> u64 {
		self.0
	}

	fn write(&mut self, bytes: &[u8]) {
		self.0 = fnv1a(self.0, bytes);
	}
}
