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

//! Folding peak hashes into a single root.
//!
//! Proof evaluation stops at the ordered peak hashes. A root commits to
//! those hashes and to the size of the range:
//!
//! ```text
//! bag = combine(peak_0, combine(peak_1, ... combine(peak_k-1, peak_k)))
//! root = combine(H(size as 8 little endian bytes), bag)
//! ```
//!
//! The empty range has root `H(0u64 as 8 little endian bytes)`.

use mmr_hash::{Combine, Hasher};

/// Root of a range of `size` nodes with the given peak hashes.
pub fn bag_peaks<H, C>(size: u64, peaks: &[H::Out], combine: &C) -> H::Out
where
	H: Hasher,
	C: Combine<H::Out>,
{
	let salt = H::hash(&size.to_le_bytes());
	let mut peaks = peaks.iter().rev();
	let bag = match peaks.next() {
		Some(last) => peaks.fold(*last, |acc, peak| combine.combine(peak, &acc)),
		None => return salt,
	};
	combine.combine(&salt, &bag)
}
