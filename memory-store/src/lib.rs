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

//! In-memory value store backing Merkle Mountain Ranges.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

use foldhash::fast::FixedState;
use hashbrown::{hash_map::Entry, HashMap};
use mmr_hash::{Hasher, MaybeDebug, ValueStore};

#[cfg(feature = "std")]
use std::{iter::FromIterator, marker::PhantomData, vec::Vec};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use core::{iter::FromIterator, marker::PhantomData};

/// Append-only in-memory store of values, hashed with `H` on insertion.
///
/// Values keep their insertion order as leaf index. A value stored twice gets
/// two leaf indexes; lookups by hash return the first one.
///
/// # Example
/// ```rust
/// use keccak_hasher::KeccakHasher;
/// use memory_store::MemoryStore;
/// use mmr_hash::{Hasher, ValueStore};
///
/// let mut store = MemoryStore::<KeccakHasher>::default();
/// let d = "Hello world!".as_bytes();
///
/// let index = store.push(d.to_vec());
/// assert_eq!(index, 0);
/// assert_eq!(store.get(index).unwrap(), d);
/// assert_eq!(store.hash_at(index), Some(KeccakHasher::hash(d)));
/// assert_eq!(store.index_of(&KeccakHasher::hash(d)), Some(0));
///
/// store.push(d.to_vec());
/// assert_eq!(ValueStore::<KeccakHasher>::len(&store), 2);
/// assert_eq!(store.index_of(&KeccakHasher::hash(d)), Some(0));
/// ```
pub struct MemoryStore<H: Hasher, T = Vec<u8>> {
	values: Vec<T>,
	hashes: Vec<H::Out>,
	indexes: HashMap<H::Out, u64, FixedState>,
	_hasher: PhantomData<H>,
}

impl<H: Hasher, T> Default for MemoryStore<H, T> {
	fn default() -> Self {
		MemoryStore {
			values: Vec::new(),
			hashes: Vec::new(),
			indexes: HashMap::with_hasher(FixedState::default()),
			_hasher: PhantomData,
		}
	}
}

impl<H: Hasher, T: Clone> Clone for MemoryStore<H, T> {
	fn clone(&self) -> Self {
		Self {
			values: self.values.clone(),
			hashes: self.hashes.clone(),
			indexes: self.indexes.clone(),
			_hasher: PhantomData,
		}
	}
}

impl<H, T> PartialEq<MemoryStore<H, T>> for MemoryStore<H, T>
where
	H: Hasher,
	T: Eq + MaybeDebug,
{
	fn eq(&self, other: &MemoryStore<H, T>) -> bool {
		self.values == other.values
	}
}

impl<H, T> Eq for MemoryStore<H, T>
where
	H: Hasher,
	T: Eq + MaybeDebug,
{
}

impl<H: Hasher, T: AsRef<[u8]>> MemoryStore<H, T> {
	/// Create an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a value, return its leaf index.
	pub fn push(&mut self, value: T) -> u64 {
		let index = self.values.len() as u64;
		let hash = H::hash(value.as_ref());
		if let Entry::Vacant(entry) = self.indexes.entry(hash) {
			entry.insert(index);
		}
		self.hashes.push(hash);
		self.values.push(value);
		index
	}
}

impl<H: Hasher, T> MemoryStore<H, T> {
	/// Value at leaf index `index`.
	pub fn get(&self, index: u64) -> Option<&T> {
		self.values.get(index as usize)
	}

	/// Leaf index of the first value hashing to `hash`.
	pub fn index_of(&self, hash: &H::Out) -> Option<u64> {
		self.indexes.get(hash).copied()
	}

	/// Iterate over values in leaf order.
	pub fn values(&self) -> impl Iterator<Item = &T> {
		self.values.iter()
	}
}

impl<H: Hasher, T> ValueStore<H> for MemoryStore<H, T> {
	fn len(&self) -> u64 {
		self.values.len() as u64
	}

	fn hash_at(&self, index: u64) -> Option<H::Out> {
		self.hashes.get(index as usize).copied()
	}
}

impl<H: Hasher, T: AsRef<[u8]>> FromIterator<T> for MemoryStore<H, T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut store = Self::default();
		store.extend(iter);
		store
	}
}

impl<H: Hasher, T: AsRef<[u8]>> Extend<T> for MemoryStore<H, T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push(value);
		}
	}
}
