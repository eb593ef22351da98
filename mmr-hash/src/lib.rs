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

//! Hashing, node combining and value store traits used by Merkle Mountain Ranges.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
use std::fmt::Debug;
#[cfg(feature = "std")]
use std::{hash, marker::PhantomData, vec::Vec};
#[cfg(not(feature = "std"))]
use core::{hash, marker::PhantomData};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "std")]
pub trait MaybeDebug: Debug {}
#[cfg(feature = "std")]
impl<T: Debug> MaybeDebug for T {}
#[cfg(not(feature = "std"))]
pub trait MaybeDebug {}
#[cfg(not(feature = "std"))]
impl<T> MaybeDebug for T {}

/// Trait describing an object that can hash a slice of bytes. Used to abstract
/// other types over the hashing algorithm. Defines a single `hash` method and an
/// `Out` associated type with the necessary bounds.
pub trait Hasher: Sync + Send {
	/// The output type of the `Hasher`
	type Out: AsRef<[u8]> + AsMut<[u8]> + Default + MaybeDebug + PartialEq + Eq
		+ hash::Hash + Send + Sync + Clone + Copy;
	/// What to use to build `HashMap`s with this `Hasher`.
	type StdHasher: Sync + Send + Default + hash::Hasher;
	/// The length in bytes of the `Hasher` output.
	const LENGTH: usize;

	/// Compute the hash of the provided slice of bytes returning the `Out` type of the `Hasher`.
	fn hash(x: &[u8]) -> Self::Out;
}

/// Folds the hashes of two sibling nodes into the hash of their parent.
///
/// The left argument is always the sibling that was created first. Proof
/// evaluation calls this in push order, so any implementation used by a prover
/// must be used unchanged by its verifier.
pub trait Combine<HO> {
	/// Hash of the parent of `left` and `right`.
	fn combine(&self, left: &HO, right: &HO) -> HO;
}

impl<HO, F> Combine<HO> for F
where
	F: Fn(&HO, &HO) -> HO,
{
	fn combine(&self, left: &HO, right: &HO) -> HO {
		self(left, right)
	}
}

/// `Combine` hashing the concatenation of both children with `H`.
pub struct HasherCombine<H>(PhantomData<H>);

impl<H> HasherCombine<H> {
	pub const fn new() -> Self {
		HasherCombine(PhantomData)
	}
}

impl<H> Default for HasherCombine<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H> Clone for HasherCombine<H> {
	fn clone(&self) -> Self {
		Self::new()
	}
}

impl<H> core::fmt::Debug for HasherCombine<H> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		core::write!(f, "HasherCombine")
	}
}

impl<H: Hasher> Combine<H::Out> for HasherCombine<H> {
	fn combine(&self, left: &H::Out, right: &H::Out) -> H::Out {
		let mut buf = Vec::with_capacity(H::LENGTH * 2);
		buf.extend_from_slice(left.as_ref());
		buf.extend_from_slice(right.as_ref());
		H::hash(&buf)
	}
}

/// Append-only sequence of values backing a mountain range.
///
/// Values are indexed by leaf order, starting at zero. The length must never
/// decrease: ranges built over a store do not support deletion.
pub trait ValueStore<H: Hasher> {
	/// Number of values currently stored.
	fn len(&self) -> u64;

	/// Hash of the value at leaf index `index`, or `None` if there is no such
	/// value.
	fn hash_at(&self, index: u64) -> Option<H::Out>;

	/// Check whether the store holds no value.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<'a, H: Hasher, S: ValueStore<H> + ?Sized> ValueStore<H> for &'a S {
	fn len(&self) -> u64 { (**self).len() }
	fn hash_at(&self, index: u64) -> Option<H::Out> { (**self).hash_at(index) }
}

impl<'a, H: Hasher, S: ValueStore<H> + ?Sized> ValueStore<H> for &'a mut S {
	fn len(&self) -> u64 { (**self).len() }
	fn hash_at(&self, index: u64) -> Option<H::Out> { (**self).hash_at(index) }
}

/// Values already reduced to their hashes form a store on their own.
impl<H: Hasher> ValueStore<H> for [H::Out] {
	fn len(&self) -> u64 { <[H::Out]>::len(self) as u64 }
	fn hash_at(&self, index: u64) -> Option<H::Out> {
		self.get(index as usize).copied()
	}
}

impl<H: Hasher> ValueStore<H> for Vec<H::Out> {
	fn len(&self) -> u64 { Vec::len(self) as u64 }
	fn hash_at(&self, index: u64) -> Option<H::Out> {
		self.get(index as usize).copied()
	}
}
