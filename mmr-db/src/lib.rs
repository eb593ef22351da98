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
#![cfg_attr(not(feature = "std"), no_std)]

//! Merkle Mountain Range interface and implementation.
//!
//! Every node of the range, leaf or internal, gets a flat position in creation
//! order. Children, parents and peaks are pure functions of positions and
//! sizes, so nothing here stores tree links:
//!
//! ```text
//!            14
//!       6          13
//!    2    5     9      12      17
//!  0  1  3  4  7  8  10  11  15  16  18
//! ```
//!
//! A size 19 range has peaks 14, 17 and 18. Proofs are small stack programs
//! (see [`proof`]) evaluated against those peaks.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
mod rstd {
	pub use std::{error::Error, fmt, hash, iter, marker, result, slice, vec};
}

#[cfg(not(feature = "std"))]
mod rstd {
	pub use alloc::vec;
	pub use core::{fmt, hash, iter, marker, result, slice};
	pub trait Error {}
	impl<T> Error for T {}
}

#[cfg(feature = "std")]
use self::rstd::fmt;

pub mod bagging;
pub mod math;
pub mod mmr;
pub mod node;
pub mod peaks;
pub mod proof;

mod iterator;

pub use self::{
	bagging::bag_peaks,
	iterator::PeakState,
	mmr::Mmr,
	node::{parent_at, Node},
	peaks::{leaf_count, peak_positions, peaks_and_heights, Peaks, MAX_PEAKS},
	proof::{consistency, digest_path, evaluate, inclusion, Op, Path},
};
pub use mmr_hash::{Combine, Hasher, HasherCombine, ValueStore};

/// Precondition violations.
///
/// These are reported for arguments that can never describe a valid request.
/// The same call will fail identically if repeated.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Error {
	/// The position does not exist in a range of the given size.
	PositionOutOfRange {
		/// Requested position.
		pos: u64,
		/// Size of the range, in flat positions.
		size: u64,
	},
	/// A range cannot be shown to extend a larger one.
	InvalidRange {
		/// Size of the range claimed to be a prefix.
		from: u64,
		/// Size of the range claimed to extend it.
		to: u64,
	},
	/// A child was requested from the leaf at this position.
	LeafHasNoChildren(u64),
	/// The backing store lost values: ranges do not support deletion.
	StoreShrunk {
		/// Number of values already built into the range.
		previous: u64,
		/// Number of values now reported by the store.
		current: u64,
	},
	/// The backing store reported a length but had no value at this leaf index.
	MissingValue(u64),
}

#[cfg(feature = "std")]
impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::PositionOutOfRange { pos, size } =>
				write!(f, "Position {} does not exist in a range of size {}", pos, size),
			Error::InvalidRange { from, to } =>
				write!(f, "A range of size {} cannot be a prefix of a range of size {}", from, to),
			Error::LeafHasNoChildren(pos) => write!(f, "Node {} is a leaf and has no children", pos),
			Error::StoreShrunk { previous, current } => write!(
				f,
				"Store length decreased from {} to {}; ranges do not support deletion",
				previous, current,
			),
			Error::MissingValue(index) => write!(f, "Store has no value at leaf index {}", index),
		}
	}
}

#[cfg(feature = "std")]
impl rstd::Error for Error {}

/// Result type of range operations.
pub type Result<T> = crate::rstd::result::Result<T, Error>;

/// Compile time configuration of a range: how values are hashed and how
/// sibling hashes are folded into their parent.
///
/// Only binary ranges are supported. Other branching factors would need their
/// own arithmetic and would be selected through this trait.
pub trait MmrLayout {
	/// Hasher used for values and for salting bagged roots.
	type Hash: Hasher;
	/// Sibling folding function.
	type Combine: mmr_hash::Combine<<Self::Hash as Hasher>::Out> + Default;
}

/// Hash type of a layout.
pub type MmrHash<L> = <<L as MmrLayout>::Hash as Hasher>::Out;

/// Layout combining siblings by hashing their concatenation with `H`.
pub struct HashLayout<H>(rstd::marker::PhantomData<H>);

impl<H: Hasher> MmrLayout for HashLayout<H> {
	type Hash = H;
	type Combine = HasherCombine<H>;
}
