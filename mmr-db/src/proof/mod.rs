// Copyright 2019, 2024 Parity Technologies
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

//! Generation and verification of proofs for Merkle Mountain Ranges.
//!
//! A proof is a [`Path`]: a program for a small stack machine with three
//! instructions. `PushPeak(pos)` pushes the hash of a node the verifier is
//! given, `PushInput` pushes the hash being proven and `Combine` replaces the
//! two topmost entries by the hash of their parent. Running a path leaves the
//! ordered peak hashes of the range on the stack, which the verifier compares
//! with the peaks (or the bagged root) it trusts.
//!
//! Prover and verifier share the path generators: a verifier regenerates the
//! path for the sizes a proof claims and rejects any other program.
//!
//! Inclusion of position 9 in a range of size 19:
//!
//! ```text
//!            14
//!       6          13
//!    2    5     9      12      17
//!  0  1  3  4  7  8  10  11  15  16  18
//!
//! PushPeak(6) PushInput PushPeak(12) Combine Combine PushPeak(17) PushPeak(18)
//! ```

use crate::rstd::{fmt, iter::FromIterator, slice, vec::Vec};

pub mod codec;
mod generate;
mod verify;

pub use self::generate::{collect_hashes, consistency, digest_path, inclusion};
pub use self::verify::{
	evaluate, verify_consistency, verify_consistency_root, verify_inclusion,
	verify_inclusion_root, Error as VerifyError, PathError,
};

/// Instruction of a proof path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
	/// Push the hash of the node at this position.
	PushPeak(u64),
	/// Push the hash under examination.
	PushInput,
	/// Pop two hashes and push their parent, the first pushed being the left child.
	Combine,
}

impl fmt::Display for Op {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Op::PushPeak(pos) => write!(f, "PushPeak({})", pos),
			Op::PushInput => write!(f, "PushInput"),
			Op::Combine => write!(f, "Combine"),
		}
	}
}

/// A proof program: ordered instructions for the verifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Op>);

impl Path {
	/// Empty path.
	pub fn new() -> Self {
		Path(Vec::new())
	}

	/// Instructions of the path.
	pub fn ops(&self) -> &[Op] {
		&self.0
	}

	/// Number of instructions.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the path has no instruction.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterate over the instructions.
	pub fn iter(&self) -> slice::Iter<'_, Op> {
		self.0.iter()
	}

	/// Append an instruction.
	pub fn push(&mut self, op: Op) {
		self.0.push(op)
	}

	/// Positions referenced by `PushPeak`, in order.
	pub fn peak_positions(&self) -> impl Iterator<Item = u64> + '_ {
		self.0.iter().filter_map(|op| match op {
			Op::PushPeak(pos) => Some(*pos),
			_ => None,
		})
	}

	/// Number of `PushInput` instructions.
	pub fn input_count(&self) -> usize {
		self.0.iter().filter(|op| **op == Op::PushInput).count()
	}

	/// This path followed by `other`.
	pub fn concat(&self, other: &Path) -> Path {
		let mut ops = Vec::with_capacity(self.len() + other.len());
		ops.extend_from_slice(&self.0);
		ops.extend_from_slice(&other.0);
		Path(ops)
	}

	/// Take the instructions back.
	pub fn into_ops(self) -> Vec<Op> {
		self.0
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (i, op) in self.0.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{}:{}", i, op)?;
		}
		Ok(())
	}
}

impl From<Vec<Op>> for Path {
	fn from(ops: Vec<Op>) -> Self {
		Path(ops)
	}
}

impl AsRef<[Op]> for Path {
	fn as_ref(&self) -> &[Op] {
		&self.0
	}
}

impl FromIterator<Op> for Path {
	fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
		Path(iter.into_iter().collect())
	}
}

impl Extend<Op> for Path {
	fn extend<I: IntoIterator<Item = Op>>(&mut self, iter: I) {
		self.0.extend(iter)
	}
}

impl<'a> IntoIterator for &'a Path {
	type Item = &'a Op;
	type IntoIter = slice::Iter<'a, Op>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Source of the node hashes `PushPeak` instructions refer to.
pub trait NodeHashes<HO> {
	/// Hash of the node at `pos`, `None` if unknown.
	fn node_hash(&mut self, pos: u64) -> Option<HO>;
}

impl<HO, F> NodeHashes<HO> for F
where
	F: FnMut(u64) -> Option<HO>,
{
	fn node_hash(&mut self, pos: u64) -> Option<HO> {
		self(pos)
	}
}

/// Hashes handed over with a proof, consumed in `PushPeak` order whatever
/// position is asked for.
pub struct SuppliedHashes<I> {
	hashes: I,
	used: usize,
}

impl<I: Iterator> SuppliedHashes<I> {
	/// Wrap hashes given in `PushPeak` order.
	pub fn new<T: IntoIterator<IntoIter = I>>(hashes: T) -> Self {
		SuppliedHashes { hashes: hashes.into_iter(), used: 0 }
	}

	/// Number of hashes consumed so far.
	pub fn used(&self) -> usize {
		self.used
	}

	/// Whether every supplied hash was consumed.
	pub fn is_exhausted(&mut self) -> bool {
		self.hashes.next().is_none()
	}
}

impl<HO, I: Iterator<Item = HO>> NodeHashes<HO> for SuppliedHashes<I> {
	fn node_hash(&mut self, _pos: u64) -> Option<HO> {
		let hash = self.hashes.next();
		if hash.is_some() {
			self.used += 1;
		}
		hash
	}
}

/// Proof that a node hash is part of a range of a given size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionProof<HO> {
	/// Position of the proven node.
	pub pos: u64,
	/// Size of the range the proof is for.
	pub size: u64,
	/// Proof program.
	pub path: Path,
	/// Hashes for the `PushPeak` instructions of `path`, in order.
	pub hashes: Vec<HO>,
}

/// Proof that a range of `old_size` nodes is a prefix of a range of
/// `new_size` nodes.
///
/// `old_path` pushes the old peaks, which the verifier knows. Running
/// `old_path` then `new_path` produces the new peaks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsistencyProof<HO> {
	/// Size of the prefix range.
	pub old_size: u64,
	/// Size of the extended range.
	pub new_size: u64,
	/// Program pushing the peaks of the prefix range.
	pub old_path: Path,
	/// Program continuing `old_path` up to the peaks of the extended range.
	pub new_path: Path,
	/// Hashes for the `PushPeak` instructions of `new_path`, in order.
	pub hashes: Vec<HO>,
}
