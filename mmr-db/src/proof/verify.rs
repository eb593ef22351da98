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

//! Evaluation and verification of proof paths.

use super::{
	generate::{consistency, inclusion},
	ConsistencyProof, InclusionProof, NodeHashes, Op, Path, SuppliedHashes,
};
use crate::{bag_peaks, rstd::{result::Result, vec::Vec}};
use mmr_hash::{Combine, Hasher};

#[cfg(feature = "std")]
use crate::rstd::fmt;
#[cfg(feature = "std")]
use rustc_hex::ToHex;

/// Faults of a proof program, independent of any hash value.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum PathError {
	/// `Combine` at this instruction index found fewer than two stack entries.
	StackUnderflow {
		/// Index of the faulty instruction.
		index: usize,
	},
	/// An input was given but the path never pushes it.
	MissingInput,
	/// The input is pushed a second time at this instruction index.
	RepeatedInput {
		/// Index of the faulty instruction.
		index: usize,
	},
	/// The path pushes an input but none was given.
	UnexpectedInput {
		/// Index of the faulty instruction.
		index: usize,
	},
	/// No hash was available for the `PushPeak` at this instruction index.
	MissingHash {
		/// Index of the faulty instruction.
		index: usize,
		/// Position the instruction refers to.
		pos: u64,
	},
	/// Some supplied hashes were left unused.
	ExtraneousHashes,
}

#[cfg(feature = "std")]
impl fmt::Display for PathError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			PathError::StackUnderflow { index } =>
				write!(f, "Stack underflow at instruction {}", index),
			PathError::MissingInput => write!(f, "Path never pushes the input"),
			PathError::RepeatedInput { index } =>
				write!(f, "Input pushed again at instruction {}", index),
			PathError::UnexpectedInput { index } =>
				write!(f, "Input pushed at instruction {} but none was given", index),
			PathError::MissingHash { index, pos } =>
				write!(f, "No hash for position {} at instruction {}", pos, index),
			PathError::ExtraneousHashes => write!(f, "Proof carries unused hashes"),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for PathError {}

/// Errors that may occur during proof verification. `Malformed` and
/// `UnexpectedPath` reject a proof for its shape, the mismatch variants for
/// its hashes.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Error<HO> {
	/// The path could not be evaluated.
	Malformed(PathError),
	/// The path is not the one generated for the sizes the proof claims.
	UnexpectedPath,
	/// The sizes the proof claims are invalid.
	Precondition(crate::Error),
	/// Evaluation did not produce the expected peak hashes.
	DigestMismatch {
		/// Trusted peak hashes.
		expected: Vec<HO>,
		/// Peak hashes produced by the proof.
		computed: Vec<HO>,
	},
	/// The bagged peaks do not match the trusted root. The parameter is the
	/// computed root.
	RootMismatch(HO),
}

impl<HO> From<PathError> for Error<HO> {
	fn from(e: PathError) -> Self {
		Error::Malformed(e)
	}
}

impl<HO> From<crate::Error> for Error<HO> {
	fn from(e: crate::Error) -> Self {
		Error::Precondition(e)
	}
}

#[cfg(feature = "std")]
fn write_hashes<HO: AsRef<[u8]>>(f: &mut fmt::Formatter, hashes: &[HO]) -> fmt::Result {
	write!(f, "[")?;
	for (i, hash) in hashes.iter().enumerate() {
		if i > 0 {
			write!(f, ", ")?;
		}
		write!(f, "0x{}", hash.as_ref().to_hex::<String>())?;
	}
	write!(f, "]")
}

#[cfg(feature = "std")]
impl<HO: AsRef<[u8]>> fmt::Display for Error<HO> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::Malformed(e) => write!(f, "Malformed proof path: {}", e),
			Error::UnexpectedPath => write!(f, "Proof path does not match the claimed sizes"),
			Error::Precondition(e) => write!(f, "Invalid proof sizes: {}", e),
			Error::DigestMismatch { expected, computed } => {
				write!(f, "Peak hashes mismatch: expected=")?;
				write_hashes(f, expected)?;
				write!(f, ", computed=")?;
				write_hashes(f, computed)
			},
			Error::RootMismatch(root) =>
				write!(f, "Computed incorrect root 0x{}", root.as_ref().to_hex::<String>()),
		}
	}
}

#[cfg(feature = "std")]
impl<HO: AsRef<[u8]> + fmt::Debug> std::error::Error for Error<HO> {}

/// Run `path` and return the residual stack, bottom first.
///
/// `hashes` answers the `PushPeak` instructions. With an `input`, the path must
/// push it exactly once; without, it must never push it.
pub fn evaluate<HO, N, C>(
	path: &[Op],
	hashes: &mut N,
	input: Option<&HO>,
	combine: &C,
) -> Result<Vec<HO>, PathError>
where
	HO: Clone,
	N: NodeHashes<HO> + ?Sized,
	C: Combine<HO>,
{
	let mut stack: Vec<HO> = Vec::with_capacity(path.len());
	let mut input_used = false;
	for (index, op) in path.iter().enumerate() {
		match *op {
			Op::PushPeak(pos) => {
				let hash = hashes.node_hash(pos).ok_or(PathError::MissingHash { index, pos })?;
				stack.push(hash);
			},
			Op::PushInput => {
				let input = input.ok_or(PathError::UnexpectedInput { index })?;
				if input_used {
					return Err(PathError::RepeatedInput { index })
				}
				input_used = true;
				stack.push(input.clone());
			},
			Op::Combine => {
				let right = stack.pop();
				let left = stack.pop();
				match (left, right) {
					(Some(left), Some(right)) => stack.push(combine.combine(&left, &right)),
					_ => return Err(PathError::StackUnderflow { index }),
				}
			},
		}
	}
	if input.is_some() && !input_used {
		return Err(PathError::MissingInput)
	}
	Ok(stack)
}

// Run `path` over hashes that must be consumed exactly.
fn evaluate_supplied<HO, I, C>(
	path: &Path,
	hashes: I,
	input: Option<&HO>,
	combine: &C,
) -> Result<Vec<HO>, PathError>
where
	HO: Clone,
	I: Iterator<Item = HO>,
	C: Combine<HO>,
{
	let mut hashes = SuppliedHashes::new(hashes);
	let peaks = evaluate(path.ops(), &mut hashes, input, combine)?;
	if !hashes.is_exhausted() {
		return Err(PathError::ExtraneousHashes)
	}
	Ok(peaks)
}

fn inclusion_peaks<HO, C>(
	proof: &InclusionProof<HO>,
	input: &HO,
	combine: &C,
) -> Result<Vec<HO>, Error<HO>>
where
	HO: Clone,
	C: Combine<HO>,
{
	if inclusion(proof.pos, proof.size)? != proof.path {
		return Err(Error::UnexpectedPath)
	}
	Ok(evaluate_supplied(&proof.path, proof.hashes.iter().cloned(), Some(input), combine)?)
}

fn consistency_peaks<HO, C>(
	proof: &ConsistencyProof<HO>,
	old_peaks: &[HO],
	combine: &C,
) -> Result<Vec<HO>, Error<HO>>
where
	HO: Clone,
	C: Combine<HO>,
{
	let (old_path, new_path) = consistency(proof.old_size, proof.new_size)?;
	if old_path != proof.old_path || new_path != proof.new_path {
		return Err(Error::UnexpectedPath)
	}
	if old_peaks.len() > old_path.len() {
		return Err(Error::Malformed(PathError::ExtraneousHashes))
	}
	if let Some(pos) = old_path.peak_positions().nth(old_peaks.len()) {
		return Err(Error::Malformed(PathError::MissingHash { index: old_peaks.len(), pos }))
	}
	let hashes = old_peaks.iter().cloned().chain(proof.hashes.iter().cloned());
	Ok(evaluate_supplied(&old_path.concat(&new_path), hashes, None, combine)?)
}

fn check_peaks<HO: Clone + PartialEq>(expected: &[HO], computed: Vec<HO>) -> Result<(), Error<HO>> {
	if computed.as_slice() != expected {
		return Err(Error::DigestMismatch { expected: expected.to_vec(), computed })
	}
	Ok(())
}

fn check_root<H: Hasher, C: Combine<H::Out>>(
	size: u64,
	peaks: &[H::Out],
	root: &H::Out,
	combine: &C,
) -> Result<(), Error<H::Out>> {
	let computed = bag_peaks::<H, C>(size, peaks, combine);
	if &computed != root {
		return Err(Error::RootMismatch(computed))
	}
	Ok(())
}

/// Verify that `input` is the hash at `proof.pos` of the range whose peak
/// hashes are `expected_peaks`.
pub fn verify_inclusion<HO, C>(
	proof: &InclusionProof<HO>,
	input: &HO,
	expected_peaks: &[HO],
	combine: &C,
) -> Result<(), Error<HO>>
where
	HO: Clone + PartialEq,
	C: Combine<HO>,
{
	check_peaks(expected_peaks, inclusion_peaks(proof, input, combine)?)
}

/// Verify that `input` is the hash at `proof.pos` of the range with the given
/// bagged root.
pub fn verify_inclusion_root<H, C>(
	proof: &InclusionProof<H::Out>,
	input: &H::Out,
	root: &H::Out,
	combine: &C,
) -> Result<(), Error<H::Out>>
where
	H: Hasher,
	C: Combine<H::Out>,
{
	let peaks = inclusion_peaks(proof, input, combine)?;
	check_root::<H, C>(proof.size, &peaks, root, combine)
}

/// Verify that the range with peak hashes `old_peaks` is a prefix of the range
/// with peak hashes `new_peaks`.
pub fn verify_consistency<HO, C>(
	proof: &ConsistencyProof<HO>,
	old_peaks: &[HO],
	new_peaks: &[HO],
	combine: &C,
) -> Result<(), Error<HO>>
where
	HO: Clone + PartialEq,
	C: Combine<HO>,
{
	check_peaks(new_peaks, consistency_peaks(proof, old_peaks, combine)?)
}

/// Verify that the range with root `old_root` is a prefix of the range with
/// root `new_root`.
///
/// Roots alone do not let the old peaks be recovered: the verifier provides
/// the old peak hashes, which are first checked against `old_root`.
pub fn verify_consistency_root<H, C>(
	proof: &ConsistencyProof<H::Out>,
	old_peaks: &[H::Out],
	old_root: &H::Out,
	new_root: &H::Out,
	combine: &C,
) -> Result<(), Error<H::Out>>
where
	H: Hasher,
	C: Combine<H::Out>,
{
	check_root::<H, C>(proof.old_size, old_peaks, old_root, combine)?;
	let peaks = consistency_peaks(proof, old_peaks, combine)?;
	check_root::<H, C>(proof.new_size, &peaks, new_root, combine)
}
