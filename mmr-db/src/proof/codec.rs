// Copyright 2023, 2024 Parity Technologies
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

//! Compact encoding of proof paths and proofs.
//!
//! Each op is a tag byte, `0` for `PushPeak`, `1` for `PushInput` and `2` for
//! `Combine`. `PushPeak` is followed by its position as a little endian base
//! 128 varint. A path is the varint number of ops followed by the ops.
//!
//! Proofs encode their sizes as varints, then their paths, then the varint
//! number of hashes followed by the raw fixed length hashes.

use super::{ConsistencyProof, InclusionProof, Op, Path};
use crate::rstd::{marker::PhantomData, result::Result, vec::Vec};

#[cfg(feature = "std")]
use crate::rstd::fmt;

const TAG_PUSH_PEAK: u8 = 0;
const TAG_PUSH_INPUT: u8 = 1;
const TAG_COMBINE: u8 = 2;

/// Decoding failures. Decoding never panics on malformed input.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DecodeError {
	/// Input ended in the middle of an item.
	Truncated,
	/// Unknown op tag.
	UnknownTag(u8),
	/// Varint longer than needed or not fitting 64 bits.
	OverlongVarInt,
	/// A count does not fit this platform's `usize`.
	CountOverflow,
	/// Bytes left after a complete item.
	TrailingBytes,
}

#[cfg(feature = "std")]
impl fmt::Display for DecodeError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			DecodeError::Truncated => write!(f, "Unexpected end of input"),
			DecodeError::UnknownTag(tag) => write!(f, "Unknown op tag {}", tag),
			DecodeError::OverlongVarInt => write!(f, "Overlong varint"),
			DecodeError::CountOverflow => write!(f, "Item count too large"),
			DecodeError::TrailingBytes => write!(f, "Trailing bytes after encoded item"),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Little endian base 128 unsigned integer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(transparent)]
pub struct VarInt(pub u64);

impl VarInt {
	/// Number of bytes of the encoding.
	pub fn encoded_len(&self) -> usize {
		if self.0 == 0 {
			return 1
		}
		let len = 64 - self.0.leading_zeros() as usize;
		(len + 6) / 7
	}

	/// Append the encoding to `out`.
	pub fn encode_into(&self, out: &mut Vec<u8>) {
		let mut to_encode = self.0;
		for _ in 0..self.encoded_len() - 1 {
			out.push(0b1000_0000 | to_encode as u8);
			to_encode >>= 7;
		}
		out.push(to_encode as u8);
	}

	/// Read a varint, return it with the number of bytes read.
	///
	/// Only the shortest encoding of a value is accepted.
	pub fn decode(encoded: &[u8]) -> Result<(Self, usize), DecodeError> {
		let mut value = 0u64;
		for (i, byte) in encoded.iter().enumerate() {
			let bits = (byte & 0b0111_1111) as u64;
			if i == 9 && bits > 1 {
				return Err(DecodeError::OverlongVarInt)
			}
			value |= bits << (i * 7);
			if byte & 0b1000_0000 == 0 {
				if i > 0 && *byte == 0 {
					return Err(DecodeError::OverlongVarInt)
				}
				return Ok((VarInt(value), i + 1))
			}
			if i == 9 {
				return Err(DecodeError::OverlongVarInt)
			}
		}
		Err(DecodeError::Truncated)
	}
}

fn decode_count(encoded: &[u8]) -> Result<(usize, usize), DecodeError> {
	let (count, read) = VarInt::decode(encoded)?;
	if count.0 > usize::MAX as u64 {
		return Err(DecodeError::CountOverflow)
	}
	Ok((count.0 as usize, read))
}

impl Op {
	/// Number of bytes of the encoding.
	pub fn encoded_len(&self) -> usize {
		match self {
			Op::PushPeak(pos) => 1 + VarInt(*pos).encoded_len(),
			Op::PushInput | Op::Combine => 1,
		}
	}

	/// Append the encoding to `out`.
	pub fn encode_into(&self, out: &mut Vec<u8>) {
		match self {
			Op::PushPeak(pos) => {
				out.push(TAG_PUSH_PEAK);
				VarInt(*pos).encode_into(out);
			},
			Op::PushInput => out.push(TAG_PUSH_INPUT),
			Op::Combine => out.push(TAG_COMBINE),
		}
	}

	/// Read an op, return it with the number of bytes read.
	pub fn decode(encoded: &[u8]) -> Result<(Self, usize), DecodeError> {
		let tag = *encoded.first().ok_or(DecodeError::Truncated)?;
		Ok(match tag {
			TAG_PUSH_PEAK => {
				let (pos, read) = VarInt::decode(&encoded[1..])?;
				(Op::PushPeak(pos.0), 1 + read)
			},
			TAG_PUSH_INPUT => (Op::PushInput, 1),
			TAG_COMBINE => (Op::Combine, 1),
			tag => return Err(DecodeError::UnknownTag(tag)),
		})
	}
}

impl Path {
	/// Number of bytes of the encoding.
	pub fn encoded_len(&self) -> usize {
		VarInt(self.len() as u64).encoded_len() +
			self.iter().map(|op| op.encoded_len()).sum::<usize>()
	}

	/// Append the encoding to `out`.
	pub fn encode_into(&self, out: &mut Vec<u8>) {
		VarInt(self.len() as u64).encode_into(out);
		for op in self.iter() {
			op.encode_into(out);
		}
	}

	/// Encoded path.
	pub fn encode(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.encoded_len());
		self.encode_into(&mut out);
		out
	}

	/// Read a path, return it with the number of bytes read.
	pub fn decode_prefix(encoded: &[u8]) -> Result<(Self, usize), DecodeError> {
		let mut decoder = PathDecoder::new(encoded)?;
		let mut path = Path::new();
		for op in &mut decoder {
			path.push(op?);
		}
		Ok((path, decoder.offset()))
	}

	/// Decode a path occupying all of `encoded`.
	pub fn decode(encoded: &[u8]) -> Result<Self, DecodeError> {
		let (path, read) = Self::decode_prefix(encoded)?;
		if read != encoded.len() {
			return Err(DecodeError::TrailingBytes)
		}
		Ok(path)
	}
}

/// Iterator on the ops of an in memory encoded path.
///
/// Stops after the announced number of ops, or after the first error.
pub struct PathDecoder<B: AsRef<[u8]>> {
	encoded: B,
	offset: usize,
	remaining: usize,
}

impl<B: AsRef<[u8]>> PathDecoder<B> {
	/// Read the op count at the start of `encoded`.
	pub fn new(encoded: B) -> Result<Self, DecodeError> {
		let (remaining, offset) = decode_count(encoded.as_ref())?;
		Ok(PathDecoder { encoded, offset, remaining })
	}

	/// Number of ops not yet read.
	pub fn remaining(&self) -> usize {
		self.remaining
	}

	/// Bytes consumed so far.
	pub fn offset(&self) -> usize {
		self.offset
	}
}

impl<B: AsRef<[u8]>> Iterator for PathDecoder<B> {
	type Item = Result<Op, DecodeError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None
		}
		match Op::decode(&self.encoded.as_ref()[self.offset..]) {
			Ok((op, read)) => {
				self.offset += read;
				self.remaining -= 1;
				Some(Ok(op))
			},
			Err(e) => {
				self.remaining = 0;
				Some(Err(e))
			},
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, Some(self.remaining))
	}
}

fn hash_len<HO: AsRef<[u8]> + Default>() -> usize {
	HO::default().as_ref().len()
}

fn encode_hashes<HO: AsRef<[u8]>>(hashes: &[HO], out: &mut Vec<u8>) {
	VarInt(hashes.len() as u64).encode_into(out);
	for hash in hashes {
		out.extend_from_slice(hash.as_ref());
	}
}

fn decode_hashes<HO>(encoded: &[u8]) -> Result<(Vec<HO>, usize), DecodeError>
where
	HO: AsRef<[u8]> + AsMut<[u8]> + Default,
{
	let (count, mut offset) = decode_count(encoded)?;
	let len = hash_len::<HO>();
	let total = count.checked_mul(len).ok_or(DecodeError::CountOverflow)?;
	if encoded.len() - offset < total {
		return Err(DecodeError::Truncated)
	}
	let mut hashes = Vec::with_capacity(count);
	for _ in 0..count {
		let mut hash = HO::default();
		hash.as_mut().copy_from_slice(&encoded[offset..offset + len]);
		hashes.push(hash);
		offset += len;
	}
	Ok((hashes, offset))
}

fn decode_u64(encoded: &[u8], offset: &mut usize) -> Result<u64, DecodeError> {
	let (value, read) = VarInt::decode(&encoded[*offset..])?;
	*offset += read;
	Ok(value.0)
}

fn decode_path(encoded: &[u8], offset: &mut usize) -> Result<Path, DecodeError> {
	let (path, read) = Path::decode_prefix(&encoded[*offset..])?;
	*offset += read;
	Ok(path)
}

/// Proofs with a compact byte encoding.
pub trait ProofCodec: Sized {
	/// Encoded proof.
	fn encode(&self) -> Vec<u8>;
	/// Decode a proof occupying all of `encoded`.
	fn decode(encoded: &[u8]) -> Result<Self, DecodeError>;
}

impl<HO> ProofCodec for InclusionProof<HO>
where
	HO: AsRef<[u8]> + AsMut<[u8]> + Default,
{
	fn encode(&self) -> Vec<u8> {
		let mut out = Vec::new();
		VarInt(self.pos).encode_into(&mut out);
		VarInt(self.size).encode_into(&mut out);
		self.path.encode_into(&mut out);
		encode_hashes(&self.hashes, &mut out);
		out
	}

	fn decode(encoded: &[u8]) -> Result<Self, DecodeError> {
		let mut offset = 0;
		let pos = decode_u64(encoded, &mut offset)?;
		let size = decode_u64(encoded, &mut offset)?;
		let path = decode_path(encoded, &mut offset)?;
		let (hashes, read) = decode_hashes(&encoded[offset..])?;
		if offset + read != encoded.len() {
			return Err(DecodeError::TrailingBytes)
		}
		Ok(InclusionProof { pos, size, path, hashes })
	}
}

impl<HO> ProofCodec for ConsistencyProof<HO>
where
	HO: AsRef<[u8]> + AsMut<[u8]> + Default,
{
	fn encode(&self) -> Vec<u8> {
		let mut out = Vec::new();
		VarInt(self.old_size).encode_into(&mut out);
		VarInt(self.new_size).encode_into(&mut out);
		self.old_path.encode_into(&mut out);
		self.new_path.encode_into(&mut out);
		encode_hashes(&self.hashes, &mut out);
		out
	}

	fn decode(encoded: &[u8]) -> Result<Self, DecodeError> {
		let mut offset = 0;
		let old_size = decode_u64(encoded, &mut offset)?;
		let new_size = decode_u64(encoded, &mut offset)?;
		let old_path = decode_path(encoded, &mut offset)?;
		let new_path = decode_path(encoded, &mut offset)?;
		let (hashes, read) = decode_hashes(&encoded[offset..])?;
		if offset + read != encoded.len() {
			return Err(DecodeError::TrailingBytes)
		}
		Ok(ConsistencyProof { old_size, new_size, old_path, new_path, hashes })
	}
}

/// Iterator on the fixed length hashes of an in memory buffer, for callers
/// streaming hashes to [`super::SuppliedHashes`].
pub struct HashDecoder<HO, B: AsRef<[u8]>>(B, usize, PhantomData<HO>);

impl<HO, B: AsRef<[u8]>> From<B> for HashDecoder<HO, B> {
	fn from(b: B) -> Self {
		Self(b, 0, PhantomData)
	}
}

impl<HO, B> Iterator for HashDecoder<HO, B>
where
	HO: AsRef<[u8]> + AsMut<[u8]> + Default,
	B: AsRef<[u8]>,
{
	type Item = HO;

	fn next(&mut self) -> Option<HO> {
		let mut hash = HO::default();
		let len = hash.as_ref().len();
		let chunk = self.0.as_ref().get(self.1..self.1 + len)?;
		hash.as_mut().copy_from_slice(chunk);
		self.1 += len;
		Some(hash)
	}
}
