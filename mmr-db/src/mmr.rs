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

//! Authenticated log over a value store.

use crate::{
	bag_peaks,
	proof::{consistency, inclusion, ConsistencyProof, InclusionProof, NodeHashes, Path},
	peaks_and_heights,
	rstd::{hash::BuildHasherDefault, vec::Vec},
	Combine, Error, Hasher, MmrHash, MmrLayout, PeakState, Result, ValueStore,
};
use hashbrown::HashMap;
use log::{debug, trace};

type Index<L> =
	HashMap<MmrHash<L>, u64, BuildHasherDefault<<<L as MmrLayout>::Hash as Hasher>::StdHasher>>;

/// A Merkle Mountain Range built over the values of a [`ValueStore`].
///
/// Keeps the hash of every node and an index from hash to position. Leaf `i`
/// of the store lands at flat position `math::leaf_position(i)`; the merge
/// nodes each leaf completes follow it.
///
/// The store is only ever appended to: call [`Mmr::extend`] after pushing
/// values to bring the range up to date.
pub struct Mmr<L: MmrLayout, S: ValueStore<L::Hash>> {
	store: S,
	combine: L::Combine,
	state: PeakState,
	leaves: u64,
	hashes: Vec<MmrHash<L>>,
	indexes: Index<L>,
}

impl<L, S> Mmr<L, S>
where
	L: MmrLayout,
	S: ValueStore<L::Hash>,
{
	/// Build a range over the current contents of `store`.
	pub fn new(store: S) -> Result<Self> {
		Self::with_combine(store, L::Combine::default())
	}

	/// Build a range over the current contents of `store`, folding siblings
	/// with `combine`.
	pub fn with_combine(store: S, combine: L::Combine) -> Result<Self> {
		let mut mmr = Mmr {
			store,
			combine,
			state: PeakState::begin(),
			leaves: 0,
			hashes: Vec::new(),
			indexes: Index::<L>::default(),
		};
		mmr.extend()?;
		Ok(mmr)
	}

	/// Add the values appended to the store since the last call.
	///
	/// Returns the number of nodes added. On error the range is left as it
	/// was.
	pub fn extend(&mut self) -> Result<u64> {
		let current = self.store.len();
		if current < self.leaves {
			return Err(Error::StoreShrunk { previous: self.leaves, current })
		}

		let base = self.state.size();
		let mut state = self.state.clone();
		let mut pending: Vec<MmrHash<L>> = Vec::new();
		for index in self.leaves..current {
			let leaf = self.store.hash_at(index).ok_or(Error::MissingValue(index))?;
			let node = state.advance();
			trace!(target: "mmr", "leaf {} at {}", index, node.pos);
			pending.push(leaf);

			while state.next_is_merge() {
				let node = state.advance();
				let left = staged_hash(&self.hashes, &pending, base, node.left_child()?.pos);
				let right = staged_hash(&self.hashes, &pending, base, node.right_child()?.pos);
				let parent = match (left, right) {
					(Some(left), Some(right)) => self.combine.combine(&left, &right),
					_ => return Err(Error::PositionOutOfRange { pos: node.pos, size: base }),
				};
				trace!(target: "mmr", "merge at {}, height {}", node.pos, node.height);
				pending.push(parent);
			}
		}

		let added = pending.len() as u64;
		for (offset, hash) in pending.iter().enumerate() {
			self.indexes.entry(*hash).or_insert(base + offset as u64);
		}
		self.hashes.extend(pending);
		self.state = state;
		self.leaves = current;
		debug!(target: "mmr", "extended by {} nodes to size {}", added, self.state.size());
		Ok(added)
	}

	/// The backing store.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// The backing store, for appending values. Call [`Mmr::extend`] afterwards.
	pub fn store_mut(&mut self) -> &mut S {
		&mut self.store
	}

	/// Sibling folding function in use.
	pub fn combine(&self) -> &L::Combine {
		&self.combine
	}

	/// Number of nodes, leaves and merge nodes together.
	pub fn size(&self) -> u64 {
		self.state.size()
	}

	/// Number of leaves.
	pub fn leaf_count(&self) -> u64 {
		self.leaves
	}

	/// Whether the range has no node.
	pub fn is_empty(&self) -> bool {
		self.hashes.is_empty()
	}

	/// Hash of the node at `pos`.
	pub fn node_hash(&self, pos: u64) -> Option<MmrHash<L>> {
		self.hashes.get(pos as usize).copied()
	}

	/// Position of the first node with the given hash.
	pub fn position_of(&self, hash: &MmrHash<L>) -> Option<u64> {
		self.indexes.get(hash).copied()
	}

	/// Peak hashes of the current range, left to right.
	pub fn peak_hashes(&self) -> Vec<MmrHash<L>> {
		self.state.peak_positions().iter().filter_map(|pos| self.node_hash(*pos)).collect()
	}

	/// Peak hashes of the prefix range of `size` nodes.
	pub fn peak_hashes_at(&self, size: u64) -> Result<Vec<MmrHash<L>>> {
		self.check_size(size)?;
		peaks_and_heights(size)
			.iter()
			.map(|peak| {
				self.node_hash(peak.pos)
					.ok_or(Error::PositionOutOfRange { pos: peak.pos, size: self.size() })
			})
			.collect()
	}

	/// Root of the current range.
	pub fn root(&self) -> MmrHash<L> {
		bag_peaks::<L::Hash, _>(self.size(), &self.peak_hashes(), &self.combine)
	}

	/// Root of the prefix range of `size` nodes.
	pub fn root_at(&self, size: u64) -> Result<MmrHash<L>> {
		let peaks = self.peak_hashes_at(size)?;
		Ok(bag_peaks::<L::Hash, _>(size, &peaks, &self.combine))
	}

	/// Proof that the node at `pos` belongs to the current range.
	pub fn prove_inclusion(&self, pos: u64) -> Result<InclusionProof<MmrHash<L>>> {
		self.prove_inclusion_at(pos, self.size())
	}

	/// Proof that the node at `pos` belongs to the prefix range of `size` nodes.
	pub fn prove_inclusion_at(&self, pos: u64, size: u64) -> Result<InclusionProof<MmrHash<L>>> {
		self.check_size(size)?;
		let path = inclusion(pos, size)?;
		let hashes = self.hashes_for(&path)?;
		debug!(target: "mmr", "inclusion proof of {} in {}: {}", pos, size, path);
		Ok(InclusionProof { pos, size, path, hashes })
	}

	/// Proof that the prefix range of `old_size` nodes is a prefix of the
	/// current range.
	pub fn prove_consistency(&self, old_size: u64) -> Result<ConsistencyProof<MmrHash<L>>> {
		self.prove_consistency_between(old_size, self.size())
	}

	/// Proof that the prefix range of `old_size` nodes is a prefix of the
	/// prefix range of `new_size` nodes.
	pub fn prove_consistency_between(
		&self,
		old_size: u64,
		new_size: u64,
	) -> Result<ConsistencyProof<MmrHash<L>>> {
		self.check_size(new_size)?;
		let (old_path, new_path) = consistency(old_size, new_size)?;
		let hashes = self.hashes_for(&new_path)?;
		debug!(
			target: "mmr",
			"consistency proof of {} with {}: {} hashes",
			old_size,
			new_size,
			hashes.len(),
		);
		Ok(ConsistencyProof { old_size, new_size, old_path, new_path, hashes })
	}

	fn check_size(&self, size: u64) -> Result<()> {
		if size > self.size() {
			return Err(Error::InvalidRange { from: size, to: self.size() })
		}
		Ok(())
	}

	fn hashes_for(&self, path: &Path) -> Result<Vec<MmrHash<L>>> {
		path.peak_positions()
			.map(|pos| {
				self.node_hash(pos).ok_or(Error::PositionOutOfRange { pos, size: self.size() })
			})
			.collect()
	}
}

impl<L, S> NodeHashes<MmrHash<L>> for Mmr<L, S>
where
	L: MmrLayout,
	S: ValueStore<L::Hash>,
{
	fn node_hash(&mut self, pos: u64) -> Option<MmrHash<L>> {
		Mmr::node_hash(self, pos)
	}
}

// Hash at `pos`, committed below `base` or pending from it.
fn staged_hash<HO: Copy>(hashes: &[HO], pending: &[HO], base: u64, pos: u64) -> Option<HO> {
	if pos < base {
		hashes.get(pos as usize).copied()
	} else {
		pending.get((pos - base) as usize).copied()
	}
}
