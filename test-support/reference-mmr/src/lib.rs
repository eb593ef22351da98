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

//! Reference Merkle Mountain Range with explicit tree links, and the layouts
//! tests run under.

use mmr_db::{
	math::{block_size, height},
	MmrLayout,
};
use mmr_hash::{Combine, Hasher, HasherCombine};

pub use int_hasher::IntHasher;
pub use keccak_hasher::KeccakHasher;

/// Reference hasher is a keccak hasher.
pub type RefHasher = KeccakHasher;

/// Apply a test method on every test layouts.
#[macro_export]
macro_rules! test_layouts {
	($test:ident, $test_internal:ident) => {
		#[test]
		fn $test() {
			eprintln!("Running with layout `KeccakLayout`");
			$test_internal::<$crate::KeccakLayout>();
			eprintln!("Running with layout `IntLayout`");
			$test_internal::<$crate::IntLayout>();
		}
	};
}

/// Layout hashing with Keccak-256.
#[derive(Default, Clone)]
pub struct KeccakLayout;

impl MmrLayout for KeccakLayout {
	type Hash = KeccakHasher;
	type Combine = HasherCombine<KeccakHasher>;
}

/// Layout hashing with the eight byte `IntHasher`.
#[derive(Default, Clone)]
pub struct IntLayout;

impl MmrLayout for IntLayout {
	type Hash = IntHasher;
	type Combine = HasherCombine<IntHasher>;
}

/// Hashes of `count` distinct leaf values.
pub fn leaf_hashes<H: Hasher>(count: u64) -> Vec<H::Out> {
	(0..count).map(|i| H::hash(&i.to_le_bytes())).collect()
}

/// Value returned by [`PositionCombine`] for nodes that are not siblings.
pub const NOT_SIBLINGS: u64 = u64::MAX;

/// Combine over positions: the "hash" of a node is its position, and two
/// siblings combine into the position of their parent.
///
/// Evaluating a correct path with it yields the peak positions, whatever the
/// size of the range, without hashing anything.
#[derive(Default, Clone, Copy, Debug)]
pub struct PositionCombine;

impl Combine<u64> for PositionCombine {
	fn combine(&self, left: &u64, right: &u64) -> u64 {
		if *left == NOT_SIBLINGS || *right == NOT_SIBLINGS {
			return NOT_SIBLINGS
		}
		let h = height(*left);
		if height(*right) != h || left.checked_add(block_size(h)) != Some(*right) {
			return NOT_SIBLINGS
		}
		right + 1
	}
}

/// A node of the reference range, with its links.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefNode {
	/// Flat position.
	pub pos: u64,
	/// Height, zero for leaves.
	pub height: u32,
	/// Left child position.
	pub left: Option<u64>,
	/// Right child position.
	pub right: Option<u64>,
	/// Parent position, once the parent exists.
	pub parent: Option<u64>,
	/// Leaf index, for leaves.
	pub leaf: Option<u64>,
}

/// Range built one node at a time, storing every link.
#[derive(Default, Clone, Debug)]
pub struct ReferenceMmr {
	nodes: Vec<RefNode>,
	peaks: Vec<u64>,
	leaves: u64,
}

impl ReferenceMmr {
	/// Range of `size` nodes.
	pub fn new(size: u64) -> Self {
		let mut mmr = Self::default();
		for _ in 0..size {
			mmr.grow();
		}
		mmr
	}

	/// Range holding `count` leaves and all their merges.
	pub fn with_leaves(count: u64) -> Self {
		let mut mmr = Self::default();
		while mmr.leaves < count || mmr.merge_pending() {
			mmr.grow();
		}
		mmr
	}

	fn merge_pending(&self) -> bool {
		let n = self.peaks.len();
		n >= 2 && self.nodes[self.peaks[n - 1] as usize].height ==
			self.nodes[self.peaks[n - 2] as usize].height
	}

	/// Append the next node, a merge if two peaks have the same height and a
	/// leaf otherwise.
	pub fn grow(&mut self) -> RefNode {
		let pos = self.nodes.len() as u64;
		let node = if self.merge_pending() {
			let right = self.peaks.pop().expect("merge needs two peaks");
			let left = self.peaks.pop().expect("merge needs two peaks");
			self.nodes[left as usize].parent = Some(pos);
			self.nodes[right as usize].parent = Some(pos);
			RefNode {
				pos,
				height: self.nodes[left as usize].height + 1,
				left: Some(left),
				right: Some(right),
				parent: None,
				leaf: None,
			}
		} else {
			self.leaves += 1;
			RefNode { pos, height: 0, left: None, right: None, parent: None, leaf: Some(self.leaves - 1) }
		};
		self.nodes.push(node);
		self.peaks.push(pos);
		node
	}

	/// Number of nodes.
	pub fn len(&self) -> u64 {
		self.nodes.len() as u64
	}

	/// Whether the range is empty.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Number of leaves.
	pub fn leaf_count(&self) -> u64 {
		self.leaves
	}

	/// Node at `pos`.
	pub fn node(&self, pos: u64) -> Option<&RefNode> {
		self.nodes.get(pos as usize)
	}

	/// Nodes in position order.
	pub fn nodes(&self) -> &[RefNode] {
		&self.nodes
	}

	/// Peaks as `(position, height)`, left to right.
	pub fn peaks(&self) -> Vec<(u64, u32)> {
		self.peaks.iter().map(|pos| (*pos, self.nodes[*pos as usize].height)).collect()
	}

	/// Siblings met walking from `pos` up to its peak, bottom first.
	pub fn siblings(&self, pos: u64) -> Vec<u64> {
		let mut siblings = Vec::new();
		let mut current = self.nodes[pos as usize];
		while let Some(parent) = current.parent {
			let parent = self.nodes[parent as usize];
			let (left, right) = (parent.left.unwrap_or_default(), parent.right.unwrap_or_default());
			siblings.push(if left == current.pos { right } else { left });
			current = parent;
		}
		siblings
	}

	/// Peak whose subtree holds `pos`.
	pub fn peak_of(&self, pos: u64) -> u64 {
		let mut current = self.nodes[pos as usize];
		while let Some(parent) = current.parent {
			current = self.nodes[parent as usize];
		}
		current.pos
	}

	/// Hash of every node, from the hashes of the leaves.
	pub fn hashes<HO: Clone, C: Combine<HO>>(&self, leaves: &[HO], combine: &C) -> Vec<HO> {
		let mut hashes: Vec<HO> = Vec::with_capacity(self.nodes.len());
		for node in self.nodes.iter() {
			let hash = match (node.leaf, node.left, node.right) {
				(Some(leaf), _, _) => leaves[leaf as usize].clone(),
				(None, Some(left), Some(right)) =>
					combine.combine(&hashes[left as usize], &hashes[right as usize]),
				_ => unreachable!("internal nodes have two children"),
			};
			hashes.push(hash);
		}
		hashes
	}

	/// Root of the range from its node hashes, bagging peaks recursively.
	pub fn root<H: Hasher, C: Combine<H::Out>>(&self, hashes: &[H::Out], combine: &C) -> H::Out {
		fn bag<HO: Clone, C: Combine<HO>>(peaks: &[HO], combine: &C) -> HO {
			if peaks.len() == 1 {
				peaks[0].clone()
			} else {
				combine.combine(&peaks[0], &bag(&peaks[1..], combine))
			}
		}
		let salt = H::hash(&self.len().to_le_bytes());
		if self.peaks.is_empty() {
			return salt
		}
		let peaks: Vec<H::Out> = self.peaks.iter().map(|pos| hashes[*pos as usize]).collect();
		combine.combine(&salt, &bag(&peaks, combine))
	}
}
