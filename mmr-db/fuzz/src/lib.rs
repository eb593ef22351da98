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

use arbitrary::Arbitrary;
use memory_store::MemoryStore;
use mmr_db::{
	consistency, evaluate, inclusion, peak_positions,
	proof::{
		codec::ProofCodec, verify_consistency, verify_inclusion, ConsistencyProof, InclusionProof,
	},
	Mmr, MmrHash, Op, Path,
};
use reference_mmr::{IntHasher, IntLayout, PositionCombine};

/// Op as generated by the fuzzer.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub enum ArbitraryOp {
	PushPeak(u16),
	PushInput,
	Combine,
}

impl From<ArbitraryOp> for Op {
	fn from(op: ArbitraryOp) -> Op {
		match op {
			ArbitraryOp::PushPeak(pos) => Op::PushPeak(pos as u64),
			ArbitraryOp::PushInput => Op::PushInput,
			ArbitraryOp::Combine => Op::Combine,
		}
	}
}

/// Decoding arbitrary bytes never panics, and what decodes re-encodes to the
/// same bytes.
pub fn fuzz_path_decode(input: &[u8]) {
	if let Ok(path) = Path::decode(input) {
		assert_eq!(path.encode(), input);
	}
	let _ = InclusionProof::<[u8; 8]>::decode(input);
	let _ = ConsistencyProof::<[u8; 8]>::decode(input);
}

/// Evaluating an arbitrary program never panics, and the inclusion path of a
/// range reduces to that range's peaks.
///
/// Other programs may reduce to the same peaks; verifiers reject them by
/// comparing against the inclusion path.
pub fn fuzz_evaluate(ops: Vec<ArbitraryOp>, pos: u16, size: u16) {
	let path: Path = ops.into_iter().map(Op::from).collect();
	let (pos, size) = (pos as u64, size as u64);
	let result = evaluate(path.ops(), &mut |p: u64| Some(p), Some(&pos), &PositionCombine);
	if pos < size {
		if let (Ok(peaks), Ok(expected)) = (result, inclusion(pos, size)) {
			if expected == path {
				assert_eq!(peaks, peak_positions(size));
			}
		}
	}
}

/// Proofs generated for arbitrary sizes verify, also after an encoding
/// round trip.
pub fn fuzz_proof_roundtrip(leaves: u8, old_leaves: u8, leaf: u8) {
	let store: MemoryStore<IntHasher> =
		(0..leaves as u64).map(|i| i.to_le_bytes().to_vec()).collect();
	let mmr = match Mmr::<IntLayout, _>::new(store) {
		Ok(mmr) => mmr,
		Err(_) => return,
	};
	let peaks = mmr.peak_hashes();
	if leaves > 0 {
		let pos = mmr_db::math::leaf_position((leaf % leaves) as u64);
		let proof = mmr.prove_inclusion(pos).expect("position below size");
		let decoded = InclusionProof::<MmrHash<IntLayout>>::decode(&proof.encode())
			.expect("encoded proof decodes");
		let input = mmr.node_hash(pos).expect("position below size");
		assert_eq!(verify_inclusion(&decoded, &input, &peaks, mmr.combine()), Ok(()));
	}

	let old_size = mmr_db::math::leaf_position(old_leaves as u64 % (leaves as u64 + 1));
	let old_peaks = match mmr.peak_hashes_at(old_size) {
		Ok(peaks) => peaks,
		Err(_) => return,
	};
	let proof = mmr.prove_consistency(old_size).expect("old size below size");
	let decoded = ConsistencyProof::<MmrHash<IntLayout>>::decode(&proof.encode())
		.expect("encoded proof decodes");
	assert_eq!(verify_consistency(&decoded, &old_peaks, &peaks, mmr.combine()), Ok(()));
	assert!(consistency(old_size, mmr.size()).is_ok());
}
