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

use crate::{test_store, TestMmr};
use hex_literal::hex;
use mmr_db::{
	consistency, inclusion,
	proof::{
		codec::{DecodeError, PathDecoder, ProofCodec, VarInt},
		verify_inclusion_root, ConsistencyProof, InclusionProof, VerifyError,
	},
	MmrHash, MmrLayout, Op, Path,
};
use reference_mmr::{test_layouts, KeccakLayout};

#[test]
fn fixed_encodings() {
	assert_eq!(inclusion(9, 19).unwrap().encode(), hex!("07000601000c020200110012").to_vec());
	assert_eq!(Path::from(vec![Op::PushPeak(300)]).encode(), hex!("0100ac02").to_vec());
	assert_eq!(Path::new().encode(), vec![0]);
	let mut out = Vec::new();
	VarInt(u64::MAX).encode_into(&mut out);
	assert_eq!(out, hex!("ffffffffffffffffff01").to_vec());
}

#[test]
fn paths_decode_to_themselves() {
	for size in 1..100u64 {
		for pos in 0..size {
			let path = inclusion(pos, size).unwrap();
			assert_eq!(Path::decode(&path.encode()), Ok(path));
		}
		for old_size in 0..=size {
			let (old_path, new_path) = consistency(old_size, size).unwrap();
			let decoded: Result<Vec<Op>, _> = PathDecoder::new(new_path.encode()).unwrap().collect();
			assert_eq!(decoded, Ok(new_path.into_ops()));
			assert_eq!(Path::decode(&old_path.encode()), Ok(old_path));
		}
	}
}

#[test]
fn garbled_paths() {
	let encoded = inclusion(9, 19).unwrap().encode();
	assert_eq!(Path::decode(&encoded[..5]), Err(DecodeError::Truncated));
	let mut garbled = encoded.clone();
	garbled[1] = 7;
	assert_eq!(Path::decode(&garbled), Err(DecodeError::UnknownTag(7)));
	let mut overlong = encoded;
	overlong[0] = 0x87;
	overlong.insert(1, 0x00);
	assert_eq!(Path::decode(&overlong), Err(DecodeError::OverlongVarInt));
}

fn proof_encoding_internal<L: MmrLayout>() {
	let mmr = TestMmr::<L>::new(test_store::<L>(21)).unwrap();
	let root = mmr.root();
	for pos in 0..mmr.size() {
		let proof = mmr.prove_inclusion(pos).unwrap();
		let encoded = proof.encode();
		let decoded = InclusionProof::<MmrHash<L>>::decode(&encoded).unwrap();
		assert_eq!(decoded, proof);
		let input = mmr.node_hash(pos).unwrap();
		assert_eq!(verify_inclusion_root::<L::Hash, _>(&decoded, &input, &root, mmr.combine()), Ok(()));
		assert!(InclusionProof::<MmrHash<L>>::decode(&encoded[..encoded.len() - 1]).is_err());
	}
	for old_size in 0..=mmr.size() {
		let proof = mmr.prove_consistency(old_size).unwrap();
		let decoded = ConsistencyProof::<MmrHash<L>>::decode(&proof.encode()).unwrap();
		assert_eq!(decoded, proof);
	}
}

test_layouts!(proof_encoding, proof_encoding_internal);

#[test]
fn decoded_garbage_never_verifies() {
	let mmr = TestMmr::<KeccakLayout>::new(test_store::<KeccakLayout>(11)).unwrap();
	let proof = mmr.prove_inclusion(9).unwrap();
	let input = mmr.node_hash(9).unwrap();
	let mut encoded = proof.encode();
	// Position 6 pushed first becomes position 5.
	assert_eq!(encoded[4], 6);
	encoded[4] = 5;
	let decoded = InclusionProof::<MmrHash<KeccakLayout>>::decode(&encoded).unwrap();
	assert_eq!(
		verify_inclusion_root::<<KeccakLayout as MmrLayout>::Hash, _>(
			&decoded,
			&input,
			&mmr.root(),
			mmr.combine(),
		),
		Err(VerifyError::UnexpectedPath),
	);
}
