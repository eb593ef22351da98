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

use crate::random_size_pairs;
use mmr_db::{
	bag_peaks, evaluate, inclusion, peak_positions, proof::verify_inclusion, Error, Hasher,
	MmrHash, MmrLayout, Op,
};
use reference_mmr::{
	leaf_hashes, test_layouts, PositionCombine, ReferenceMmr, NOT_SIBLINGS,
};

fn position_peaks(pos: u64, size: u64) -> Vec<u64> {
	let path = inclusion(pos, size).unwrap();
	assert_eq!(path.input_count(), 1);
	evaluate(path.ops(), &mut |p: u64| Some(p), Some(&pos), &PositionCombine).unwrap()
}

#[test]
fn every_position_of_small_ranges() {
	for size in 1..200u64 {
		let peaks = peak_positions(size);
		for pos in 0..size {
			assert_eq!(position_peaks(pos, size), peaks, "{} in {}", pos, size);
		}
	}
}

#[test]
fn random_large_ranges() {
	for (pos, size) in random_size_pairs(7, 500, 1 << 48) {
		if pos == size {
			continue
		}
		assert_eq!(position_peaks(pos, size), peak_positions(size), "{} in {}", pos, size);
	}
	assert_eq!(position_peaks(0, u64::MAX), vec![u64::MAX - 1]);
}

#[test]
fn pushes_are_siblings_and_other_peaks() {
	for &size in &[19u64, 100, 777] {
		let reference = ReferenceMmr::new(size);
		for pos in 0..size {
			let peak = reference.peak_of(pos);
			let mut expected: Vec<u64> = reference
				.peaks()
				.into_iter()
				.map(|(p, _)| p)
				.filter(|p| *p != peak)
				.chain(reference.siblings(pos))
				.collect();
			expected.sort();
			let mut pushed: Vec<u64> = inclusion(pos, size).unwrap().peak_positions().collect();
			pushed.sort();
			assert_eq!(pushed, expected, "{} in {}", pos, size);
		}
	}
}

#[test]
fn nine_in_nineteen() {
	use Op::*;
	assert_eq!(
		inclusion(9, 19).unwrap().ops(),
		&[PushPeak(6), PushInput, PushPeak(12), Combine, Combine, PushPeak(17), PushPeak(18)],
	);
}

#[test]
fn out_of_range() {
	assert_eq!(inclusion(5, 5), Err(Error::PositionOutOfRange { pos: 5, size: 5 }));
	assert_eq!(inclusion(u64::MAX, 3), Err(Error::PositionOutOfRange { pos: u64::MAX, size: 3 }));
}

#[test]
fn wrong_input_does_not_reduce() {
	let path = inclusion(9, 19).unwrap();
	let peaks = evaluate(path.ops(), &mut |p: u64| Some(p), Some(&10), &PositionCombine).unwrap();
	assert_eq!(peaks, vec![NOT_SIBLINGS, 17, 18]);
}

fn hashed_inclusion_internal<L: MmrLayout>() {
	let combine = L::Combine::default();
	for leaves in 1..40u64 {
		let reference = ReferenceMmr::with_leaves(leaves);
		let hashes = reference.hashes(&leaf_hashes::<L::Hash>(leaves), &combine);
		let peaks: Vec<MmrHash<L>> =
			peak_positions(reference.len()).iter().map(|p| hashes[*p as usize]).collect();
		assert_eq!(
			bag_peaks::<L::Hash, _>(reference.len(), &peaks, &combine),
			reference.root::<L::Hash, _>(&hashes, &combine),
		);
		for pos in 0..reference.len() {
			let path = inclusion(pos, reference.len()).unwrap();
			let mut source = |p: u64| hashes.get(p as usize).copied();
			let evaluated =
				evaluate(path.ops(), &mut source, Some(&hashes[pos as usize]), &combine).unwrap();
			assert_eq!(evaluated, peaks);

			let forged = L::Hash::hash(b"forged");
			let evaluated = evaluate(path.ops(), &mut source, Some(&forged), &combine).unwrap();
			assert_ne!(evaluated, peaks);
		}
	}
}

test_layouts!(hashed_inclusion, hashed_inclusion_internal);

#[test]
fn verify_rejects_other_sizes() {
	use mmr_db::proof::{collect_hashes, InclusionProof, VerifyError};
	let path = inclusion(3, 7).unwrap();
	let hashes = collect_hashes(&path, &mut |p: u64| Some(p)).unwrap();
	let proof = InclusionProof { pos: 3, size: 8, path, hashes };
	assert_eq!(
		verify_inclusion(&proof, &3, &[6, 7], &PositionCombine),
		Err(VerifyError::UnexpectedPath),
	);
}

#[test]
fn equivalent_paths_reduce_but_do_not_verify() {
	use mmr_db::proof::{collect_hashes, InclusionProof, VerifyError};
	use Op::*;
	// Pushes both children of 6 instead of 6 itself.
	let path: mmr_db::Path = vec![
		PushPeak(2), PushPeak(5), Combine, PushInput, PushPeak(12), Combine, Combine,
		PushPeak(17), PushPeak(18),
	]
	.into();
	assert_ne!(path, inclusion(9, 19).unwrap());
	let evaluated = evaluate(path.ops(), &mut |p: u64| Some(p), Some(&9), &PositionCombine);
	assert_eq!(evaluated, Ok(peak_positions(19)));

	let hashes = collect_hashes(&path, &mut |p: u64| Some(p)).unwrap();
	let proof = InclusionProof { pos: 9, size: 19, path, hashes };
	assert_eq!(
		verify_inclusion(&proof, &9, &peak_positions(19), &PositionCombine),
		Err(VerifyError::UnexpectedPath),
	);
}
