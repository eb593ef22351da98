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

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use memory_store::MemoryStore;
use mmr_db::{
	consistency, evaluate, inclusion, peaks_and_heights,
	proof::{verify_inclusion_root, InclusionProof},
	Mmr, MmrHash, PeakState,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use reference_mmr::{KeccakHasher, KeccakLayout as Layout, PositionCombine};

criterion_group!(
	benches,
	peaks_of_sizes,
	advance,
	node_at,
	inclusion_paths,
	consistency_paths,
	evaluate_positions,
	build_mmr,
	verify_proofs,
);
criterion_main!(benches);

fn random_sizes(seed: u64, count: usize) -> Vec<u64> {
	let mut rng = SmallRng::seed_from_u64(seed);
	(0..count).map(|_| rng.gen_range(1..1u64 << 48)).collect()
}

fn peaks_of_sizes(c: &mut Criterion) {
	let sizes = random_sizes(1, 1_000);
	c.bench_function("peaks_and_heights", move |b| {
		b.iter(|| {
			for size in sizes.iter() {
				black_box(peaks_and_heights(*size));
			}
		})
	});
}

fn advance(c: &mut Criterion) {
	c.bench_function("peak_state_advance_10k", |b| {
		b.iter(|| {
			let mut state = PeakState::begin();
			for _ in 0..10_000 {
				black_box(state.advance());
			}
		})
	});
}

fn node_at(c: &mut Criterion) {
	let sizes = random_sizes(2, 1_000);
	c.bench_function("node_at", move |b| {
		b.iter(|| {
			for pos in sizes.iter() {
				black_box(mmr_db::Node::at(*pos));
			}
		})
	});
}

fn inclusion_paths(c: &mut Criterion) {
	let sizes = random_sizes(3, 1_000);
	c.bench_function("inclusion", move |b| {
		b.iter(|| {
			for size in sizes.iter() {
				black_box(inclusion(size / 2, *size).unwrap());
			}
		})
	});
}

fn consistency_paths(c: &mut Criterion) {
	let sizes = random_sizes(4, 1_000);
	c.bench_function("consistency", move |b| {
		b.iter(|| {
			for size in sizes.iter() {
				black_box(consistency(size / 3, *size).unwrap());
			}
		})
	});
}

fn evaluate_positions(c: &mut Criterion) {
	let paths: Vec<(u64, mmr_db::Path)> = random_sizes(5, 200)
		.into_iter()
		.map(|size| (size / 2, inclusion(size / 2, size).unwrap()))
		.collect();
	c.bench_function("evaluate_position_combine", move |b| {
		b.iter(|| {
			for (pos, path) in paths.iter() {
				let mut source = |p: u64| Some(p);
				black_box(evaluate(path.ops(), &mut source, Some(pos), &PositionCombine).unwrap());
			}
		})
	});
}

fn store(count: u64) -> MemoryStore<KeccakHasher> {
	(0..count).map(|i| i.to_le_bytes().to_vec()).collect()
}

fn build_mmr(c: &mut Criterion) {
	let values = store(1_000);
	c.bench_function("build_keccak_mmr_1k", move |b| {
		b.iter(|| black_box(Mmr::<Layout, _>::new(&values).unwrap().root()))
	});
}

fn verify_proofs(c: &mut Criterion) {
	let mmr = Mmr::<Layout, _>::new(store(1_000)).unwrap();
	let root = mmr.root();
	let proofs: Vec<(InclusionProof<MmrHash<Layout>>, MmrHash<Layout>)> = (0..mmr.size())
		.step_by(7)
		.map(|pos| (mmr.prove_inclusion(pos).unwrap(), mmr.node_hash(pos).unwrap()))
		.collect();
	c.bench_function("verify_inclusion_root", move |b| {
		b.iter(|| {
			for (proof, input) in proofs.iter() {
				verify_inclusion_root::<KeccakHasher, _>(proof, input, &root, mmr.combine())
					.unwrap();
			}
		})
	});
}
