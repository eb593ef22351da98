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

//! Generation of proof paths.

use super::{NodeHashes, Op, Path, PathError};
use crate::{
	peaks::containing_peak,
	peaks_and_heights,
	rstd::{self, vec::Vec},
	Error, Node, Result,
};
use log::debug;

/// Path pushing every peak of a range of `size` nodes.
///
/// Evaluated against the node hashes of the range, it produces the peak hash
/// sequence which stands for the range.
pub fn digest_path(size: u64) -> Path {
	peaks_and_heights(size).iter().map(|peak| Op::PushPeak(peak.pos)).collect()
}

/// Path proving that the node at `pos` belongs to a range of `size` nodes.
///
/// The path pushes the peaks left of the one containing `pos`, descends to
/// `pos` inside that peak pushing the siblings met on the way, and pushes the
/// remaining peaks. It holds exactly one `PushInput`.
pub fn inclusion(pos: u64, size: u64) -> Result<Path> {
	if pos >= size {
		return Err(Error::PositionOutOfRange { pos, size })
	}
	let peaks = peaks_and_heights(size);
	let (index, peak) = containing_peak(&peaks, pos)
		.ok_or(Error::PositionOutOfRange { pos, size })?;

	let mut path = Path::new();
	path.extend(peaks[..index].iter().map(|peak| Op::PushPeak(peak.pos)));
	descend(peak, pos, &mut path)?;
	path.extend(peaks[index + 1..].iter().map(|peak| Op::PushPeak(peak.pos)));

	debug!(target: "mmr", "inclusion of {} in {}: {} ops", pos, size, path.len());
	Ok(path)
}

/// Paths proving that a range of `old_size` nodes is a prefix of a range of
/// `new_size` nodes.
///
/// The first path pushes the old peaks. Evaluating it followed by the second
/// path produces the new peaks. For an empty old range the first path is
/// empty and the second is the digest path of the new range.
pub fn consistency(old_size: u64, new_size: u64) -> Result<(Path, Path)> {
	if old_size > new_size {
		return Err(Error::InvalidRange { from: old_size, to: new_size })
	}
	if old_size == 0 {
		return Ok((Path::new(), digest_path(new_size)))
	}

	let old_path = digest_path(old_size);
	// The last position of a range is always its rightmost peak.
	let last_peak = old_size - 1;
	let peaks = peaks_and_heights(new_size);
	let (index, peak) = containing_peak(&peaks, last_peak)
		.ok_or(Error::InvalidRange { from: old_size, to: new_size })?;

	let mut descent = Path::new();
	descend(peak, last_peak, &mut descent)?;
	// Everything up to the input rebuilds old peaks already on the stack.
	let mut new_path: Path = descent
		.into_ops()
		.into_iter()
		.skip_while(|op| *op != Op::PushInput)
		.skip(1)
		.collect();
	new_path.extend(peaks[index + 1..].iter().map(|peak| Op::PushPeak(peak.pos)));

	debug!(
		target: "mmr",
		"consistency of {} with {}: {} + {} ops",
		old_size,
		new_size,
		old_path.len(),
		new_path.len(),
	);
	Ok((old_path, new_path))
}

/// Hashes for the `PushPeak` instructions of `path`, in order.
pub fn collect_hashes<HO, N>(
	path: &Path,
	source: &mut N,
) -> rstd::result::Result<Vec<HO>, PathError>
where
	N: NodeHashes<HO> + ?Sized,
{
	let mut hashes = Vec::with_capacity(path.len());
	for (index, op) in path.iter().enumerate() {
		if let Op::PushPeak(pos) = *op {
			let hash = source.node_hash(pos).ok_or(PathError::MissingHash { index, pos })?;
			hashes.push(hash);
		}
	}
	Ok(hashes)
}

// Post order descent from `node` to `pos`, which `node` covers.
fn descend(node: Node, pos: u64, path: &mut Path) -> Result<()> {
	if node.pos == pos {
		path.push(Op::PushInput);
		return Ok(())
	}
	let left = node.left_child()?;
	let right = node.right_child()?;
	if pos <= left.pos {
		descend(left, pos, path)?;
		path.push(Op::PushPeak(right.pos));
	} else {
		path.push(Op::PushPeak(left.pos));
		descend(right, pos, path)?;
	}
	path.push(Op::Combine);
	Ok(())
}
