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

use mmr_db::{math, parent_at, Error, Node};
use reference_mmr::ReferenceMmr;

#[test]
fn height_matches_reference() {
	let reference = ReferenceMmr::new(10_000);
	for node in reference.nodes() {
		assert_eq!(math::height(node.pos), node.height, "height of {}", node.pos);
		assert_eq!(Node::at(node.pos), Node::new(node.pos, node.height));
	}
}

#[test]
fn children_match_reference() {
	let reference = ReferenceMmr::new(5_000);
	for node in reference.nodes() {
		let at = Node::at(node.pos);
		match (node.left, node.right) {
			(Some(left), Some(right)) => {
				assert_eq!(at.left_child().map(|n| n.pos), Ok(left));
				assert_eq!(at.right_child().map(|n| n.pos), Ok(right));
				assert!(at.covers(left) && at.covers(right));
			},
			_ => {
				assert_eq!(at.left_child(), Err(Error::LeafHasNoChildren(node.pos)));
				assert_eq!(at.right_child(), Err(Error::LeafHasNoChildren(node.pos)));
			},
		}
	}
}

#[test]
fn parents_match_reference() {
	for &size in &[1u64, 2, 3, 4, 5, 19, 100, 1_000, 4_095] {
		let reference = ReferenceMmr::new(size);
		for node in reference.nodes() {
			let parent = parent_at(node.pos, size).unwrap().map(|parent| parent.pos);
			assert_eq!(parent, node.parent, "parent of {} at size {}", node.pos, size);
		}
		assert_eq!(parent_at(size, size), Err(Error::PositionOutOfRange { pos: size, size }));
	}
}

#[test]
fn leaf_positions_match_reference() {
	let reference = ReferenceMmr::new(3_000);
	for node in reference.nodes() {
		if let Some(index) = node.leaf {
			assert_eq!(math::leaf_position(index), node.pos);
		}
	}
}
