//! Solved state detection.

use std::collections::BTreeMap;

use cubemath::Face;
use itertools::Itertools;

use crate::PuzzleModel;

/// Groups the labels of every sticker by the face of the puzzle that the
/// sticker is currently on.
pub fn sticker_buckets(model: &PuzzleModel) -> BTreeMap<Face, Vec<Face>> {
    let mut buckets: BTreeMap<Face, Vec<Face>> = BTreeMap::new();
    for sticker in model.stickers() {
        if let Some(face) = model.sticker_face(sticker) {
            buckets.entry(face).or_default().push(sticker.label);
        }
    }
    buckets
}

/// Returns whether every face of the puzzle shows a single label.
pub fn is_solved(model: &PuzzleModel) -> bool {
    sticker_buckets(model)
        .values()
        .all(|labels| labels.iter().all_equal())
}

impl PuzzleModel {
    /// Returns whether every face of the puzzle shows a single label.
    pub fn is_solved(&self) -> bool {
        is_solved(self)
    }
}
