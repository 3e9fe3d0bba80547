//! Serializable puzzle state.

use cubemath::{Float, Orientation};
use serde::{Deserialize, Serialize};

use crate::{PieceId, PuzzleModel, SnapshotError};

/// Serializable state of a puzzle.
///
/// Only committed state is recorded. An in-progress layer rotation and the
/// rotation of the whole puzzle are not part of a snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleSnapshot {
    /// Number of layers along each axis.
    pub size: u8,
    /// For each slot `x·N² + y·N + z`, the index of the piece in that slot.
    pub piece_identity: Vec<u16>,
    /// For each slot, the Euler angles `[x, y, z]` of the piece in that slot.
    pub piece_rotation: Vec<[Float; 3]>,
}

impl PuzzleModel {
    /// Exports the committed state of the puzzle.
    pub fn to_snapshot(&self) -> PuzzleSnapshot {
        let slot_count = self.pieces().len();
        let mut piece_identity = vec![0; slot_count];
        let mut piece_rotation = vec![[0.0; 3]; slot_count];
        for id in self.piece_ids() {
            let (Some(slot), Some(piece)) = (self.slot_of(id), self.piece(id)) else {
                continue;
            };
            if slot < slot_count {
                piece_identity[slot] = id.0;
                piece_rotation[slot] = piece.orientation().to_euler();
            }
        }
        PuzzleSnapshot {
            size: self.size(),
            piece_identity,
            piece_rotation,
        }
    }

    /// Imports a puzzle state. Rotations are snapped to the nearest quarter
    /// turns.
    pub fn from_snapshot(snapshot: &PuzzleSnapshot) -> Result<Self, SnapshotError> {
        let size = snapshot.size;
        crate::check_size(size)?;
        let slot_count = (size as usize).pow(3);
        for (field, got) in [
            ("pieceIdentity", snapshot.piece_identity.len()),
            ("pieceRotation", snapshot.piece_rotation.len()),
        ] {
            if got != slot_count {
                return Err(SnapshotError::WrongLength {
                    field,
                    expected: slot_count,
                    got,
                });
            }
        }

        let mut placements = vec![None; slot_count];
        for (slot, (&id, &euler)) in std::iter::zip(&snapshot.piece_identity, &snapshot.piece_rotation)
            .enumerate()
        {
            let orientation = Orientation::from_euler_snapped(euler)
                .ok_or(SnapshotError::InvalidRotation { slot })?;
            let placement = placements
                .get_mut(PieceId(id).index())
                .ok_or(SnapshotError::NotAPermutation)?;
            if placement.is_some() {
                return Err(SnapshotError::NotAPermutation);
            }
            *placement = Some((Self::slot_position(size, slot), orientation));
        }
        let placements = placements
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(SnapshotError::NotAPermutation)?;

        Ok(Self::from_parts(size, placements))
    }
}
