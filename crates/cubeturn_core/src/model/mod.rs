//! Pieces, stickers, layers, and the layer rotation pivot.

use std::fmt;

use cubemath::cgmath::{EuclideanSpace, Matrix3, Matrix4, Quaternion, Rad, Rotation3};
use cubemath::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Move, PivotError, SelectionError, UnsupportedSize};


/// Index of a piece. This is also the index of the grid slot the piece
/// occupies when the puzzle is solved, computed as `x·N² + y·N + z`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u16);
impl PieceId {
    /// Returns the piece ID as an index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece #{}", self.0)
    }
}

/// Sticker on a piece, identified by the face it belongs on when solved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sticker {
    /// Piece that the sticker is attached to.
    pub piece: PieceId,
    /// Face that the sticker belongs on. This never changes.
    pub label: Face,
}

/// Handle to the temporary pivot of an in-progress layer rotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerGroupHandle(u64);

/// Which transform a piece currently moves with.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceOwner {
    /// The piece is at rest in the puzzle.
    #[default]
    Root,
    /// The piece belongs to an in-progress layer rotation.
    Pivot(LayerGroupHandle),
}

/// Piece of the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Current position, in doubled centered grid coordinates (`2g - (N-1)`).
    position: [i32; 3],
    /// Current orientation.
    orientation: Orientation,
    /// Stickers on the piece, in local coordinates.
    stickers: SmallVec<[Face; 3]>,
    owner: PieceOwner,
}
impl Piece {
    /// Returns the current position of the piece, in doubled centered grid
    /// coordinates.
    ///
    /// For example, on a 3×3×3 the corners are at `±2` on every axis, and on a
    /// 2×2×2 they are at `±1`.
    pub fn position(&self) -> [i32; 3] {
        self.position
    }
    /// Returns the current orientation of the piece.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
    /// Returns the labels of the stickers on the piece.
    pub fn stickers(&self) -> &[Face] {
        &self.stickers
    }
    /// Returns which transform the piece currently moves with.
    pub fn owner(&self) -> PieceOwner {
        self.owner
    }
}

/// Set of pieces that share a rounded coordinate along an axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layer {
    /// Axis perpendicular to the layer.
    pub axis: Axis,
    /// Rounded coordinate of the layer along the axis.
    pub coordinate: i32,
    /// Pieces in the layer.
    pub pieces: Vec<PieceId>,
}

/// Layer rotation that has been committed to the puzzle.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerTurn {
    /// Axis of rotation.
    pub axis: Axis,
    /// Rounded coordinate of the layer along the axis.
    pub coordinate: i32,
    /// Number of counterclockwise quarter turns around the positive end of the
    /// axis. This may be zero, in which case the pieces did not move.
    pub quarter_turns: i32,
}
impl LayerTurn {
    /// Returns whether the turn left every piece where it was.
    pub fn is_identity(self) -> bool {
        self.quarter_turns.rem_euclid(4) == 0
    }
    /// Returns the angle of the turn in radians.
    pub fn angle(self) -> Float {
        self.quarter_turns as Float * QUARTER_TURN
    }
}
impl fmt::Display for LayerTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            axis,
            coordinate,
            quarter_turns,
        } = self;
        write!(f, "{axis}[{coordinate}] by {quarter_turns}/4")
    }
}

#[derive(Debug, Clone)]
struct Pivot {
    handle: LayerGroupHandle,
    layer: Layer,
    angle: Float,
}

/// State of an N×N×N puzzle.
#[derive(Debug, Clone)]
pub struct PuzzleModel {
    size: u8,
    pieces: Vec<Piece>,
    /// Rotation of the whole puzzle.
    root_rotation: Quaternion<Float>,
    pivot: Option<Pivot>,
    next_handle: u64,
}

impl PuzzleModel {
    /// Constructs a solved puzzle.
    pub fn new(size: u8) -> Result<Self, UnsupportedSize> {
        crate::check_size(size)?;
        Ok(Self {
            size,
            pieces: Self::solved_pieces(size),
            root_rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            pivot: None,
            next_handle: 0,
        })
    }
    fn solved_pieces(size: u8) -> Vec<Piece> {
        let n = size as i32;
        let mut pieces = Vec::with_capacity((n * n * n) as usize);
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let mut stickers = SmallVec::new();
                    for (g, axis) in [(x, Axis::X), (y, Axis::Y), (z, Axis::Z)] {
                        if g == 0 {
                            stickers.push(Face::new(axis, Sign::Neg));
                        }
                        if g == n - 1 {
                            stickers.push(Face::new(axis, Sign::Pos));
                        }
                    }
                    pieces.push(Piece {
                        position: [x, y, z].map(|g| 2 * g - (n - 1)),
                        orientation: Orientation::IDENTITY,
                        stickers,
                        owner: PieceOwner::Root,
                    });
                }
            }
        }
        pieces
    }
    /// Constructs a puzzle from pieces that have already been placed.
    pub(crate) fn from_parts(size: u8, placements: Vec<([i32; 3], Orientation)>) -> Self {
        let mut ret = Self {
            size,
            pieces: Self::solved_pieces(size),
            root_rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            pivot: None,
            next_handle: 0,
        };
        for (piece, (position, orientation)) in ret.pieces.iter_mut().zip(placements) {
            piece.position = position;
            piece.orientation = orientation;
        }
        ret
    }

    /// Resets the puzzle to its solved state, discarding any in-progress layer
    /// rotation. The rotation of the whole puzzle is kept.
    pub fn reset(&mut self) {
        self.pieces = Self::solved_pieces(self.size);
        self.pivot = None;
    }

    /// Returns the number of layers along each axis.
    pub fn size(&self) -> u8 {
        self.size
    }
    /// Returns the pieces of the puzzle.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
    /// Returns a piece of the puzzle.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }
    /// Returns an iterator over all piece IDs.
    pub fn piece_ids(&self) -> impl Iterator<Item = PieceId> + use<> {
        (0..self.pieces.len() as u16).map(PieceId)
    }
    /// Returns every sticker on the puzzle.
    pub fn stickers(&self) -> impl Iterator<Item = Sticker> + '_ {
        self.piece_ids().flat_map(|piece| {
            self.pieces[piece.index()]
                .stickers
                .iter()
                .map(move |&label| Sticker { piece, label })
        })
    }
    /// Returns the face of the puzzle that a sticker is currently on.
    pub fn sticker_face(&self, sticker: Sticker) -> Option<Face> {
        let piece = self.piece(sticker.piece)?;
        let offset = piece.orientation.transform_int(sticker.label.int_vector());
        let [x, y, z]: [Float; 3] =
            std::array::from_fn(|i| (piece.position[i] + offset[i]) as Float);
        Some(Face::nearest(Vector3::new(x, y, z)))
    }
    /// Returns the sorted sticker labels of every piece, sorted. This is
    /// unchanged by any sequence of moves.
    pub fn sticker_label_multiset(&self) -> Vec<SmallVec<[Face; 3]>> {
        let mut ret: Vec<_> = self.pieces.iter().map(|p| p.stickers.clone()).collect();
        ret.sort();
        ret
    }

    /// Returns the multiplier that maps continuous piece positions to integer
    /// layer coordinates.
    pub fn layer_scalar(&self) -> Float {
        match self.size {
            2 => 6.0,
            4 => 4.0,
            _ => 3.0,
        }
    }
    /// Returns the continuous position of a piece, scaled so that piece
    /// centers are `1/3` apart.
    fn continuous_position(position: [i32; 3]) -> Vector3<Float> {
        let [x, y, z] = position.map(|c| c as Float / 6.0);
        Vector3::new(x, y, z)
    }
    /// Returns the rounded coordinate of a piece along an axis.
    pub fn piece_coordinate(&self, piece: PieceId, axis: Axis) -> Option<i32> {
        let p = Self::continuous_position(self.piece(piece)?.position);
        Some((p[axis.index()] * self.layer_scalar()).round() as i32)
    }
    /// Returns every piece whose rounded coordinate along `axis` equals
    /// `coordinate`.
    pub fn layer_of(&self, axis: Axis, coordinate: i32) -> Result<Layer, SelectionError> {
        let pieces: Vec<PieceId> = self
            .piece_ids()
            .filter(|&id| self.piece_coordinate(id, axis) == Some(coordinate))
            .collect();
        if pieces.is_empty() {
            return Err(SelectionError { axis, coordinate });
        }
        Ok(Layer {
            axis,
            coordinate,
            pieces,
        })
    }
    /// Returns the layer along `axis` that contains `piece`.
    pub fn layer_containing(&self, piece: PieceId, axis: Axis) -> Result<Layer, SelectionError> {
        let coordinate = self.piece_coordinate(piece, axis).ok_or(SelectionError {
            axis,
            coordinate: i32::MIN,
        })?;
        self.layer_of(axis, coordinate)
    }
    /// Returns every valid layer coordinate along an axis, in increasing
    /// order.
    pub fn layer_coordinates(&self, axis: Axis) -> Vec<i32> {
        let mut ret: Vec<i32> = self
            .piece_ids()
            .filter_map(|id| self.piece_coordinate(id, axis))
            .collect();
        ret.sort_unstable();
        ret.dedup();
        ret
    }

    /// Hands every piece in `layer` to a new rotation pivot.
    ///
    /// Either every piece changes owner or none do. Only one pivot may exist
    /// at a time.
    pub fn begin_layer_rotation(&mut self, layer: &Layer) -> Result<LayerGroupHandle, PivotError> {
        if self.pivot.is_some() {
            return Err(PivotError::Busy);
        }
        let selection_error = SelectionError {
            axis: layer.axis,
            coordinate: layer.coordinate,
        };
        if layer.pieces.is_empty() || layer.pieces.iter().any(|&id| self.piece(id).is_none()) {
            return Err(selection_error.into());
        }

        let handle = LayerGroupHandle(self.next_handle);
        self.next_handle += 1;
        for &id in &layer.pieces {
            self.pieces[id.index()].owner = PieceOwner::Pivot(handle);
        }
        log::trace!(
            "began rotating {} pieces in layer {}[{}]",
            layer.pieces.len(),
            layer.axis,
            layer.coordinate,
        );
        self.pivot = Some(Pivot {
            handle,
            layer: layer.clone(),
            angle: 0.0,
        });
        Ok(handle)
    }
    /// Rotates the pivot by `angle` radians around `axis`, which must be a
    /// signed unit vector along the axis of the layer.
    pub fn apply_rotation(
        &mut self,
        handle: LayerGroupHandle,
        axis: Vector3<Float>,
        angle: Float,
    ) -> Result<(), PivotError> {
        let rotation_axis = dominant_axis(axis);
        let sign = Sign::of_float(axis[rotation_axis.index()]);
        let is_unit = approx_eq(axis[rotation_axis.index()].abs(), 1.0);
        let is_aligned = rotation_axis
            .perpendiculars()
            .iter()
            .all(|a| !is_approx_nonzero(axis[a.index()]));
        if !(is_unit && is_aligned) {
            return Err(PivotError::NotAxisAligned);
        }

        let pivot = self.pivot_mut(handle)?;
        if rotation_axis != pivot.layer.axis {
            return Err(PivotError::AxisMismatch {
                layer_axis: pivot.layer.axis,
                rotation_axis,
            });
        }
        pivot.angle += sign.float() * angle;
        Ok(())
    }
    /// Returns the current angle of the pivot around the positive end of the
    /// layer's axis.
    pub fn pivot_angle(&self, handle: LayerGroupHandle) -> Result<Float, PivotError> {
        match &self.pivot {
            Some(pivot) if pivot.handle == handle => Ok(pivot.angle),
            _ => Err(PivotError::StaleHandle),
        }
    }
    /// Returns the handle and layer of the in-progress layer rotation, if
    /// there is one.
    pub fn active_layer_rotation(&self) -> Option<(LayerGroupHandle, &Layer)> {
        self.pivot.as_ref().map(|p| (p.handle, &p.layer))
    }
    fn pivot_mut(&mut self, handle: LayerGroupHandle) -> Result<&mut Pivot, PivotError> {
        self.pivot
            .as_mut()
            .filter(|p| p.handle == handle)
            .ok_or(PivotError::StaleHandle)
    }
    /// Returns the pieces of the pivot to the puzzle, snapping the pivot's
    /// angle to the nearest quarter turn and baking it into each piece.
    pub fn commit_layer_rotation(
        &mut self,
        handle: LayerGroupHandle,
    ) -> Result<LayerTurn, PivotError> {
        self.pivot_mut(handle)?;
        let Some(pivot) = self.pivot.take() else {
            return Err(PivotError::StaleHandle);
        };

        let turn = LayerTurn {
            axis: pivot.layer.axis,
            coordinate: pivot.layer.coordinate,
            quarter_turns: quarter_turns(pivot.angle),
        };
        let rotation = Orientation::quarter_turn(turn.axis, turn.quarter_turns);
        for id in pivot.layer.pieces {
            let piece = &mut self.pieces[id.index()];
            if piece.owner != PieceOwner::Pivot(handle) {
                cubemath::debug_panic!("{id} left the pivot before commit");
            }
            piece.position = rotation.transform_int(piece.position);
            piece.orientation = piece.orientation.then(rotation);
            piece.owner = PieceOwner::Root;
        }
        log::debug!("committed layer turn {turn}");
        Ok(turn)
    }
    /// Returns the pieces of the pivot to the puzzle without moving them.
    pub fn cancel_layer_rotation(&mut self, handle: LayerGroupHandle) -> Result<(), PivotError> {
        self.pivot_mut(handle)?;
        if let Some(pivot) = self.pivot.take() {
            for id in pivot.layer.pieces {
                self.pieces[id.index()].owner = PieceOwner::Root;
            }
        }
        Ok(())
    }

    /// Applies a move immediately, without animation.
    pub fn apply_move(&mut self, mv: &Move) -> Result<LayerTurn, PivotError> {
        let layer = self.layer_of(mv.axis, mv.coordinate)?;
        let handle = self.begin_layer_rotation(&layer)?;
        let result = self.apply_rotation(handle, mv.axis.unit_vec3(), mv.angle);
        match result {
            Ok(()) => self.commit_layer_rotation(handle),
            Err(e) => {
                self.cancel_layer_rotation(handle)?;
                Err(e)
            }
        }
    }
    /// Applies a sequence of moves immediately, without animation.
    pub fn apply_moves<'a>(
        &mut self,
        moves: impl IntoIterator<Item = &'a Move>,
    ) -> Result<(), PivotError> {
        for mv in moves {
            self.apply_move(mv)?;
        }
        Ok(())
    }

    /// Returns the slot index that a piece currently occupies, computed as
    /// `x·N² + y·N + z` from its grid coordinates.
    pub fn slot_of(&self, piece: PieceId) -> Option<usize> {
        let n = self.size as i32;
        let [x, y, z] = self.piece(piece)?.position.map(|c| (c + n - 1) / 2);
        Some((x * n * n + y * n + z) as usize)
    }
    /// Returns the doubled centered grid coordinates of a slot.
    pub(crate) fn slot_position(size: u8, slot: usize) -> [i32; 3] {
        let n = size as usize;
        [slot / (n * n), slot / n % n, slot % n].map(|g| 2 * g as i32 - (n as i32 - 1))
    }

    /// Returns the rotation of the whole puzzle.
    pub fn root_rotation(&self) -> Quaternion<Float> {
        self.root_rotation
    }
    /// Sets the rotation of the whole puzzle.
    pub fn set_root_rotation(&mut self, rotation: Quaternion<Float>) {
        self.root_rotation = rotation.normalize();
    }
    /// Rotates the whole puzzle by `angle` radians around a world-space axis.
    pub fn rotate_root(&mut self, axis: Vector3<Float>, angle: Float) {
        if !is_approx_nonzero(axis.magnitude()) {
            return;
        }
        let delta = Quaternion::from_axis_angle(axis.normalize(), Rad(angle));
        self.set_root_rotation(delta * self.root_rotation);
    }
    /// Snaps the rotation of the whole puzzle to the nearest rotation of the
    /// cube. Returns `false` if the rotation is too far from any of them.
    pub fn snap_root_rotation(&mut self) -> bool {
        match Orientation::from_matrix3_snapped(Matrix3::from(self.root_rotation)) {
            Some(snapped) => {
                self.root_rotation = Quaternion::from(snapped.to_matrix3()).normalize();
                true
            }
            None => false,
        }
    }

    /// Returns the scale factor applied to pieces so that the puzzle fits in
    /// a unit cube.
    pub fn piece_scale(&self) -> Float {
        match self.size {
            2 => 1.25,
            n => 3.0 / n as Float,
        }
    }
    /// Returns the center of a piece in the frame of the puzzle (ignoring the
    /// rotation of the whole puzzle), including any in-progress layer
    /// rotation.
    pub fn piece_center(&self, piece: PieceId) -> Option<Point3<Float>> {
        let p = Self::continuous_position(self.piece(piece)?.position) * self.piece_scale();
        let p = match self.pivot_rotation(piece) {
            Some((axis, angle)) => Matrix3::from_axis_angle(axis.unit_vec3(), Rad(angle)) * p,
            None => p,
        };
        Some(Point3::from_vec(p))
    }
    /// Returns the world transform of a piece: the rotation of the whole
    /// puzzle, then the piece scale, then any in-progress layer rotation, then
    /// the piece's own position and orientation.
    pub fn piece_transform(&self, piece: PieceId) -> Option<Matrix4<Float>> {
        let p = self.piece(piece)?;
        let pivot = match self.pivot_rotation(piece) {
            Some((axis, angle)) => Matrix4::from_axis_angle(axis.unit_vec3(), Rad(angle)),
            None => Matrix4::from_scale(1.0),
        };
        Some(
            Matrix4::from(self.root_rotation)
                * Matrix4::from_scale(self.piece_scale())
                * pivot
                * Matrix4::from_translation(Self::continuous_position(p.position))
                * Matrix4::from(p.orientation.to_matrix3()),
        )
    }
    fn pivot_rotation(&self, piece: PieceId) -> Option<(Axis, Float)> {
        let pivot = self.pivot.as_ref()?;
        (self.piece(piece)?.owner == PieceOwner::Pivot(pivot.handle))
            .then_some((pivot.layer.axis, pivot.angle))
    }
}
