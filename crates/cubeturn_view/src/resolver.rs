//! Choosing a rotation axis from the direction of a drag.

use cgmath::{InnerSpace, Point2, Quaternion, Vector2, Vector3};
use cubemath::axis::dominant_index;
use cubemath::{Axis, Face, Float, Sign, dominant_axis};

use crate::DragPlane;

/// Rotation chosen for a drag on a face of the puzzle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerDragAxis {
    /// Signed unit vector in the frame of the puzzle. Dragging in the
    /// positive direction of the tracked plane coordinate turns the layer
    /// counterclockwise around this vector.
    pub flip_axis: Vector3<Float>,
    /// Axis of the layer to turn.
    pub layer_axis: Axis,
    /// Which plane coordinate (0 for `x`, 1 for `y`) drives the turn.
    pub tracking: usize,
}

/// Rotation chosen for a drag on empty space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PuzzleDragAxis {
    /// Signed unit vector in world space.
    pub flip_axis: Vector3<Float>,
    /// Which plane coordinate (0 for `x`, 1 for `y`) drives the rotation.
    pub tracking: usize,
}

/// Resolves the rotation for a drag on the face `local_normal`.
///
/// `drag_total` is the displacement of the cursor on `plane` since the start
/// of the drag and `root` is the rotation of the whole puzzle.
pub fn resolve_layer_drag(
    plane: &DragPlane,
    root: Quaternion<Float>,
    local_normal: Face,
    drag_total: Vector2<Float>,
) -> LayerDragAxis {
    let drag_axis = dominant_plane_axis(drag_total);

    // Express the drag direction in the frame of the puzzle, rounded to a
    // coordinate axis in the plane of the face.
    let mut local = root.conjugate() * plane.axis(drag_axis);
    local[local_normal.axis().index()] = 0.0;
    let local_direction = signed_unit(local);

    let normal = local_normal.vector();
    let flip_axis = signed_unit(-local_direction.cross(normal));

    // Recover the tracked coordinate from the flip axis, which undoes the
    // cross product above.
    let back = root * flip_axis.cross(normal);
    let tracking = dominant_plane_axis(Vector2::new(back.dot(plane.x), back.dot(plane.y)));

    LayerDragAxis {
        flip_axis,
        layer_axis: dominant_axis(flip_axis),
        tracking,
    }
}

/// Resolves the rotation for a drag on empty space.
///
/// Horizontal drags spin the puzzle around `y`. Vertical drags tumble it
/// around `z` on the right half of the screen and around `-x` on the left
/// half.
pub fn resolve_puzzle_drag(drag_total: Vector2<Float>, cursor: Point2<Float>) -> PuzzleDragAxis {
    let tracking = dominant_plane_axis(drag_total);
    let flip_axis = match tracking {
        0 => Vector3::unit_y(),
        _ if cursor.x > 0.0 => Vector3::unit_z(),
        _ => -Vector3::unit_x(),
    };
    PuzzleDragAxis {
        flip_axis,
        tracking,
    }
}

/// Returns 0 if `v` is mostly horizontal and 1 if it is mostly vertical. Ties
/// go to `x`.
pub fn dominant_plane_axis(v: Vector2<Float>) -> usize {
    dominant_index(&[v.x, v.y]).unwrap_or(0)
}

/// Rounds `v` to the signed unit vector along its dominant axis.
fn signed_unit(v: Vector3<Float>) -> Vector3<Float> {
    let axis = dominant_axis(v);
    axis.unit_vec3() * Sign::of_float(v[axis.index()]).float()
}
