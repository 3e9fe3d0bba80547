//! Coordinate axes in 3D space.

use cgmath::Vector3;
use float_ord::FloatOrd;

use crate::Float;

/// X, Y, or Z axis.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (toward the viewer).
    Z = 2,
}
impl Axis {
    /// All three axes, in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the index of the axis, which is also the index of its component
    /// in a vector.
    pub const fn index(self) -> usize {
        self as usize
    }
    /// Returns the axis with the given component index.
    pub fn from_index(i: usize) -> Option<Axis> {
        Self::ALL.get(i).copied()
    }
    /// Returns the two axes perpendicular to this one, in right-handed order.
    pub const fn perpendiculars(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::Z, Axis::X],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
    /// Returns a unit vector along the axis.
    pub fn unit_vec3(self) -> Vector3<Float> {
        let mut ret = Vector3::new(0.0, 0.0, 0.0);
        ret[self.index()] = 1.0;
        ret
    }
}

/// Returns the axis along which `v` has the greatest magnitude.
///
/// Exact ties go to the earlier axis.
pub fn dominant_axis(v: Vector3<Float>) -> Axis {
    dominant_index(&[v.x, v.y, v.z])
        .and_then(Axis::from_index)
        .unwrap_or(Axis::X)
}

/// Returns the index of the component with the greatest magnitude, or `None`
/// if `components` is empty.
///
/// Exact ties go to the earlier component.
pub fn dominant_index(components: &[Float]) -> Option<usize> {
    components
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, x)| FloatOrd(x.abs()))
        .map(|(i, _)| i)
}
