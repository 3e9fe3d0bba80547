//! Faces of a cube.

use cgmath::Vector3;

use crate::{Axis, Float, Sign};

/// Face of a cube, which is also the label of every sticker that belongs on
/// that face when the puzzle is solved.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Face {
    /// Left face (-X).
    L,
    /// Right face (+X).
    R,
    /// Down face (-Y).
    D,
    /// Up face (+Y).
    U,
    /// Back face (-Z).
    B,
    /// Front face (+Z).
    F,
}
impl Face {
    /// All six faces, in sticker order.
    pub const ALL: [Face; 6] = [Face::L, Face::R, Face::D, Face::U, Face::B, Face::F];

    /// Returns the face on the given side of an axis.
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        use Face::*;

        match (axis, sign) {
            (Axis::X, Sign::Neg) => L,
            (Axis::X, _) => R,
            (Axis::Y, Sign::Neg) => D,
            (Axis::Y, _) => U,
            (Axis::Z, Sign::Neg) => B,
            (Axis::Z, _) => F,
        }
    }
    /// Returns the face whose outward normal is closest to `v`.
    pub fn nearest(v: Vector3<Float>) -> Self {
        let axis = crate::dominant_axis(v);
        Self::new(axis, Sign::of_float(v[axis.index()]))
    }

    /// Returns the axis perpendicular to the face.
    pub const fn axis(self) -> Axis {
        use Face::*;

        match self {
            R | L => Axis::X,
            U | D => Axis::Y,
            F | B => Axis::Z,
        }
    }
    /// Returns which side of the axis the face is on.
    pub const fn sign(self) -> Sign {
        use Face::*;

        match self {
            R | U | F => Sign::Pos,
            L | D | B => Sign::Neg,
        }
    }
    /// Returns the uppercase notation symbol for the face.
    pub const fn symbol_upper(self) -> char {
        use Face::*;

        match self {
            R => 'R',
            L => 'L',
            U => 'U',
            D => 'D',
            F => 'F',
            B => 'B',
        }
    }
    /// Returns the lowercase notation symbol for the face.
    pub const fn symbol_lower(self) -> char {
        self.symbol_upper().to_ascii_lowercase()
    }
    /// Returns the face with the given notation symbol, ignoring case.
    pub fn from_symbol(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.symbol_upper() == c.to_ascii_uppercase())
    }
    /// Returns the outward unit normal of the face.
    pub fn vector(self) -> Vector3<Float> {
        self.axis().unit_vec3() * self.sign().float()
    }
    /// Returns the outward unit normal of the face as an integer vector.
    pub fn int_vector(self) -> [i32; 3] {
        let mut ret = [0; 3];
        ret[self.axis().index()] = self.sign().int();
        ret
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_face_table() {
        for face in Face::iter() {
            assert_eq!(Face::new(face.axis(), face.sign()), face);
            assert_eq!(Face::nearest(face.vector()), face);
            assert_eq!(Face::new(face.axis(), -face.sign()).vector(), -face.vector());
            assert_eq!(Face::from_symbol(face.symbol_lower()), Some(face));
        }
        assert_eq!(Face::from_symbol('x'), None);
        assert_eq!(Face::F.int_vector(), [0, 0, 1]);
    }
}
