//! Exact rotations restricted to the rotation group of the cube.

use cgmath::Matrix3;

use crate::{Axis, Face, Float, QUARTER_TURN, snap_euler};

/// Rotation of a piece, restricted to the 24 rotations that map the cube onto
/// itself.
///
/// This is stored as a signed permutation matrix so that composing any number
/// of quarter turns never accumulates floating-point drift.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Matrix rows, such that `rows[i][j]` is the entry in row `i` and column
    /// `j`.
    rows: [[i8; 3]; 3],
}
impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
impl Orientation {
    /// Identity rotation.
    pub const IDENTITY: Self = Self {
        rows: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
    };

    /// Returns a rotation by `quarter_turns * π/2` about the positive end of
    /// `axis`, counterclockwise when viewed from that end.
    pub fn quarter_turn(axis: Axis, quarter_turns: i32) -> Self {
        let (c, s) = match quarter_turns.rem_euclid(4) {
            0 => (1, 0),
            1 => (0, 1),
            2 => (-1, 0),
            _ => (0, -1),
        };
        let rows = match axis {
            Axis::X => [[1, 0, 0], [0, c, -s], [0, s, c]],
            Axis::Y => [[c, 0, s], [0, 1, 0], [-s, 0, c]],
            Axis::Z => [[c, -s, 0], [s, c, 0], [0, 0, 1]],
        };
        Self { rows }
    }

    /// Returns the rotation that applies `self` and then `next`.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        let mut rows = [[0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = (0..3).map(|k| next.rows[i][k] * self.rows[k][j]).sum();
            }
        }
        Self { rows }
    }
    /// Returns the inverse rotation.
    #[must_use]
    pub fn inverse(self) -> Self {
        let mut rows = [[0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = self.rows[j][i];
            }
        }
        Self { rows }
    }

    /// Rotates an integer vector.
    pub fn transform_int(self, v: [i32; 3]) -> [i32; 3] {
        self.rows
            .map(|row| (0..3).map(|j| row[j] as i32 * v[j]).sum())
    }
    /// Returns where a face ends up after applying the rotation.
    pub fn transform_face(self, face: Face) -> Face {
        let [x, y, z] = self.transform_int(face.int_vector()).map(|x| x as Float);
        Face::nearest(cgmath::Vector3::new(x, y, z))
    }

    /// Returns the rotation as a floating-point matrix.
    #[rustfmt::skip]
    pub fn to_matrix3(self) -> Matrix3<Float> {
        let m = |i: usize, j: usize| self.rows[i][j] as Float;
        // cgmath matrices are column-major
        Matrix3::new(
            m(0, 0), m(1, 0), m(2, 0),
            m(0, 1), m(1, 1), m(2, 1),
            m(0, 2), m(1, 2), m(2, 2),
        )
    }
    /// Rounds every entry of `m` to the nearest integer and returns the
    /// resulting rotation, or `None` if it is not a proper rotation of the
    /// cube.
    pub fn from_matrix3_snapped(m: Matrix3<Float>) -> Option<Self> {
        let mut rows = [[0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                let x = m[j][i].round();
                if !(-1.0..=1.0).contains(&x) {
                    return None;
                }
                *entry = x as i8;
            }
        }
        let ret = Self { rows };
        (ret.is_signed_permutation() && ret.determinant() == 1).then_some(ret)
    }

    fn is_signed_permutation(self) -> bool {
        let row_ok = |row: [i8; 3]| row.iter().map(|x| x.abs()).sum::<i8>() == 1;
        let cols = self.inverse().rows;
        self.rows.into_iter().all(row_ok) && cols.into_iter().all(row_ok)
    }
    fn determinant(self) -> i32 {
        let r = self.rows.map(|row| row.map(i32::from));
        r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
            - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
            + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0])
    }

    /// Returns Euler angles `[x, y, z]` for the rotation, composed as
    /// `Rx * Ry * Rz`.
    pub fn to_euler(self) -> [Float; 3] {
        let m = self.rows.map(|row| row.map(Float::from));
        let y = m[0][2].clamp(-1.0, 1.0).asin();
        if m[0][2].abs() < 1.0 {
            [(-m[1][2]).atan2(m[2][2]), y, (-m[0][1]).atan2(m[0][0])]
        } else {
            [m[2][1].atan2(m[1][1]), y, 0.0]
        }
    }
    /// Snaps Euler angles `[x, y, z]` (composed as `Rx * Ry * Rz`) to quarter
    /// turns and returns the resulting rotation, or `None` if any component is
    /// not finite.
    pub fn from_euler_snapped(euler: [Float; 3]) -> Option<Self> {
        if !euler.iter().all(|x| x.is_finite()) {
            return None;
        }
        let turns = snap_euler(euler).map(|a| (a / QUARTER_TURN).round() as i32);
        Some(
            Self::quarter_turn(Axis::Z, turns[2])
                .then(Self::quarter_turn(Axis::Y, turns[1]))
                .then(Self::quarter_turn(Axis::X, turns[0])),
        )
    }
}
