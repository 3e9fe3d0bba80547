//! Sign enum.

use std::ops::Neg;

use crate::Float;

/// Positive, negative, or zero.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Zero.
    #[default]
    Zero = 0,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Zero => Sign::Zero,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Sign {
    /// Returns the sign of an integer.
    pub fn of_int(x: i32) -> Sign {
        match x.signum() {
            -1 => Sign::Neg,
            1 => Sign::Pos,
            _ => Sign::Zero,
        }
    }
    /// Returns the sign of a number, treating values within
    /// [`crate::EPSILON`] of zero as zero.
    pub fn of_float(x: Float) -> Sign {
        if crate::approx_eq(x, 0.0) {
            Sign::Zero
        } else if x < 0.0 {
            Sign::Neg
        } else {
            Sign::Pos
        }
    }

    /// Returns an integer representation of the sign (either -1, 0, or 1).
    pub const fn int(self) -> i32 {
        match self {
            Sign::Neg => -1,
            Sign::Zero => 0,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0, 0.0,
    /// or 1.0).
    pub const fn float(self) -> Float {
        self.int() as Float
    }
}
