//! Vector, axis, and orientation primitives for cube puzzles.

pub use {approx, cgmath, log, num_traits as num};

/// Floating-point type used for geometry.
pub type Float = f64;

/// Small floating-point value used for comparisons and tiny offsets.
pub const EPSILON: Float = 0.000001;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

/// Panics in debug mode. Logs an error in release mode.
#[macro_export]
macro_rules! debug_panic {
    ($($tok:tt)*) => {
        match cfg!(debug_assertions) {
            true => panic!($($tok)*),
            false => $crate::log::error!($($tok)*),
        }
    };
}

pub mod angle;
pub mod approx_cmp;
pub mod axis;
pub mod face;
pub mod orientation;
pub mod sign;

/// Structs, traits, and constants.
pub mod prelude {
    pub use cgmath::{InnerSpace, Matrix3, Point2, Point3, Vector2, Vector3, Zero};

    pub use crate::angle::*;
    pub use crate::approx_cmp::*;
    pub use crate::axis::{Axis, dominant_axis};
    pub use crate::face::Face;
    pub use crate::orientation::Orientation;
    pub use crate::sign::Sign;
    pub use crate::{EPSILON, Float};
}
pub use prelude::*;
