use std::f64::consts::FRAC_PI_4;

use cgmath::{InnerSpace, Point2, Point3, Vector3};
use cubemath::{EPSILON, Float};

use crate::Ray;

/// Distance from the center of the puzzle to the drag plane of a face.
const FACE_PLANE_OFFSET: Float = 0.5;

/// Plane in world space onto which the cursor is projected while dragging.
///
/// Points on the plane are measured in a 2D basis `(x, y)` with `x × y` equal
/// to the plane's normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragPlane {
    /// Point on the plane that is the origin of its 2D basis.
    pub origin: Point3<Float>,
    /// First basis vector.
    pub x: Vector3<Float>,
    /// Second basis vector.
    pub y: Vector3<Float>,
    /// Unit normal vector.
    pub normal: Vector3<Float>,
}

impl DragPlane {
    /// Returns the plane for dragging a face with the given world-space
    /// normal vector.
    ///
    /// The plane is offset half a unit along the normal. Its `x` axis is
    /// horizontal (perpendicular to world up) whenever possible.
    pub fn facing(normal: Vector3<Float>) -> Self {
        let normal = normal.normalize();
        let up = Vector3::unit_y();
        let mut x = up.cross(normal);
        if x.magnitude2() < EPSILON {
            x = Vector3::unit_x();
        }
        let x = x.normalize();
        let y = normal.cross(x).normalize();
        Self {
            origin: Point3::new(0.0, 0.0, 0.0) + normal * FACE_PLANE_OFFSET,
            x,
            y,
            normal,
        }
    }

    /// Returns the plane for dragging the whole puzzle: the `xy` plane
    /// rotated an eighth of a turn around the `y` axis.
    pub fn whole_puzzle() -> Self {
        let (s, c) = FRAC_PI_4.sin_cos();
        Self {
            origin: Point3::new(0.0, 0.0, 0.0),
            x: Vector3::new(c, 0.0, -s),
            y: Vector3::unit_y(),
            normal: Vector3::new(s, 0.0, c),
        }
    }

    /// Returns the basis vector with index `i` (0 for `x`, otherwise `y`).
    pub fn axis(&self, i: usize) -> Vector3<Float> {
        match i {
            0 => self.x,
            _ => self.y,
        }
    }

    /// Returns the point where `ray` crosses the plane, in plane coordinates.
    /// Returns `None` if the ray is parallel to the plane.
    pub fn intersect(&self, ray: Ray) -> Option<Point2<Float>> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = (self.origin - ray.origin).dot(self.normal) / denom;
        let offset = ray.origin + ray.direction * t - self.origin;
        Some(Point2::new(offset.dot(self.x), offset.dot(self.y)))
    }
}
