use cgmath::{EuclideanSpace, InnerSpace, Point2, Point3, Vector3};
use cubemath::{Axis, EPSILON, Face, Float, Sign};
use cubeturn_core::{PieceId, PuzzleModel};
use float_ord::FloatOrd;

/// Half the width of the bounding hull around the puzzle.
const HULL_HALF_WIDTH: Float = 0.5;

/// Ray in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Point where the ray starts.
    pub origin: Point3<Float>,
    /// Direction of the ray. This need not be normalized.
    pub direction: Vector3<Float>,
}

/// Result of a hit test against the puzzle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PuzzleHit {
    /// Piece under the cursor.
    pub piece: PieceId,
    /// Face of the bounding hull under the cursor, in the frame of the puzzle.
    pub local_normal: Face,
    /// Normal vector of that face in world space.
    pub world_normal: Vector3<Float>,
}

/// Hit testing supplied by whatever draws the puzzle.
///
/// Cursor positions are in normalized device coordinates: `x` and `y` from -1
/// to 1, with `+y` up.
pub trait PuzzleGeometry {
    /// Returns the piece and face under the cursor, or `None` if the cursor is
    /// not over the puzzle.
    fn hit_test(&self, model: &PuzzleModel, cursor: Point2<Float>) -> Option<PuzzleHit>;

    /// Returns the ray from the camera through the cursor.
    fn cursor_ray(&self, cursor: Point2<Float>) -> Option<Ray>;
}

/// Orthographic camera looking down the `-z` axis at the puzzle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthographicCamera {
    /// Half the height of the view, in world units.
    pub half_height: Float,
    /// Width divided by height.
    pub aspect_ratio: Float,
    /// Distance from the puzzle center to the camera.
    pub distance: Float,
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self {
            half_height: 1.0,
            aspect_ratio: 1.0,
            distance: 10.0,
        }
    }
}

impl PuzzleGeometry for OrthographicCamera {
    fn hit_test(&self, model: &PuzzleModel, cursor: Point2<Float>) -> Option<PuzzleHit> {
        let ray = self.cursor_ray(cursor)?;
        let root = model.root_rotation();
        let inverse_root = root.conjugate();
        let origin = Point3::from_vec(inverse_root * ray.origin.to_vec());
        let direction = inverse_root * ray.direction;

        let (local_normal, t) = intersect_hull(origin, direction)?;
        let point = origin + direction * t;

        let piece = model
            .piece_ids()
            .filter_map(|id| Some((id, model.piece_center(id)?)))
            .min_by_key(|(_, center)| FloatOrd((center - point).magnitude2()))
            .map(|(id, _)| id)?;

        Some(PuzzleHit {
            piece,
            local_normal,
            world_normal: root * local_normal.vector(),
        })
    }

    fn cursor_ray(&self, cursor: Point2<Float>) -> Option<Ray> {
        Some(Ray {
            origin: Point3::new(
                cursor.x * self.half_height * self.aspect_ratio,
                cursor.y * self.half_height,
                self.distance,
            ),
            direction: -Vector3::unit_z(),
        })
    }
}

/// Returns the face of the axis-aligned hull where `direction` enters it from
/// `origin`, along with the distance along the ray in units of `direction`.
fn intersect_hull(origin: Point3<Float>, direction: Vector3<Float>) -> Option<(Face, Float)> {
    let mut t_near = Float::NEG_INFINITY;
    let mut t_far = Float::INFINITY;
    let mut entry_face = None;

    for axis in Axis::ALL {
        let i = axis.index();
        let (o, d) = (origin[i], direction[i]);
        if d.abs() < EPSILON {
            if o.abs() > HULL_HALF_WIDTH {
                return None;
            }
            continue;
        }
        let t1 = (-HULL_HALF_WIDTH - o) / d;
        let t2 = (HULL_HALF_WIDTH - o) / d;
        let (t_min, t_max) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if t_min > t_near {
            t_near = t_min;
            // The ray enters through the face opposite its direction.
            entry_face = Some(Face::new(axis, -Sign::of_float(d)));
        }
        t_far = t_far.min(t_max);
    }

    if t_near > t_far || t_far < 0.0 {
        return None;
    }
    Some((entry_face?, t_near))
}
