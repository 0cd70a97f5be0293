//! Pairwise intersection of sheet entities.
//!
//! Dispatch is by the variants of both operands. Circles, ellipses and
//! polylines (as straight segments, splines by their control polygon) are
//! intersectable; every other pairing yields no points.

mod circle_circle;
mod circle_line;
mod ellipse_ellipse;
mod ellipse_line;
mod line_line;

use std::cmp::Ordering;

use tracing::trace;

use crate::geometry::{Ellipse, Entity};
use crate::math::Point2;

pub use circle_circle::circle_circle;
pub use circle_line::circle_polyline;
pub use ellipse_ellipse::ellipse_ellipse;
pub use ellipse_line::ellipse_polyline;
pub use line_line::polyline_polyline;

/// Numeric tolerances used by the intersection solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectTolerances {
    /// Maximum angle (radians) between a quartic root and the real axis
    /// for the root to count as near-real.
    pub root_angle: f64,
    /// Imaginary part, relative to `max(1, |z|)`, below which a root is
    /// near-real regardless of its angle.
    pub root_imag: f64,
    /// Slack, relative to the squared minor extent, allowed when a quartic
    /// root falls just outside the first ellipse.
    pub candidate: f64,
    /// Largest residual of a refined point on the normalized equation of
    /// either ellipse.
    pub residual: f64,
    /// Relative discriminant size treated as a tangency.
    pub tangent: f64,
    /// Parameter slack when bounding results to a segment.
    pub segment: f64,
    /// Distance, relative to the shape scale, at which points are merged.
    pub merge: f64,
}

impl Default for IntersectTolerances {
    fn default() -> Self {
        Self {
            root_angle: 0.01,
            root_imag: 1e-9,
            candidate: 0.01,
            residual: 1e-9,
            tangent: 1e-9,
            segment: 1e-9,
            merge: 1e-6,
        }
    }
}

/// Computes the intersection points of two entities.
#[derive(Debug)]
pub struct Intersect<'a> {
    a: &'a Entity,
    b: &'a Entity,
    tolerances: IntersectTolerances,
}

impl<'a> Intersect<'a> {
    /// Creates a query with default tolerances.
    #[must_use]
    pub fn new(a: &'a Entity, b: &'a Entity) -> Self {
        Self {
            a,
            b,
            tolerances: IntersectTolerances::default(),
        }
    }

    /// Replaces the default tolerances.
    #[must_use]
    pub fn with_tolerances(mut self, tolerances: IntersectTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Executes the query.
    ///
    /// Non-intersecting, degenerate and unsupported pairs all produce an
    /// empty list.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let tol = &self.tolerances;
        match (self.a, self.b) {
            (Entity::Circle(c0), Entity::Circle(c1)) => circle_circle(c0, c1, tol),
            (Entity::Circle(c), Entity::Polyline(p)) | (Entity::Polyline(p), Entity::Circle(c)) => {
                circle_polyline(c, p, tol)
            }
            (Entity::Ellipse(e), Entity::Polyline(p))
            | (Entity::Polyline(p), Entity::Ellipse(e)) => ellipse_polyline(e, p, tol),
            (Entity::Ellipse(e0), Entity::Ellipse(e1)) => ellipse_ellipse(e0, e1, tol),
            (Entity::Circle(c), Entity::Ellipse(e)) => {
                ellipse_ellipse(&Ellipse::from_circle(c), e, tol)
            }
            (Entity::Ellipse(e), Entity::Circle(c)) => {
                ellipse_ellipse(e, &Ellipse::from_circle(c), tol)
            }
            (Entity::Polyline(p0), Entity::Polyline(p1)) => polyline_polyline(p0, p1, tol),
            (a, b) => {
                trace!(a = a.kind(), b = b.kind(), "pair is not intersectable");
                Vec::new()
            }
        }
    }
}

/// Intersects two entities with default tolerances.
#[must_use]
pub fn intersect(a: &Entity, b: &Entity) -> Vec<Point2> {
    Intersect::new(a, b).execute()
}

/// Whether `t` lies on `[0, 1]` within `slack`.
fn on_segment(t: f64, slack: f64) -> bool {
    t >= -slack && t <= 1.0 + slack
}

/// Puts two operands in ascending order of `key`, compared
/// lexicographically, so a solver sees the same pair in both call orders.
fn ordered<'a, T, const N: usize>(a: &'a T, b: &'a T, key: impl Fn(&T) -> [f64; N]) -> (&'a T, &'a T) {
    let (ka, kb) = (key(a), key(b));
    let later = ka
        .iter()
        .zip(&kb)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne());
    if later == Some(Ordering::Greater) {
        (b, a)
    } else {
        (a, b)
    }
}

/// Appends `p` unless a point within `eps` is already present.
fn push_unique(points: &mut Vec<Point2>, p: Point2, eps: f64) {
    if points.iter().all(|q| (q - p).norm() > eps) {
        points.push(p);
    }
}
