use crate::geometry::Polyline;
use crate::math::Point2;

use super::{on_segment, IntersectTolerances};

/// Intersects every segment of `p0` with every segment of `p1`.
///
/// Uses the 2x2 determinant form. Only an exactly zero determinant
/// (parallel or collinear segments) is skipped; crossings must lie on
/// both segments.
#[must_use]
pub fn polyline_polyline(p0: &Polyline, p1: &Polyline, tol: &IntersectTolerances) -> Vec<Point2> {
    let mut points = Vec::new();
    for (a0, a1) in p0.segments() {
        for (b0, b1) in p1.segments() {
            if let Some(p) = segment_segment(&a0, &a1, &b0, &b1, tol.segment) {
                points.push(p);
            }
        }
    }
    points
}

#[allow(clippy::float_cmp)]
fn segment_segment(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, slack: f64) -> Option<Point2> {
    let (x1, y1, x2, y2) = (a0.x, a0.y, a1.x, a1.y);
    let (x3, y3, x4, y4) = (b0.x, b0.y, b1.x, b1.y);

    let den = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if den == 0.0 {
        return None;
    }
    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / den;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / den;
    if !(on_segment(t, slack) && on_segment(u, slack)) {
        return None;
    }
    Some(Point2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
}
