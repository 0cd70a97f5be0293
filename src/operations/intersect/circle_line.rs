use tracing::trace;

use crate::geometry::{Circle, Polyline};
use crate::math::poly::solve_quadratic;
use crate::math::{Point2, TOLERANCE};

use super::{on_segment, IntersectTolerances};

/// Intersects a circle with every segment of a polyline.
///
/// Each segment `p + t d` is substituted into `|x - c|² = r²`, giving
/// `|d|² t² + 2 (f·d) t + |f|² - r² = 0` with `f = p - c`. Only roots on
/// the segment are kept. Points are not merged across segments.
#[must_use]
pub fn circle_polyline(circle: &Circle, pline: &Polyline, tol: &IntersectTolerances) -> Vec<Point2> {
    let r = circle.radius();
    let mut points = Vec::new();

    for (p0, p1) in pline.segments() {
        let d = p1 - p0;
        let a = d.norm_squared();
        if a < TOLERANCE * TOLERANCE {
            trace!("skipping zero-length segment");
            continue;
        }
        let f = p0 - circle.center();
        let b = 2.0 * f.dot(&d);
        let c = f.norm_squared() - r * r;

        for t in solve_quadratic(a, b, c, tol.tangent) {
            if on_segment(t, tol.segment) {
                points.push(p0 + d * t);
            }
        }
    }
    points
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::intersect::tests::assert_same_points;

    fn pline(points: &[(f64, f64)], closed: bool) -> Polyline {
        Polyline::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect(), closed).unwrap()
    }

    #[test]
    fn secant_through_center() {
        let c = Circle::new(Point2::new(1.0, 1.0), 2.0).unwrap();
        let l = pline(&[(-5.0, 1.0), (5.0, 1.0)], false);
        let pts = circle_polyline(&c, &l, &IntersectTolerances::default());
        assert_same_points(&pts, &[Point2::new(-1.0, 1.0), Point2::new(3.0, 1.0)], 1e-12);
    }

    #[test]
    fn tangent_line_gives_single_point() {
        for r in [0.5, 1.0, 3.0, 100.0] {
            let c = Circle::new(Point2::origin(), r).unwrap();
            let l = pline(&[(r, -2.0 * r), (r, 2.0 * r)], false);
            let pts = circle_polyline(&c, &l, &IntersectTolerances::default());
            assert_eq!(pts.len(), 1, "r = {r}");
            assert!((pts[0].x - r).abs() < 1e-6);
            assert!(pts[0].y.abs() < 1e-6);
        }
    }

    #[test]
    fn segment_outside_misses() {
        let c = Circle::new(Point2::origin(), 1.0).unwrap();
        // The infinite line crosses the circle, the segment stops short.
        let short = pline(&[(2.0, 0.0), (5.0, 0.0)], false);
        assert!(circle_polyline(&c, &short, &IntersectTolerances::default()).is_empty());
        let far = pline(&[(-3.0, 2.0), (3.0, 2.5)], false);
        assert!(circle_polyline(&c, &far, &IntersectTolerances::default()).is_empty());
    }

    #[test]
    fn each_segment_reports_independently() {
        let c = Circle::new(Point2::origin(), 1.0).unwrap();
        // A zig-zag crossing the circle with two segments.
        let zig = pline(&[(-2.0, 0.5), (2.0, 0.5), (-2.0, -0.5)], false);
        let pts = circle_polyline(&c, &zig, &IntersectTolerances::default());
        assert_eq!(pts.len(), 4);
    }

    #[test]
    fn closing_segment_counts() {
        let c = Circle::new(Point2::new(0.0, 4.5), 1.0).unwrap();
        let tri = [(-3.0, 0.0), (3.0, 0.0), (0.0, 6.0)];
        let open = circle_polyline(&c, &pline(&tri, false), &IntersectTolerances::default());
        let closed = circle_polyline(&c, &pline(&tri, true), &IntersectTolerances::default());
        assert_eq!(open.len(), 2);
        assert_eq!(closed.len(), 4);
    }

    #[test]
    fn zero_length_segment_ignored() {
        let c = Circle::new(Point2::origin(), 1.0).unwrap();
        let dot = pline(&[(1.0, 0.0), (1.0, 0.0)], false);
        assert!(circle_polyline(&c, &dot, &IntersectTolerances::default()).is_empty());
    }
}
