use tracing::trace;

use crate::geometry::{Ellipse, Polyline};
use crate::math::poly::solve_quadratic;
use crate::math::{Point2, TOLERANCE};

use super::{on_segment, IntersectTolerances};

/// Intersects an ellipse with every segment of a polyline.
///
/// Segments are moved into the ellipse's axis-aligned frame, where the
/// parametric form `p + t d` turns `x²/a² + y²/b² = 1` into a quadratic
/// in `t`. Roots on the segment are mapped back to world space.
#[must_use]
pub fn ellipse_polyline(
    ellipse: &Ellipse,
    pline: &Polyline,
    tol: &IntersectTolerances,
) -> Vec<Point2> {
    let (a, b) = (ellipse.semi_axis_a(), ellipse.semi_axis_b());
    if a < TOLERANCE || b < TOLERANCE {
        trace!("degenerate ellipse axis");
        return Vec::new();
    }
    let (aa, bb) = (a * a, b * b);
    let to_local = ellipse.to_local();
    let to_world = ellipse.to_world();

    let mut points = Vec::new();
    for (w0, w1) in pline.segments() {
        let p = to_local.apply(&w0);
        let d = to_local.apply(&w1) - p;
        if d.norm_squared() < TOLERANCE * TOLERANCE {
            trace!("skipping zero-length segment");
            continue;
        }

        let qa = d.x * d.x / aa + d.y * d.y / bb;
        let qb = 2.0 * (p.x * d.x / aa + p.y * d.y / bb);
        let qc = p.x * p.x / aa + p.y * p.y / bb - 1.0;

        for t in solve_quadratic(qa, qb, qc, tol.tangent) {
            if on_segment(t, tol.segment) {
                points.push(to_world.apply(&(p + d * t)));
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
    use std::f64::consts::FRAC_PI_2;

    fn pline(points: &[(f64, f64)]) -> Polyline {
        Polyline::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect(), false).unwrap()
    }

    #[test]
    fn horizontal_chord() {
        let e = Ellipse::new(Point2::origin(), 4.0, 2.0, 0.0).unwrap();
        let pts = ellipse_polyline(&e, &pline(&[(-10.0, 1.0), (10.0, 1.0)]), &IntersectTolerances::default());
        let x = 4.0 * (0.75_f64).sqrt();
        assert_same_points(&pts, &[Point2::new(-x, 1.0), Point2::new(x, 1.0)], 1e-12);
    }

    #[test]
    fn rotated_and_shifted() {
        // Rotated a quarter turn, the long axis is vertical.
        let e = Ellipse::new(Point2::new(1.0, 2.0), 4.0, 2.0, FRAC_PI_2).unwrap();
        let pts = ellipse_polyline(&e, &pline(&[(1.0, -10.0), (1.0, 10.0)]), &IntersectTolerances::default());
        assert_same_points(&pts, &[Point2::new(1.0, -2.0), Point2::new(1.0, 6.0)], 1e-12);
    }

    #[test]
    fn tangent_and_miss() {
        let e = Ellipse::new(Point2::origin(), 4.0, 2.0, 0.0).unwrap();
        let tangent = ellipse_polyline(&e, &pline(&[(-5.0, 2.0), (5.0, 2.0)]), &IntersectTolerances::default());
        assert_eq!(tangent.len(), 1);
        assert!((tangent[0] - Point2::new(0.0, 2.0)).norm() < 1e-9);

        let miss = ellipse_polyline(&e, &pline(&[(-5.0, 3.0), (5.0, 3.0)]), &IntersectTolerances::default());
        assert!(miss.is_empty());

        let inside = ellipse_polyline(&e, &pline(&[(-1.0, 0.0), (1.0, 0.5)]), &IntersectTolerances::default());
        assert!(inside.is_empty());
    }

    #[test]
    fn matches_circle_solver_for_round_ellipse() {
        use super::super::circle_line::circle_polyline;
        use crate::geometry::Circle;

        let circle = Circle::new(Point2::new(0.5, -0.5), 2.0).unwrap();
        let round = Ellipse::from_circle(&circle);
        let l = pline(&[(-4.0, -3.0), (3.0, 2.0), (-1.0, 3.0)]);
        let tol = IntersectTolerances::default();
        assert_same_points(
            &ellipse_polyline(&round, &l, &tol),
            &circle_polyline(&circle, &l, &tol),
            1e-9,
        );
    }
}
