use crate::math::Point2;

/// A cubic Bézier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point2,
    pub p1: Point2,
    pub p2: Point2,
    pub p3: Point2,
}

impl CubicBezier {
    /// Evaluates the curve at `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let s = 1.0 - t;
        let w0 = s * s * s;
        let w1 = 3.0 * s * s * t;
        let w2 = 3.0 * s * t * t;
        let w3 = t * t * t;
        Point2::from(
            self.p0.coords * w0 + self.p1.coords * w1 + self.p2.coords * w2 + self.p3.coords * w3,
        )
    }
}

/// Converts a uniform cubic B-spline control polygon into Bézier pieces.
///
/// Each run of four control points `P0..P3` gives one piece:
/// `b0 = (P0 + 4P1 + P2) / 6`, `b1 = (4P1 + 2P2) / 6`,
/// `b2 = (2P1 + 4P2) / 6`, `b3 = (P1 + 4P2 + P3) / 6`.
/// Open splines need four vertices; closed ones wrap around and need
/// three. Returns `None` when there are too few vertices.
#[must_use]
pub fn bspline_to_bezier(vertices: &[Point2], closed: bool) -> Option<Vec<CubicBezier>> {
    let n = vertices.len();
    let pieces = match (closed, n) {
        (true, 3..) => n,
        (false, 4..) => n - 3,
        _ => return None,
    };
    let at = |i: usize| vertices[i % n].coords;
    Some(
        (0..pieces)
            .map(|i| {
                let (q0, q1, q2, q3) = (at(i), at(i + 1), at(i + 2), at(i + 3));
                CubicBezier {
                    p0: Point2::from((q0 + q1 * 4.0 + q2) / 6.0),
                    p1: Point2::from((q1 * 4.0 + q2 * 2.0) / 6.0),
                    p2: Point2::from((q1 * 2.0 + q2 * 4.0) / 6.0),
                    p3: Point2::from((q1 + q2 * 4.0 + q3) / 6.0),
                }
            })
            .collect(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point2> {
        raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn too_few_vertices() {
        let three = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert!(bspline_to_bezier(&three, false).is_none());
        assert_eq!(bspline_to_bezier(&three, true).unwrap().len(), 3);
        assert!(bspline_to_bezier(&three[..2], true).is_none());
    }

    #[test]
    fn pieces_join_continuously() {
        let ctrl = pts(&[(0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0), (6.0, 1.0)]);
        let curves = bspline_to_bezier(&ctrl, false).unwrap();
        assert_eq!(curves.len(), 2);
        assert_abs_diff_eq!(curves[0].p3, curves[1].p0, epsilon = 1e-12);
        // Tangents match across the joint.
        let out = curves[0].p3 - curves[0].p2;
        let inc = curves[1].p1 - curves[1].p0;
        assert_abs_diff_eq!(out, inc, epsilon = 1e-12);
    }

    #[test]
    fn closed_loop_wraps() {
        let ctrl = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let curves = bspline_to_bezier(&ctrl, true).unwrap();
        assert_eq!(curves.len(), 4);
        assert_abs_diff_eq!(curves[3].p3, curves[0].p0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_controls_stay_on_the_line() {
        let ctrl = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let c = bspline_to_bezier(&ctrl, false).unwrap()[0];
        assert_abs_diff_eq!(c.point_at(0.0), Point2::new(1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(c.point_at(1.0), Point2::new(2.0, 0.0), epsilon = 1e-12);
        assert!(c.point_at(0.3).y.abs() < 1e-12);
    }
}
