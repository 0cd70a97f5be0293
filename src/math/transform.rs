use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

use super::{Matrix3, Point2, Vector2};

/// Relative threshold below which a determinant counts as singular.
const SINGULAR_DETERMINANT: f64 = 1e-12;

/// A 2D affine transform stored as a 2x3 matrix.
///
/// Maps `(x, y)` to `(xx*x + xy*y + x0, yx*x + yy*y + y0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a transform from its six coefficients.
    #[must_use]
    pub fn new(xx: f64, yx: f64, xy: f64, yy: f64, x0: f64, y0: f64) -> Self {
        Self {
            xx,
            yx,
            xy,
            yy,
            x0,
            y0,
        }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// A pure translation by `(tx, ty)`.
    #[must_use]
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// A counter-clockwise rotation by `angle` radians about the origin.
    #[must_use]
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// A scaling by `(sx, sy)` about the origin.
    #[must_use]
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn apply(&self, p: &Point2) -> Point2 {
        Point2::new(
            self.xx * p.x + self.xy * p.y + self.x0,
            self.yx * p.x + self.yy * p.y + self.y0,
        )
    }

    /// Applies the linear part of the transform to a vector (no translation).
    #[must_use]
    pub fn apply_vector(&self, v: &Vector2) -> Vector2 {
        Vector2::new(self.xx * v.x + self.xy * v.y, self.yx * v.x + self.yy * v.y)
    }

    /// Returns the transform that applies `self` first, then `next`.
    #[must_use]
    pub fn compose(&self, next: &Transform) -> Transform {
        Self::from_matrix(&(next.to_matrix() * self.to_matrix()))
    }

    /// Appends a translation after this transform.
    #[must_use]
    pub fn then_translate(&self, tx: f64, ty: f64) -> Transform {
        self.compose(&Self::translation(tx, ty))
    }

    /// Appends a rotation after this transform.
    #[must_use]
    pub fn then_rotate(&self, angle: f64) -> Transform {
        self.compose(&Self::rotation(angle))
    }

    /// Appends a scaling after this transform.
    #[must_use]
    pub fn then_scale(&self, sx: f64, sy: f64) -> Transform {
        self.compose(&Self::scaling(sx, sy))
    }

    /// Determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// Computes the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateMatrix`] when the determinant is
    /// negligible relative to the scale of the linear coefficients.
    pub fn invert(&self) -> Result<Transform, GeometryError> {
        let det = self.determinant();
        let scale = self
            .xx
            .abs()
            .max(self.yx.abs())
            .max(self.xy.abs())
            .max(self.yy.abs());
        if !det.is_finite() || det.abs() < SINGULAR_DETERMINANT * scale.powi(2).max(1.0) {
            return Err(GeometryError::DegenerateMatrix { determinant: det });
        }
        self.to_matrix()
            .try_inverse()
            .map(|m| Self::from_matrix(&m))
            .ok_or(GeometryError::DegenerateMatrix { determinant: det })
    }

    /// Returns the homogeneous 3x3 matrix of this transform.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix3 {
        Matrix3::new(
            self.xx, self.xy, self.x0, //
            self.yx, self.yy, self.y0, //
            0.0, 0.0, 1.0,
        )
    }

    /// Builds a transform from a homogeneous 3x3 matrix, ignoring its last row.
    #[must_use]
    pub fn from_matrix(m: &Matrix3) -> Self {
        Self::new(m[(0, 0)], m[(1, 0)], m[(0, 1)], m[(1, 1)], m[(0, 2)], m[(1, 2)])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn apply_maps_coefficients() {
        let t = Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let p = t.apply(&Point2::new(1.0, 1.0));
        assert_abs_diff_eq!(p.x, 1.0 + 3.0 + 5.0);
        assert_abs_diff_eq!(p.y, 2.0 + 4.0 + 6.0);
    }

    #[test]
    fn rotation_is_counter_clockwise() {
        let p = Transform::rotation(FRAC_PI_2).apply(&Point2::new(1.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn compose_applies_first_then_second() {
        // Translate then rotate differs from rotate then translate.
        let t = Transform::translation(1.0, 0.0);
        let r = Transform::rotation(FRAC_PI_2);
        let tr = t.compose(&r).apply(&Point2::origin());
        assert_abs_diff_eq!(tr.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(tr.y, 1.0, epsilon = 1e-12);

        let rt = r.compose(&t).apply(&Point2::origin());
        assert_abs_diff_eq!(rt.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rt.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn then_chain_matches_compose() {
        let chained = Transform::identity()
            .then_translate(-2.0, -3.0)
            .then_rotate(0.7)
            .then_scale(2.0, 0.5);
        let composed = Transform::translation(-2.0, -3.0)
            .compose(&Transform::rotation(0.7))
            .compose(&Transform::scaling(2.0, 0.5));
        let p = Point2::new(4.0, -1.0);
        assert_abs_diff_eq!(chained.apply(&p), composed.apply(&p), epsilon = 1e-12);
    }

    #[test]
    fn invert_round_trips_points() {
        let t = Transform::translation(3.0, -4.0)
            .then_rotate(0.3)
            .then_scale(2.0, 3.0);
        let inv = t.invert().unwrap();
        let p = Point2::new(1.5, 2.5);
        let back = inv.apply(&t.apply(&p));
        assert_abs_diff_eq!(back, p, epsilon = 1e-12);
        assert_abs_diff_eq!(t.compose(&inv).determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn invert_singular_fails() {
        let t = Transform::scaling(1.0, 0.0);
        assert!(matches!(
            t.invert(),
            Err(GeometryError::DegenerateMatrix { .. })
        ));

        let collinear = Transform::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
        assert!(collinear.invert().is_err());
    }

    #[test]
    fn apply_vector_ignores_translation() {
        let t = Transform::translation(10.0, 10.0).then_rotate(FRAC_PI_2);
        let v = t.apply_vector(&Vector2::new(1.0, 0.0));
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);
    }
}
