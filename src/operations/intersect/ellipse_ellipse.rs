use std::f64::consts::PI;

use nalgebra::{Complex, Matrix2};
use tracing::trace;

use crate::geometry::{Circle, Ellipse};
use crate::math::poly::solve_quartic;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::circle_circle::circle_circle;
use super::{ordered, push_unique, IntersectTolerances};

/// Two distinct conics share at most this many points.
const MAX_POINTS: usize = 4;

/// Newton steps used to settle each candidate on both ellipses.
const NEWTON_STEPS: usize = 64;

/// Intersects two ellipses.
///
/// The operands are put in a fixed order first, circles leading, so both
/// call orders solve the same system. Two circles go straight to
/// [`circle_circle`].
///
/// Otherwise, in the axis-aligned frame of `e0` (where
/// `x²/A + y²/B = 1`), `e1` is a general conic
/// `E x² + K y² + G xy + F x + H y + L = 0`. Eliminating `y²` with the
/// first equation gives `M x² + F x + N = -y (G x + H)`, and squaring that
/// leaves a quartic in `x`. Each near-real root picks its `y` branch from
/// the unsquared relation (both branches when `G x + H` vanishes), is
/// refined by Newton's method on the pair of ellipse equations, and is kept
/// only if the refined point lies on both.
#[must_use]
pub fn ellipse_ellipse(e0: &Ellipse, e1: &Ellipse, tol: &IntersectTolerances) -> Vec<Point2> {
    let (e0, e1) = ordered(e0, e1, |e| {
        [
            if e.is_circle() { 0.0 } else { 1.0 },
            e.semi_axis_a(),
            e.semi_axis_b(),
            e.rotation(),
            e.center().x,
            e.center().y,
        ]
    });

    if e0.is_circle() && e1.is_circle() {
        return match (
            Circle::new(*e0.center(), e0.semi_axis_a()),
            Circle::new(*e1.center(), e1.semi_axis_a()),
        ) {
            (Ok(c0), Ok(c1)) => circle_circle(&c0, &c1, tol),
            _ => Vec::new(),
        };
    }

    let (a0, b0, a1, b1) = (e0.semi_axis_a(), e0.semi_axis_b(), e1.semi_axis_a(), e1.semi_axis_b());
    if a0 < TOLERANCE || b0 < TOLERANCE || a1 < TOLERANCE || b1 < TOLERANCE {
        trace!("degenerate ellipse axis");
        return Vec::new();
    }
    if coincident(e0, e1) {
        trace!("coincident ellipses");
        return Vec::new();
    }

    // e1's center and orientation seen from e0.
    let center = e0.world_to_local(e1.center());
    let (sin_phi, cos_phi) = (e0.rotation() - e1.rotation()).sin_cos();
    let pair = LocalPair {
        a: a0 * a0,
        b: b0 * b0,
        c: a1 * a1,
        d: b1 * b1,
        x1: center.x,
        y1: center.y,
        sin_phi,
        cos_phi,
    };
    let LocalPair { a, b, c, d, .. } = pair;
    let ba = b / a;

    let kv = pair.x1 * cos_phi - pair.y1 * sin_phi;
    let kw = pair.x1 * sin_phi + pair.y1 * cos_phi;

    // e1 as a conic in e0's frame.
    let ce = d * cos_phi * cos_phi + c * sin_phi * sin_phi;
    let cf = -2.0 * (d * cos_phi * kv + c * sin_phi * kw);
    let cg = 2.0 * cos_phi * sin_phi * (c - d);
    let ch = 2.0 * (d * sin_phi * kv - c * cos_phi * kw);
    let ck = d * sin_phi * sin_phi + c * cos_phi * cos_phi;
    let cl = d * kv * kv + c * kw * kw - c * d;

    // M x² + F x + N = -y (G x + H)
    let m = ce - ck * ba;
    let n = ck * b + cl;

    let roots = solve_quartic(
        m * m + ba * cg * cg,
        2.0 * cf * m + 2.0 * ba * cg * ch,
        2.0 * m * n + cf * cf + ba * ch * ch - b * cg * cg,
        2.0 * cf * n - 2.0 * b * cg * ch,
        n * n - b * ch * ch,
    );

    let scale = a0.max(b0).max(a1).max(b1).max(1.0);
    let lever_eps = tol.tangent.sqrt();
    let mut points = Vec::new();
    for x in roots.into_iter().filter(|z| near_real(z, tol)).map(|z| z.re) {
        let yy = b - ba * x * x;
        if yy < -tol.candidate * b {
            continue;
        }
        let y = yy.max(0.0).sqrt();
        let lever = cg * x + ch;
        let branches = if lever.abs() > lever_eps * (cg.abs() * x.abs() + ch.abs()) {
            vec![y.copysign(-(m * x * x + cf * x + n) / lever)]
        } else {
            vec![y, -y]
        };
        for y in branches {
            let p = pair.refine(Point2::new(x, y), scale);
            let r = pair.residuals(&p);
            if r.x.abs() <= tol.residual && r.y.abs() <= tol.residual {
                push_unique(&mut points, e0.local_to_world(&p), tol.merge * scale);
            } else {
                trace!(x, y, "candidate did not settle on both ellipses");
            }
        }
    }
    points.truncate(MAX_POINTS);
    points
}

/// Both ellipses in the axis-aligned frame of the first: `x²/a + y²/b = 1`
/// and `v²/c + w²/d = 1`, where `(v, w)` is the point rotated by `phi`
/// about `(x1, y1)`.
#[derive(Debug, Clone, Copy)]
struct LocalPair {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    x1: f64,
    y1: f64,
    sin_phi: f64,
    cos_phi: f64,
}

impl LocalPair {
    fn second_frame(&self, p: &Point2) -> (f64, f64) {
        let (dx, dy) = (p.x - self.x1, p.y - self.y1);
        (
            dx * self.cos_phi - dy * self.sin_phi,
            dx * self.sin_phi + dy * self.cos_phi,
        )
    }

    /// Normalized implicit values of both ellipses at `p`.
    fn residuals(&self, p: &Point2) -> Vector2 {
        let (v, w) = self.second_frame(p);
        Vector2::new(
            p.x * p.x / self.a + p.y * p.y / self.b - 1.0,
            v * v / self.c + w * w / self.d - 1.0,
        )
    }

    fn jacobian(&self, p: &Point2) -> Matrix2<f64> {
        let (v, w) = self.second_frame(p);
        let (dv, dw) = (2.0 * v / self.c, 2.0 * w / self.d);
        Matrix2::new(
            2.0 * p.x / self.a,
            2.0 * p.y / self.b,
            dv * self.cos_phi + dw * self.sin_phi,
            dw * self.cos_phi - dv * self.sin_phi,
        )
    }

    /// Newton's method on both equations, stopping once the step is below
    /// rounding or the system turns singular.
    fn refine(&self, start: Point2, scale: f64) -> Point2 {
        let mut p = start;
        for _ in 0..NEWTON_STEPS {
            let Some(inverse) = self.jacobian(&p).try_inverse() else {
                break;
            };
            let step = inverse * self.residuals(&p);
            if !step.iter().all(|s| s.is_finite()) {
                break;
            }
            p -= step;
            if step.norm() <= f64::EPSILON * scale {
                break;
            }
        }
        p
    }
}

fn near_real(z: &Complex<f64>, tol: &IntersectTolerances) -> bool {
    let arg = z.arg();
    arg.abs() <= tol.root_angle
        || (arg.abs() - PI).abs() <= tol.root_angle
        || z.im.abs() <= tol.root_imag * z.norm().max(1.0)
}

/// Same center and the same curve: equal axes at the same orientation up
/// to a half turn, or swapped axes a quarter turn apart.
fn coincident(e0: &Ellipse, e1: &Ellipse) -> bool {
    let scale = e0.semi_axis_a().max(e0.semi_axis_b()).max(1.0);
    let eps = TOLERANCE * scale;
    let near = |x: f64, y: f64| (x - y).abs() < eps;
    let turn = (e0.rotation() - e1.rotation()).rem_euclid(PI);
    let aligned = turn < TOLERANCE || PI - turn < TOLERANCE;
    let crossed = (turn - PI / 2.0).abs() < TOLERANCE;
    let (a0, b0, a1, b1) = (e0.semi_axis_a(), e0.semi_axis_b(), e1.semi_axis_a(), e1.semi_axis_b());
    (e0.center() - e1.center()).norm() < eps
        && ((aligned && near(a0, a1) && near(b0, b1)) || (crossed && near(a0, b1) && near(b0, a1)))
}
