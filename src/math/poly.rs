//! Real-coefficient polynomial root finding.
//!
//! Quartics and lower-degree polynomials are solved through the eigenvalues
//! of their companion matrix (nalgebra's real Schur decomposition), followed
//! by a few Newton steps on the original polynomial to recover the digits the
//! eigen-solver loses around clustered roots.

use nalgebra::{Complex, DMatrix};

/// Coefficients smaller than this fraction of the largest one are treated as
/// zero when they lead the polynomial.
const LEADING_EPS: f64 = 1e-14;

/// Maximum number of Newton steps used to polish each root.
const POLISH_ITERATIONS: usize = 4;

/// Returns all complex roots of a real polynomial.
///
/// `coeffs` are ordered from the highest degree down to the constant term.
/// Leading coefficients that are negligible relative to the largest one are
/// stripped, so a degenerate quartic falls back to its true degree. A
/// constant (or all-zero) polynomial has no roots.
#[must_use]
pub fn polynomial_roots(coeffs: &[f64]) -> Vec<Complex<f64>> {
    let max = coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    if max <= 0.0 || !max.is_finite() {
        return Vec::new();
    }
    let Some(first) = coeffs.iter().position(|c| c.abs() > LEADING_EPS * max) else {
        return Vec::new();
    };
    let coeffs = &coeffs[first..];
    let degree = coeffs.len() - 1;
    let lead = coeffs[0];

    match degree {
        0 => Vec::new(),
        1 => vec![Complex::new(-coeffs[1] / lead, 0.0)],
        _ => {
            let mut companion = DMatrix::<f64>::zeros(degree, degree);
            for (j, c) in coeffs[1..].iter().enumerate() {
                companion[(0, j)] = -c / lead;
            }
            for i in 1..degree {
                companion[(i, i - 1)] = 1.0;
            }
            companion
                .complex_eigenvalues()
                .iter()
                .map(|z| polish(coeffs, *z))
                .collect()
        }
    }
}

/// Solves `a x^4 + b x^3 + c x^2 + d x + e = 0` for all complex roots.
#[must_use]
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Vec<Complex<f64>> {
    polynomial_roots(&[a, b, c, d, e])
}

/// Solves `a x^2 + b x + c = 0` for its real roots.
///
/// A discriminant within `tangent_tol` (relative to the magnitude of its
/// terms) of zero yields a single double root. Roots are returned in
/// ascending order.
#[must_use]
pub fn solve_quadratic(a: f64, b: f64, c: f64, tangent_tol: f64) -> Vec<f64> {
    if a.abs() < f64::MIN_POSITIVE {
        if b.abs() < f64::MIN_POSITIVE {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let disc = b * b - 4.0 * a * c;
    let scale = (b * b).max((4.0 * a * c).abs());
    if disc.abs() <= tangent_tol * scale {
        return vec![-b / (2.0 * a)];
    }
    if disc < 0.0 {
        return Vec::new();
    }

    // Avoid cancellation between -b and the square root.
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    let (r0, r1) = if q.abs() < f64::MIN_POSITIVE {
        let h = disc.sqrt() / (2.0 * a);
        (-h, h)
    } else {
        (q / a, c / q)
    };
    if r0 <= r1 {
        vec![r0, r1]
    } else {
        vec![r1, r0]
    }
}

/// Evaluates the polynomial and its derivative at `z` (Horner's scheme).
fn evaluate(coeffs: &[f64], z: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
    let mut p = Complex::new(0.0, 0.0);
    let mut dp = Complex::new(0.0, 0.0);
    for &c in coeffs {
        dp = dp * z + p;
        p = p * z + c;
    }
    (p, dp)
}

fn polish(coeffs: &[f64], mut z: Complex<f64>) -> Complex<f64> {
    for _ in 0..POLISH_ITERATIONS {
        let (p, dp) = evaluate(coeffs, z);
        if dp.norm() < f64::MIN_POSITIVE {
            break;
        }
        let next = z - p / dp;
        if !(next.re.is_finite() && next.im.is_finite()) {
            break;
        }
        if evaluate(coeffs, next).0.norm() >= p.norm() {
            break;
        }
        z = next;
    }
    z
}
