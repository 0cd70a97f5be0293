/// 2D arc angle utilities.
///
/// Arcs are described as `(center, radius, start_angle, sweep)`.
/// - `sweep > 0`: counter-clockwise
/// - `sweep < 0`: clockwise
use std::f64::consts::{PI, TAU};

use super::Point2;

/// Wraps an angle into `(-π, π]`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}

/// Signed sweep from `from` to `to` along the shorter way around.
///
/// The result lies in `(-π, π]`; opposite angles sweep `+π`.
#[must_use]
pub fn short_sweep(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Polar angle of `p` as seen from `center`.
#[must_use]
pub fn angle_from(center: &Point2, p: &Point2) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}
