use tracing::trace;

use crate::geometry::Circle;
use crate::math::{Point2, Transform, TOLERANCE};

use super::{ordered, IntersectTolerances};

/// Intersects two full circles.
///
/// Works in a frame with `c0` at the origin and `c1` on the positive x
/// axis: the crossings sit at `x = (r0² - r1² + D²) / 2D`,
/// `y = ±sqrt(r0² - x²)`. Returns nothing for coincident centers or
/// circles that do not meet, and a single point on tangency. The smaller
/// circle is always taken as `c0`, and the tangency cutoff scales with its
/// radius.
#[must_use]
pub fn circle_circle(c0: &Circle, c1: &Circle, tol: &IntersectTolerances) -> Vec<Point2> {
    let (c0, c1) = ordered(c0, c1, |c| [c.radius(), c.center().x, c.center().y]);
    let (r0, r1) = (c0.radius(), c1.radius());
    let cutoff = tol.tangent * r0.min(r1).powi(2);
    let delta = c1.center() - c0.center();
    let d = delta.norm();

    if d < TOLERANCE {
        trace!("coincident circle centers");
        return Vec::new();
    }
    if d > r0 + r1 {
        return Vec::new();
    }

    let x = -(r1 * r1 - (r0 * r0 + d * d)) / (2.0 * d);
    let yy = r0 * r0 - x * x;
    if yy < -cutoff {
        return Vec::new();
    }

    let to_world = Transform::rotation(delta.y.atan2(delta.x))
        .then_translate(c0.center().x, c0.center().y);

    if yy <= cutoff {
        return vec![to_world.apply(&Point2::new(x, 0.0))];
    }
    let y = yy.sqrt();
    vec![
        to_world.apply(&Point2::new(x, y)),
        to_world.apply(&Point2::new(x, -y)),
    ]
}
