use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{EntityError, Result};
use crate::math::Point2;

use super::pen::Pen;
use super::{check_angle, check_point};

/// A circle or circular arc.
///
/// The arc runs from `start` to `stop` (radians), counter-clockwise unless
/// `negative` is set. A freshly built circle is a full turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    center: Point2,
    radius: f64,
    start: f64,
    stop: f64,
    negative: bool,
    filled: bool,
    pen: Pen,
}

impl Circle {
    /// Creates a full circle with the default pen.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidParameter`] if the radius is not a
    /// positive finite number or the center is not finite.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        let circle = Self {
            center,
            radius,
            start: 0.0,
            stop: TAU,
            negative: false,
            filled: false,
            pen: Pen::default(),
        };
        circle.validate()?;
        Ok(circle)
    }

    /// Restricts the circle to an arc.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidParameter`] for non-finite angles.
    pub fn with_arc(mut self, start: f64, stop: f64, negative: bool) -> Result<Self> {
        check_angle("circle", "start", start)?;
        check_angle("circle", "stop", stop)?;
        self.start = start;
        self.stop = stop;
        self.negative = negative;
        Ok(self)
    }

    #[must_use]
    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    #[must_use]
    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = pen;
        self
    }

    /// Checks the stored parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        check_point("circle", "center", &self.center)?;
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(EntityError::invalid_parameter("circle", "radius", self.radius).into());
        }
        check_angle("circle", "start", self.start)?;
        check_angle("circle", "stop", self.stop)?;
        Ok(())
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn stop(&self) -> f64 {
        self.stop
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    #[must_use]
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn pen_mut(&mut self) -> &mut Pen {
        &mut self.pen
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FiguraError;

    #[test]
    fn new_is_full_turn() {
        let c = Circle::new(Point2::new(1.0, 2.0), 3.0).unwrap();
        assert!((c.radius() - 3.0).abs() < 1e-12);
        assert!(c.start().abs() < 1e-12);
        assert!((c.stop() - TAU).abs() < 1e-12);
        assert!(!c.is_negative());
        assert!(!c.is_filled());
    }

    #[test]
    fn zero_and_negative_radius_rejected() {
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Circle::new(Point2::origin(), r).unwrap_err();
            assert!(matches!(
                err,
                FiguraError::Entity(EntityError::InvalidParameter {
                    entity: "circle",
                    parameter: "radius",
                    ..
                })
            ));
        }
    }

    #[test]
    fn non_finite_center_rejected() {
        assert!(Circle::new(Point2::new(f64::NAN, 0.0), 1.0).is_err());
    }

    #[test]
    fn arc_parameters() {
        let c = Circle::new(Point2::origin(), 1.0)
            .unwrap()
            .with_arc(0.5, 2.0, true)
            .unwrap()
            .with_filled(true);
        assert!((c.start() - 0.5).abs() < 1e-12);
        assert!((c.stop() - 2.0).abs() < 1e-12);
        assert!(c.is_negative());
        assert!(c.is_filled());

        assert!(Circle::new(Point2::origin(), 1.0)
            .unwrap()
            .with_arc(f64::NAN, 1.0, false)
            .is_err());
    }
}
