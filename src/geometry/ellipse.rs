use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{EntityError, Result};
use crate::math::{Point2, Transform, TOLERANCE};

use super::circle::Circle;
use super::pen::Pen;
use super::{check_angle, check_point};

/// An ellipse or elliptical arc.
///
/// Semi-axis `a` points along `(cos rotation, sin rotation)` in world
/// space; semi-axis `b` is perpendicular to it. Arc angles are measured in
/// the ellipse's own frame.
///
/// Rotation is counter-clockwise with y up, and it is stored that way.
/// Drawings that measure the angle clockwise must negate it on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    center: Point2,
    semi_axis_a: f64,
    semi_axis_b: f64,
    rotation: f64,
    start: f64,
    stop: f64,
    negative: bool,
    filled: bool,
    pen: Pen,
}

impl Ellipse {
    /// Creates a full ellipse with the default pen.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidParameter`] if a semi-axis is not a
    /// positive finite number, or the center or rotation is not finite.
    pub fn new(center: Point2, semi_axis_a: f64, semi_axis_b: f64, rotation: f64) -> Result<Self> {
        let ellipse = Self {
            center,
            semi_axis_a,
            semi_axis_b,
            rotation,
            start: 0.0,
            stop: TAU,
            negative: false,
            filled: false,
            pen: Pen::default(),
        };
        ellipse.validate()?;
        Ok(ellipse)
    }

    /// The same shape as `circle`, as an unrotated ellipse.
    #[must_use]
    pub fn from_circle(circle: &Circle) -> Self {
        Self {
            center: *circle.center(),
            semi_axis_a: circle.radius(),
            semi_axis_b: circle.radius(),
            rotation: 0.0,
            start: circle.start(),
            stop: circle.stop(),
            negative: circle.is_negative(),
            filled: circle.is_filled(),
            pen: circle.pen().clone(),
        }
    }

    /// Restricts the ellipse to an arc.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidParameter`] for non-finite angles.
    pub fn with_arc(mut self, start: f64, stop: f64, negative: bool) -> Result<Self> {
        check_angle("ellipse", "start", start)?;
        check_angle("ellipse", "stop", stop)?;
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
        check_point("ellipse", "center", &self.center)?;
        for (name, value) in [("semi_axis_a", self.semi_axis_a), ("semi_axis_b", self.semi_axis_b)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EntityError::invalid_parameter("ellipse", name, value).into());
            }
        }
        check_angle("ellipse", "rotation", self.rotation)?;
        check_angle("ellipse", "start", self.start)?;
        check_angle("ellipse", "stop", self.stop)?;
        Ok(())
    }

    /// Whether both semi-axes are equal within tolerance.
    #[must_use]
    pub fn is_circle(&self) -> bool {
        let scale = self.semi_axis_a.abs().max(self.semi_axis_b.abs()).max(1.0);
        (self.semi_axis_a - self.semi_axis_b).abs() <= TOLERANCE * scale
    }

    /// Transform from world coordinates into the axis-aligned frame
    /// centered on the ellipse.
    #[must_use]
    pub fn to_local(&self) -> Transform {
        Transform::translation(-self.center.x, -self.center.y).then_rotate(-self.rotation)
    }

    /// Transform from the ellipse's local frame back to world coordinates.
    #[must_use]
    pub fn to_world(&self) -> Transform {
        Transform::rotation(self.rotation).then_translate(self.center.x, self.center.y)
    }

    #[must_use]
    pub fn world_to_local(&self, p: &Point2) -> Point2 {
        self.to_local().apply(p)
    }

    #[must_use]
    pub fn local_to_world(&self, p: &Point2) -> Point2 {
        self.to_world().apply(p)
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn semi_axis_a(&self) -> f64 {
        self.semi_axis_a
    }

    #[must_use]
    pub fn semi_axis_b(&self) -> f64 {
        self.semi_axis_b
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
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
