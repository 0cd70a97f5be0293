use serde::{Deserialize, Serialize};

use crate::error::{EntityError, Result};
use crate::math::Point2;

use super::pen::Pen;
use super::{check_angle, check_point};

/// Horizontal alignment of text lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A text label. Only its anchor takes part in geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub position: Point2,
    pub string: String,
    pub font: String,
    /// Font size in points.
    pub size: u32,
    /// Scale applied to the laid-out text.
    pub text_size: f64,
    pub rotation: f64,
    pub alignment: Alignment,
    pub justify: bool,
    pub letter_spacing: i32,
    pub line_spacing: i32,
    pub filled: bool,
    pub pen: Pen,
}

impl Text {
    /// Checks the anchor, rotation and scale.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        check_point("text", "position", &self.position)?;
        check_angle("text", "rotation", self.rotation)?;
        if !(self.text_size.is_finite() && self.text_size > 0.0) {
            return Err(EntityError::invalid_parameter("text", "text_size", self.text_size).into());
        }
        Ok(())
    }
}
