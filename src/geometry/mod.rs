pub mod circle;
pub mod color;
pub mod ellipse;
pub mod entity;
pub mod group;
pub mod pen;
pub mod polyline;
pub mod text;

pub use circle::Circle;
pub use color::{ColorResolver, NamedColors};
pub use ellipse::Ellipse;
pub use entity::{Entity, TransformMarker};
pub use group::Group;
pub use pen::{LineStyle, Pen, Rgba, ISO_PEN_WIDTHS};
pub use polyline::{JoinKind, Polyline};
pub use text::{Alignment, Text};

use crate::error::{EntityError, Result};
use crate::math::Point2;

fn check_point(entity: &'static str, parameter: &'static str, p: &Point2) -> Result<()> {
    for v in [p.x, p.y] {
        if !v.is_finite() {
            return Err(EntityError::invalid_parameter(entity, parameter, v).into());
        }
    }
    Ok(())
}

fn check_angle(entity: &'static str, parameter: &'static str, angle: f64) -> Result<()> {
    if angle.is_finite() {
        Ok(())
    } else {
        Err(EntityError::invalid_parameter(entity, parameter, angle).into())
    }
}
