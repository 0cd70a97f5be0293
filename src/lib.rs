pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod render;
pub mod sheet;

pub use error::{FiguraError, Result};
pub use operations::{intersect, CornerTrim, Intersect};
pub use sheet::{DrawingContext, EntityId, Sheet};
