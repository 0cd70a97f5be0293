pub mod corner_trim;
pub mod intersect;

pub use corner_trim::{CornerJoin, CornerTrim, Segment, TrimmedPolyline};
pub use intersect::{intersect, Intersect, IntersectTolerances};
