use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::Transform;

use super::{Circle, Ellipse, Group, Pen, Polyline, Text};

/// Pushes or pops a transform on the drawing stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformMarker {
    pub matrix: Transform,
    pub pop: bool,
}

impl TransformMarker {
    #[must_use]
    pub fn push(matrix: Transform) -> Self {
        Self { matrix, pop: false }
    }

    #[must_use]
    pub fn pop() -> Self {
        Self {
            matrix: Transform::identity(),
            pop: true,
        }
    }
}

/// One drawable item on a sheet.
///
/// Serialized with a `"kind"` tag next to the variant's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Circle(Circle),
    Ellipse(Ellipse),
    Polyline(Polyline),
    Text(Text),
    Group(Group),
    Transform(TransformMarker),
}

impl Entity {
    /// Short lowercase name of the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Circle(_) => "circle",
            Self::Ellipse(_) => "ellipse",
            Self::Polyline(_) => "polyline",
            Self::Text(_) => "text",
            Self::Group(_) => "group",
            Self::Transform(_) => "transform",
        }
    }

    /// The entity's own pen. Groups and transform markers have none.
    #[must_use]
    pub fn pen(&self) -> Option<&Pen> {
        match self {
            Self::Circle(c) => Some(c.pen()),
            Self::Ellipse(e) => Some(e.pen()),
            Self::Polyline(p) => Some(p.pen()),
            Self::Text(t) => Some(&t.pen),
            Self::Group(_) | Self::Transform(_) => None,
        }
    }

    pub fn pen_mut(&mut self) -> Option<&mut Pen> {
        match self {
            Self::Circle(c) => Some(c.pen_mut()),
            Self::Ellipse(e) => Some(e.pen_mut()),
            Self::Polyline(p) => Some(p.pen_mut()),
            Self::Text(t) => Some(&mut t.pen),
            Self::Group(_) | Self::Transform(_) => None,
        }
    }

    /// Re-checks the construction invariants, e.g. after deserializing.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Circle(c) => c.validate(),
            Self::Ellipse(e) => e.validate(),
            Self::Polyline(p) => p.validate(),
            Self::Text(t) => t.validate(),
            Self::Group(g) => g.validate(),
            Self::Transform(_) => Ok(()),
        }
    }
}

impl From<Circle> for Entity {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Ellipse> for Entity {
    fn from(e: Ellipse) -> Self {
        Self::Ellipse(e)
    }
}

impl From<Polyline> for Entity {
    fn from(p: Polyline) -> Self {
        Self::Polyline(p)
    }
}

impl From<Text> for Entity {
    fn from(t: Text) -> Self {
        Self::Text(t)
    }
}

impl From<Group> for Entity {
    fn from(g: Group) -> Self {
        Self::Group(g)
    }
}

impl From<TransformMarker> for Entity {
    fn from(m: TransformMarker) -> Self {
        Self::Transform(m)
    }
}
