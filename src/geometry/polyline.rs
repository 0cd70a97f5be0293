use serde::{Deserialize, Serialize};

use crate::error::{EntityError, Result};
use crate::math::Point2;

use super::pen::Pen;

/// How the corners of a polyline are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinKind {
    /// Sharp corner at the vertex.
    #[default]
    Point,
    /// Rounded with a circular arc of the join radius.
    Arc,
    /// Cut off with a straight bevel.
    Bevel,
}

impl JoinKind {
    /// Maps a join index to a kind. Unknown indices mean `Point`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Arc,
            2 => Self::Bevel,
            _ => Self::Point,
        }
    }
}

/// An open or closed sequence of vertices, drawn as straight segments or
/// as a uniform cubic B-spline through its control polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    vertices: Vec<Point2>,
    closed: bool,
    filled: bool,
    spline: bool,
    join: JoinKind,
    join_radius: f64,
    pen: Pen,
}

impl Polyline {
    /// Creates a polyline with sharp corners and the default pen.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidVertex`] for the first non-finite vertex.
    pub fn new(vertices: Vec<Point2>, closed: bool) -> Result<Self> {
        let pline = Self {
            vertices,
            closed,
            filled: false,
            spline: false,
            join: JoinKind::Point,
            join_radius: 0.0,
            pen: Pen::default(),
        };
        pline.validate()?;
        Ok(pline)
    }

    /// Sets the corner treatment.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidParameter`] if `radius` is negative
    /// or not finite.
    pub fn with_join(mut self, join: JoinKind, radius: f64) -> Result<Self> {
        check_join_radius(radius)?;
        self.join = join;
        self.join_radius = radius;
        Ok(self)
    }

    #[must_use]
    pub fn with_spline(mut self, spline: bool) -> Self {
        self.spline = spline;
        self
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

    /// Checks the stored vertices and join radius.
    ///
    /// # Errors
    ///
    /// Returns the first invalid vertex or parameter.
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self
            .vertices
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(EntityError::invalid_vertex(index).into());
        }
        check_join_radius(self.join_radius)
    }

    /// Iterates the straight segments between consecutive vertices.
    ///
    /// Closed polylines with at least three vertices also yield the
    /// segment from the last vertex back to the first.
    pub fn segments(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        let count = match n {
            0 | 1 => 0,
            2 => 1,
            _ if self.closed => n,
            _ => n - 1,
        };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Whether corner trimming applies: a non-spline polyline with at
    /// least three vertices and an arc or bevel join of positive radius.
    #[must_use]
    pub fn is_trimmable(&self) -> bool {
        !self.spline
            && self.join != JoinKind::Point
            && self.join_radius > 0.0
            && self.vertices.len() > 2
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    #[must_use]
    pub fn is_spline(&self) -> bool {
        self.spline
    }

    #[must_use]
    pub fn join(&self) -> JoinKind {
        self.join
    }

    #[must_use]
    pub fn join_radius(&self) -> f64 {
        self.join_radius
    }

    #[must_use]
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn pen_mut(&mut self) -> &mut Pen {
        &mut self.pen
    }
}

fn check_join_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(EntityError::invalid_parameter("polyline", "join_radius", radius).into())
    }
}
