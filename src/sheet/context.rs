use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{EntityError, Result};
use crate::geometry::{
    Alignment, Circle, Ellipse, Entity, Group, JoinKind, Pen, Polyline, Text, TransformMarker,
};
use crate::math::{Point2, Transform};
use crate::operations::intersect;

use super::{EntityId, Sheet};

/// Optional parameters for circles and ellipses.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOptions {
    pub start: f64,
    pub stop: f64,
    pub negative: bool,
    pub filled: bool,
    /// Pen to copy; the context's default pen when `None`.
    pub pen: Option<Pen>,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: TAU,
            negative: false,
            filled: false,
            pen: None,
        }
    }
}

/// Optional parameters for polylines and splines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolylineOptions {
    pub closed: bool,
    pub filled: bool,
    pub spline: bool,
    pub join: JoinKind,
    pub join_radius: f64,
    pub pen: Option<Pen>,
}

/// Optional parameters for text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub font: String,
    pub size: u32,
    pub text_size: f64,
    pub rotation: f64,
    pub alignment: Alignment,
    pub justify: bool,
    pub letter_spacing: i32,
    pub line_spacing: i32,
    pub filled: bool,
    pub pen: Option<Pen>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font: "Sans".to_owned(),
            size: 12,
            text_size: 1.0,
            rotation: 0.0,
            alignment: Alignment::Left,
            justify: false,
            letter_spacing: 0,
            line_spacing: 0,
            filled: true,
            pen: None,
        }
    }
}

/// Builds entities onto a sheet.
///
/// Holds the sheet and the current default pen. `build_*` methods return
/// a detached entity (for nesting in groups); `append_*` methods also add
/// it to the sheet. Every built entity owns a copy of its pen.
#[derive(Debug, Default)]
pub struct DrawingContext {
    sheet: Sheet,
    pen: Pen,
}

impl DrawingContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing sheet.
    #[must_use]
    pub fn with_sheet(sheet: Sheet) -> Self {
        Self {
            sheet,
            pen: Pen::default(),
        }
    }

    #[must_use]
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut Sheet {
        &mut self.sheet
    }

    #[must_use]
    pub fn into_sheet(self) -> Sheet {
        self.sheet
    }

    /// The pen copied into entities built without an explicit one.
    #[must_use]
    pub fn default_pen(&self) -> &Pen {
        &self.pen
    }

    pub fn set_default_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn pen_for(&self, pen: Option<&Pen>) -> Pen {
        pen.unwrap_or(&self.pen).clone()
    }

    /// Builds a circle or circular arc.
    ///
    /// # Errors
    ///
    /// Returns an error (already logged) for a non-positive radius or
    /// non-finite parameters. Nothing is built in that case.
    pub fn build_circle(&self, center: Point2, radius: f64, opts: &ShapeOptions) -> Result<Circle> {
        Ok(Circle::new(center, radius)?
            .with_arc(opts.start, opts.stop, opts.negative)?
            .with_filled(opts.filled)
            .with_pen(self.pen_for(opts.pen.as_ref())))
    }

    /// Builds a circle and appends it to the sheet.
    ///
    /// # Errors
    ///
    /// See [`DrawingContext::build_circle`]; the sheet is left unchanged.
    pub fn append_circle(&mut self, center: Point2, radius: f64, opts: &ShapeOptions) -> Result<EntityId> {
        let circle = self.build_circle(center, radius, opts)?;
        Ok(self.sheet.push(circle.into()))
    }

    /// Builds an ellipse or elliptical arc.
    ///
    /// # Errors
    ///
    /// Returns an error (already logged) for a non-positive semi-axis or
    /// non-finite parameters.
    pub fn build_ellipse(
        &self,
        center: Point2,
        semi_axis_a: f64,
        semi_axis_b: f64,
        rotation: f64,
        opts: &ShapeOptions,
    ) -> Result<Ellipse> {
        Ok(Ellipse::new(center, semi_axis_a, semi_axis_b, rotation)?
            .with_arc(opts.start, opts.stop, opts.negative)?
            .with_filled(opts.filled)
            .with_pen(self.pen_for(opts.pen.as_ref())))
    }

    /// Builds an ellipse and appends it to the sheet.
    ///
    /// # Errors
    ///
    /// See [`DrawingContext::build_ellipse`].
    pub fn append_ellipse(
        &mut self,
        center: Point2,
        semi_axis_a: f64,
        semi_axis_b: f64,
        rotation: f64,
        opts: &ShapeOptions,
    ) -> Result<EntityId> {
        let ellipse = self.build_ellipse(center, semi_axis_a, semi_axis_b, rotation, opts)?;
        Ok(self.sheet.push(ellipse.into()))
    }

    /// Builds a polyline or spline.
    ///
    /// # Errors
    ///
    /// Returns an error (already logged) for a non-finite vertex or an
    /// invalid join radius.
    pub fn build_polyline(&self, vertices: Vec<Point2>, opts: &PolylineOptions) -> Result<Polyline> {
        Ok(Polyline::new(vertices, opts.closed)?
            .with_join(opts.join, opts.join_radius)?
            .with_spline(opts.spline)
            .with_filled(opts.filled)
            .with_pen(self.pen_for(opts.pen.as_ref())))
    }

    /// Builds a polyline and appends it to the sheet.
    ///
    /// # Errors
    ///
    /// See [`DrawingContext::build_polyline`].
    pub fn append_polyline(&mut self, vertices: Vec<Point2>, opts: &PolylineOptions) -> Result<EntityId> {
        let pline = self.build_polyline(vertices, opts)?;
        Ok(self.sheet.push(pline.into()))
    }

    /// Builds a text label.
    ///
    /// # Errors
    ///
    /// Returns an error (already logged) for a non-finite anchor or
    /// rotation, or a non-positive text scale.
    pub fn build_text(&self, position: Point2, string: &str, opts: &TextOptions) -> Result<Text> {
        let text = Text {
            position,
            string: string.to_owned(),
            font: opts.font.clone(),
            size: opts.size,
            text_size: opts.text_size,
            rotation: opts.rotation,
            alignment: opts.alignment,
            justify: opts.justify,
            letter_spacing: opts.letter_spacing,
            line_spacing: opts.line_spacing,
            filled: opts.filled,
            pen: self.pen_for(opts.pen.as_ref()),
        };
        text.validate()?;
        Ok(text)
    }

    /// Builds a text label and appends it to the sheet.
    ///
    /// # Errors
    ///
    /// See [`DrawingContext::build_text`].
    pub fn append_text(&mut self, position: Point2, string: &str, opts: &TextOptions) -> Result<EntityId> {
        let text = self.build_text(position, string, opts)?;
        Ok(self.sheet.push(text.into()))
    }

    /// Wraps already built entities in a group.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite center or an invalid child.
    pub fn build_group(
        &self,
        children: Vec<Entity>,
        center: Option<Point2>,
        transform: Option<Transform>,
    ) -> Result<Group> {
        let group = Group {
            children,
            center,
            transform,
        };
        group.validate()?;
        Ok(group)
    }

    /// Builds a group and appends it to the sheet.
    ///
    /// # Errors
    ///
    /// See [`DrawingContext::build_group`].
    pub fn append_group(
        &mut self,
        children: Vec<Entity>,
        center: Option<Point2>,
        transform: Option<Transform>,
    ) -> Result<EntityId> {
        let group = self.build_group(children, center, transform)?;
        Ok(self.sheet.push(group.into()))
    }

    /// Appends a marker that pushes `matrix` onto the drawing stack.
    pub fn append_transform(&mut self, matrix: Transform) -> EntityId {
        self.sheet.push(TransformMarker::push(matrix).into())
    }

    /// Appends a marker that pops the last pushed transform.
    pub fn append_pop_transform(&mut self) -> EntityId {
        self.sheet.push(TransformMarker::pop().into())
    }

    /// Appends an entity built elsewhere, after re-checking it.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn append_entity(&mut self, entity: Entity) -> Result<EntityId> {
        entity.validate()?;
        Ok(self.sheet.push(entity))
    }

    /// Deletes an entity and everything it owns.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotFound`] if `id` is not on the sheet.
    pub fn delete(&mut self, id: EntityId) -> std::result::Result<(), EntityError> {
        self.sheet.delete(id)
    }

    pub fn clear(&mut self) {
        self.sheet.clear();
    }

    /// Intersection points of two entities on the sheet.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotFound`] if either id is not on the sheet.
    pub fn intersect(&self, a: EntityId, b: EntityId) -> std::result::Result<Vec<Point2>, EntityError> {
        let points = intersect(self.sheet.get(a)?, self.sheet.get(b)?);
        debug!(count = points.len(), "intersection computed");
        Ok(points)
    }
}
