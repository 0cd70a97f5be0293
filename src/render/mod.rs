//! Traversal contract for the painting backend.
//!
//! [`draw_list`] flattens a sheet into drawing commands in paint order.
//! Groups become explicit push/pop pairs around their children; polylines
//! arrive with their corner trimming or spline pieces already computed.

pub mod spline;

pub use spline::{bspline_to_bezier, CubicBezier};

use crate::geometry::{Circle, Ellipse, Entity, Polyline, Text};
use crate::math::{Point2, Transform};
use crate::operations::{CornerTrim, TrimmedPolyline};
use crate::sheet::Sheet;

/// One step for the painting backend.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<'a> {
    /// Pre-multiply the current transform by this one.
    PushTransform(Transform),
    /// Restore the transform saved by the matching push.
    PopTransform,
    Arc(&'a Circle),
    EllipseArc(&'a Ellipse),
    /// A polyline drawn with sharp corners.
    Path(&'a Polyline),
    /// A polyline with arc or bevel joins.
    Trimmed {
        pline: &'a Polyline,
        trimmed: TrimmedPolyline,
    },
    /// A spline as Bézier pieces.
    Spline {
        pline: &'a Polyline,
        curves: Vec<CubicBezier>,
    },
    /// A spline with too few vertices, drawn as vertex markers.
    Markers(&'a [Point2]),
    Text(&'a Text),
}

/// Walks the sheet in drawing order.
#[must_use]
pub fn draw_list(sheet: &Sheet) -> Vec<DrawCommand<'_>> {
    let mut out = Vec::new();
    for (_, entity) in sheet.iter() {
        emit(entity, &mut out);
    }
    out
}

fn emit<'a>(entity: &'a Entity, out: &mut Vec<DrawCommand<'a>>) {
    match entity {
        Entity::Circle(c) => out.push(DrawCommand::Arc(c)),
        Entity::Ellipse(e) => out.push(DrawCommand::EllipseArc(e)),
        Entity::Polyline(p) => out.push(polyline_command(p)),
        Entity::Text(t) => out.push(DrawCommand::Text(t)),
        Entity::Group(g) => {
            let placed = g.center.is_some() || g.transform.is_some();
            if placed {
                out.push(DrawCommand::PushTransform(g.placement()));
            }
            for child in &g.children {
                emit(child, out);
            }
            if placed {
                out.push(DrawCommand::PopTransform);
            }
        }
        Entity::Transform(m) => out.push(if m.pop {
            DrawCommand::PopTransform
        } else {
            DrawCommand::PushTransform(m.matrix)
        }),
    }
}

fn polyline_command(pline: &Polyline) -> DrawCommand<'_> {
    if pline.is_spline() {
        let closed = pline.is_closed() || pline.is_filled();
        return match bspline_to_bezier(pline.vertices(), closed) {
            Some(curves) => DrawCommand::Spline { pline, curves },
            None => DrawCommand::Markers(pline.vertices()),
        };
    }
    if pline.is_trimmable() {
        DrawCommand::Trimmed {
            pline,
            trimmed: CornerTrim::new(pline).execute(),
        }
    } else {
        DrawCommand::Path(pline)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Group, JoinKind};
    use crate::sheet::{DrawingContext, PolylineOptions, ShapeOptions};

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn group_wraps_children_in_push_pop() {
        let mut ctx = DrawingContext::new();
        let child = ctx
            .build_circle(Point2::origin(), 1.0, &ShapeOptions::default())
            .unwrap();
        ctx.append_group(
            vec![child.into()],
            Some(Point2::new(2.0, 3.0)),
            Some(Transform::rotation(1.0)),
        )
        .unwrap();

        let cmds = draw_list(ctx.sheet());
        assert_eq!(cmds.len(), 3);
        let DrawCommand::PushTransform(placement) = cmds[0] else {
            panic!("unexpected {:?}", cmds[0]);
        };
        // The center shift applies before the rotation.
        let moved = placement.apply(&Point2::new(3.0, 3.0));
        assert!((moved - Point2::new(1.0_f64.cos(), 1.0_f64.sin())).norm() < 1e-12);
        assert!(matches!(cmds[1], DrawCommand::Arc(_)));
        assert_eq!(cmds[2], DrawCommand::PopTransform);
    }

    #[test]
    fn transform_only_group_pushes_it_unchanged() {
        let mut sheet = Sheet::new();
        sheet.push(
            Group::new(Vec::new())
                .with_transform(Transform::scaling(2.0, 3.0))
                .into(),
        );
        let cmds = draw_list(&sheet);
        assert_eq!(cmds.len(), 2);
        let DrawCommand::PushTransform(t) = cmds[0] else {
            panic!("unexpected {:?}", cmds[0]);
        };
        let p = t.apply(&Point2::new(1.0, 1.0));
        assert!((p - Point2::new(2.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn bare_group_adds_no_transforms() {
        let mut sheet = Sheet::new();
        sheet.push(Group::new(Vec::new()).into());
        assert!(draw_list(&sheet).is_empty());
    }

    #[test]
    fn markers_map_to_push_and_pop() {
        let mut ctx = DrawingContext::new();
        ctx.append_transform(Transform::scaling(2.0, 2.0));
        ctx.append_pop_transform();
        let cmds = draw_list(ctx.sheet());
        assert_eq!(
            cmds,
            vec![
                DrawCommand::PushTransform(Transform::scaling(2.0, 2.0)),
                DrawCommand::PopTransform
            ]
        );
    }

    #[test]
    fn polyline_variants() {
        let mut ctx = DrawingContext::new();
        ctx.append_polyline(square(), &PolylineOptions::default()).unwrap();
        ctx.append_polyline(
            square(),
            &PolylineOptions {
                closed: true,
                join: JoinKind::Arc,
                join_radius: 1.0,
                ..PolylineOptions::default()
            },
        )
        .unwrap();
        ctx.append_polyline(
            square(),
            &PolylineOptions {
                spline: true,
                ..PolylineOptions::default()
            },
        )
        .unwrap();
        ctx.append_polyline(
            square()[..3].to_vec(),
            &PolylineOptions {
                spline: true,
                ..PolylineOptions::default()
            },
        )
        .unwrap();

        let cmds = draw_list(ctx.sheet());
        assert!(matches!(cmds[0], DrawCommand::Path(_)));
        match &cmds[1] {
            DrawCommand::Trimmed { trimmed, .. } => assert_eq!(trimmed.joins.len(), 4),
            other => panic!("unexpected {other:?}"),
        }
        match &cmds[2] {
            DrawCommand::Spline { curves, .. } => assert_eq!(curves.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
        match &cmds[3] {
            DrawCommand::Markers(points) => assert_eq!(points.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
    }
}
