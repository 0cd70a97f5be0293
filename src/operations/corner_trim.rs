use tracing::trace;

use crate::geometry::{JoinKind, Polyline};
use crate::math::arc_2d::{angle_from, short_sweep};
use crate::math::{Point2, Vector2, TOLERANCE};

/// A straight piece of a polyline after trimming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// The geometry drawn at one trimmed vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerJoin {
    /// Circular arc from the outgoing trim point to the incoming one.
    Arc {
        vertex: usize,
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    /// Straight cut from the outgoing trim point to the incoming one.
    Bevel {
        vertex: usize,
        start: Point2,
        end: Point2,
    },
}

impl CornerJoin {
    /// Index of the vertex this join replaces.
    #[must_use]
    pub fn vertex(&self) -> usize {
        match self {
            Self::Arc { vertex, .. } | Self::Bevel { vertex, .. } => *vertex,
        }
    }
}

/// Result of [`CornerTrim::execute`].
///
/// `segments[i]` is the piece that started at vertex `i`; for closed
/// polylines the last one runs back to vertex 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrimmedPolyline {
    pub segments: Vec<Segment>,
    pub joins: Vec<CornerJoin>,
}

/// Rounds or bevels the corners of a polyline by its join radius.
///
/// At each trimmed vertex `Pc`, with `A` and `B` pointing to its
/// neighbours and `T` half the angle between them, both incident segments
/// are cut back by `r / tan T` and the join arc is centered `r / sin T`
/// from `Pc` along the bisector. Open polylines keep their end vertices.
/// Vertices with a zero-length neighbour or a straight (or folded-back)
/// corner are left sharp.
#[derive(Debug)]
pub struct CornerTrim<'a> {
    pline: &'a Polyline,
}

impl<'a> CornerTrim<'a> {
    #[must_use]
    pub fn new(pline: &'a Polyline) -> Self {
        Self { pline }
    }

    /// Computes the trimmed segments and joins.
    ///
    /// A polyline that is a spline, has a `Point` join, a zero radius or
    /// fewer than three vertices comes back as plain segments.
    #[must_use]
    pub fn execute(&self) -> TrimmedPolyline {
        let mut segments: Vec<Segment> = self
            .pline
            .segments()
            .map(|(start, end)| Segment { start, end })
            .collect();
        let untrimmed = |segments| TrimmedPolyline {
            segments,
            joins: Vec::new(),
        };
        let bevel = match self.pline.join() {
            JoinKind::Point => return untrimmed(segments),
            JoinKind::Arc => false,
            JoinKind::Bevel => true,
        };
        if !self.pline.is_trimmable() {
            return untrimmed(segments);
        }

        let vertices = self.pline.vertices();
        let n = vertices.len();
        let radius = self.pline.join_radius();
        let corners = if self.pline.is_closed() { 0..n } else { 1..n - 1 };

        let mut joins = Vec::new();
        for i in corners {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            let Some(corner) = Corner::solve(&vertices[prev], &vertices[i], &vertices[next], radius)
            else {
                trace!(vertex = i, "corner left sharp");
                continue;
            };

            segments[prev].end = corner.incoming;
            segments[i].start = corner.outgoing;

            joins.push(if bevel {
                CornerJoin::Bevel {
                    vertex: i,
                    start: corner.outgoing,
                    end: corner.incoming,
                }
            } else {
                let start_angle = angle_from(&corner.center, &corner.outgoing);
                let end_angle = angle_from(&corner.center, &corner.incoming);
                CornerJoin::Arc {
                    vertex: i,
                    center: corner.center,
                    radius,
                    start_angle,
                    sweep: short_sweep(start_angle, end_angle),
                }
            });
        }

        TrimmedPolyline { segments, joins }
    }
}

/// Trim points and arc center at one vertex.
struct Corner {
    center: Point2,
    /// On the segment arriving at the vertex.
    incoming: Point2,
    /// On the segment leaving the vertex.
    outgoing: Point2,
}

impl Corner {
    fn solve(p1: &Point2, pc: &Point2, p2: &Point2, radius: f64) -> Option<Self> {
        let a = p1 - pc;
        let b = p2 - pc;
        let (la, lb) = (a.norm(), b.norm());
        if la < TOLERANCE || lb < TOLERANCE {
            return None;
        }

        let cos_full = (a.dot(&b) / (la * lb)).clamp(-1.0, 1.0);
        let half = cos_full.acos() / 2.0;
        let (sin_t, cos_t) = half.sin_cos();
        if sin_t.abs() < TOLERANCE || cos_t.abs() < TOLERANCE {
            return None;
        }
        let q = radius * cos_t / sin_t;
        let w = radius / sin_t;

        let pha_a = a.y.atan2(a.x);
        let pha_b = b.y.atan2(b.x);
        let pha_v = f64::atan2(
            (pha_a.sin() + pha_b.sin()) / 2.0,
            (pha_a.cos() + pha_b.cos()) / 2.0,
        );

        let dir = |angle: f64| Vector2::new(angle.cos(), angle.sin());
        Some(Self {
            center: pc + dir(pha_v) * w,
            incoming: pc + dir(pha_a) * q,
            outgoing: pc + dir(pha_b) * q,
        })
    }
}
