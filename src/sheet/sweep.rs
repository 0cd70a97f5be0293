//! Batch construction from scalars and parallel sequences.
//!
//! A swept argument is either one value, used for every item, or a
//! sequence with one value per item. All sequences in a call must have the
//! same length; scalars are broadcast against them.

use tracing::warn;

use crate::error::{EntityError, Result};
use crate::math::Point2;

use super::context::{DrawingContext, ShapeOptions};
use super::EntityId;

/// One value for every item, or one value per item.
#[derive(Debug, Clone, PartialEq)]
pub enum Sweep<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> Sweep<T> {
    /// Number of values, or `None` for a broadcast scalar.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::One(_) => None,
            Self::Many(v) => Some(v.len()),
        }
    }

    /// The value for item `index`.
    ///
    /// Callers index within the length agreed by [`batch_len`].
    fn at(&self, index: usize) -> T {
        match self {
            Self::One(v) => v.clone(),
            Self::Many(v) => v[index].clone(),
        }
    }
}

impl Sweep<f64> {
    /// `count` values starting at `start`, each `increment` apart.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stepped(start: f64, increment: f64, count: usize) -> Self {
        Self::Many((0..count).map(|i| start + increment * i as f64).collect())
    }
}

impl From<f64> for Sweep<f64> {
    fn from(v: f64) -> Self {
        Self::One(v)
    }
}

impl From<Vec<f64>> for Sweep<f64> {
    fn from(v: Vec<f64>) -> Self {
        Self::Many(v)
    }
}

impl From<Point2> for Sweep<Point2> {
    fn from(p: Point2) -> Self {
        Self::One(p)
    }
}

impl From<Vec<Point2>> for Sweep<Point2> {
    fn from(v: Vec<Point2>) -> Self {
        Self::Many(v)
    }
}

/// Number of items a set of swept arguments produces.
///
/// All scalars give one item.
///
/// # Errors
///
/// Returns [`EntityError::SweepLengthMismatch`] when two sequences differ
/// in length.
pub fn batch_len(lens: &[Option<usize>]) -> std::result::Result<usize, EntityError> {
    let mut agreed: Option<usize> = None;
    for &len in lens.iter().flatten() {
        match agreed {
            None => agreed = Some(len),
            Some(expected) if expected != len => {
                return Err(EntityError::SweepLengthMismatch {
                    expected,
                    found: len,
                });
            }
            Some(_) => {}
        }
    }
    Ok(agreed.unwrap_or(1))
}

impl DrawingContext {
    /// Appends one circle per item of the swept arguments.
    ///
    /// Items that fail validation are logged and skipped. Returns the ids
    /// of the circles that were appended, in order.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::SweepLengthMismatch`] before appending
    /// anything if the sequences disagree in length.
    pub fn append_circles(
        &mut self,
        centers: &Sweep<Point2>,
        radii: &Sweep<f64>,
        opts: &ShapeOptions,
    ) -> Result<Vec<EntityId>> {
        let n = batch_len(&[centers.len(), radii.len()])?;
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            match self.append_circle(centers.at(i), radii.at(i), opts) {
                Ok(id) => ids.push(id),
                Err(err) => warn!(index = i, %err, "skipped swept circle"),
            }
        }
        Ok(ids)
    }

    /// Appends one ellipse per item of the swept arguments.
    ///
    /// Items that fail validation are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::SweepLengthMismatch`] before appending
    /// anything if the sequences disagree in length.
    pub fn append_ellipses(
        &mut self,
        centers: &Sweep<Point2>,
        semi_axes_a: &Sweep<f64>,
        semi_axes_b: &Sweep<f64>,
        rotations: &Sweep<f64>,
        opts: &ShapeOptions,
    ) -> Result<Vec<EntityId>> {
        let n = batch_len(&[
            centers.len(),
            semi_axes_a.len(),
            semi_axes_b.len(),
            rotations.len(),
        ])?;
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let built = self.append_ellipse(
                centers.at(i),
                semi_axes_a.at(i),
                semi_axes_b.at(i),
                rotations.at(i),
                opts,
            );
            match built {
                Ok(id) => ids.push(id),
                Err(err) => warn!(index = i, %err, "skipped swept ellipse"),
            }
        }
        Ok(ids)
    }
}
