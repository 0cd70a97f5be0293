use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{Point2, Transform};

use super::check_point;
use super::entity::Entity;

/// An owned list of entities drawn under an optional center offset and
/// transform.
///
/// When drawn, the children are first shifted by `-center`, then mapped
/// through `transform`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub children: Vec<Entity>,
    pub center: Option<Point2>,
    pub transform: Option<Transform>,
}

impl Group {
    #[must_use]
    pub fn new(children: Vec<Entity>) -> Self {
        Self {
            children,
            center: None,
            transform: None,
        }
    }

    #[must_use]
    pub fn with_center(mut self, center: Point2) -> Self {
        self.center = Some(center);
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// The combined map applied to children: center shift, then transform.
    #[must_use]
    pub fn placement(&self) -> Transform {
        let shift = self
            .center
            .map_or_else(Transform::identity, |c| Transform::translation(-c.x, -c.y));
        match &self.transform {
            Some(t) => shift.compose(t),
            None => shift,
        }
    }

    /// Validates the center and every child, depth first.
    ///
    /// # Errors
    ///
    /// Returns the first error found.
    pub fn validate(&self) -> Result<()> {
        if let Some(c) = &self.center {
            check_point("group", "center", c)?;
        }
        self.children.iter().try_for_each(Entity::validate)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Circle;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn placement_shifts_then_transforms() {
        let g = Group::new(Vec::new())
            .with_center(Point2::new(5.0, 0.0))
            .with_transform(Transform::rotation(FRAC_PI_2));
        let p = g.placement().apply(&Point2::new(6.0, 0.0));
        assert_abs_diff_eq!(p, Point2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn validate_descends_into_children() {
        let inner = Group::new(vec![Entity::Circle(
            Circle::new(Point2::origin(), 1.0).unwrap(),
        )]);
        let outer = Group::new(vec![Entity::Group(inner)]);
        assert!(outer.validate().is_ok());

        let bad = Group::new(Vec::new()).with_center(Point2::new(f64::NAN, 0.0));
        assert!(Group::new(vec![Entity::Group(bad)]).validate().is_err());
    }
}
