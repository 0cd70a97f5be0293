pub mod context;
pub mod sweep;

pub use context::{DrawingContext, PolylineOptions, ShapeOptions, TextOptions};
pub use sweep::Sweep;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tracing::debug;

use crate::error::EntityError;
use crate::geometry::Entity;

slotmap::new_key_type! {
    /// Unique identifier for an entity on a sheet.
    pub struct EntityId;
}

/// One drawing surface: an arena of entities plus their drawing order.
///
/// Ids stay valid until the entity is removed; a removed id is never
/// handed out again.
#[derive(Debug, Default)]
pub struct Sheet {
    entities: SlotMap<EntityId, Entity>,
    order: Vec<EntityId>,
    redraw: bool,
}

/// Serializable form of a whole sheet, entities in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetRecord {
    pub entities: Vec<Entity>,
}

impl Sheet {
    /// Creates a new, empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entity at the end of the drawing order.
    pub fn push(&mut self, entity: Entity) -> EntityId {
        let kind = entity.kind();
        let id = self.entities.insert(entity);
        self.order.push(id);
        self.redraw = true;
        debug!(kind, ?id, "entity appended");
        id
    }

    /// Returns the entity, or an error if it is not on this sheet.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotFound`] for unknown or removed ids.
    pub fn get(&self, id: EntityId) -> Result<&Entity, EntityError> {
        self.entities.get(id).ok_or(EntityError::NotFound)
    }

    /// Returns a mutable reference to the entity.
    ///
    /// Edits made through it do not raise the redraw signal; callers that
    /// change geometry should call [`Sheet::request_redraw`].
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotFound`] for unknown or removed ids.
    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity, EntityError> {
        self.entities.get_mut(id).ok_or(EntityError::NotFound)
    }

    /// Detaches an entity and hands it back to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotFound`] for unknown or removed ids.
    pub fn remove(&mut self, id: EntityId) -> Result<Entity, EntityError> {
        let entity = self.entities.remove(id).ok_or(EntityError::NotFound)?;
        self.order.retain(|&o| o != id);
        self.redraw = true;
        debug!(kind = entity.kind(), ?id, "entity removed");
        Ok(entity)
    }

    /// Removes an entity and drops it along with everything it owns.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotFound`] for unknown or already deleted ids.
    pub fn delete(&mut self, id: EntityId) -> Result<(), EntityError> {
        self.remove(id).map(drop)
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        debug!(count = self.order.len(), "sheet cleared");
        self.entities.clear();
        self.order.clear();
        self.redraw = true;
    }

    /// Entities in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.entities.get(id).map(|e| (id, e)))
    }

    /// Ids in drawing order.
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Marks the sheet as needing a repaint.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Returns whether a repaint was requested since the last call, and
    /// resets the signal.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Copies the entities, in drawing order, into a record.
    #[must_use]
    pub fn to_record(&self) -> SheetRecord {
        SheetRecord {
            entities: self.iter().map(|(_, e)| e.clone()).collect(),
        }
    }

    /// Rebuilds a sheet from a record, re-checking every entity.
    ///
    /// # Errors
    ///
    /// Returns the first invalid entity parameter found.
    pub fn from_record(record: SheetRecord) -> crate::error::Result<Self> {
        let mut sheet = Self::new();
        for entity in record.entities {
            entity.validate()?;
            sheet.push(entity);
        }
        Ok(sheet)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, Polyline, TransformMarker};
    use crate::math::Point2;

    fn circle(r: f64) -> Entity {
        Circle::new(Point2::origin(), r).unwrap().into()
    }

    #[test]
    fn push_keeps_order_and_signals() {
        let mut sheet = Sheet::new();
        assert!(!sheet.take_redraw());
        let a = sheet.push(circle(1.0));
        let b = sheet.push(circle(2.0));
        assert!(sheet.take_redraw());
        assert!(!sheet.take_redraw());
        assert_eq!(sheet.ids(), &[a, b]);
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn delete_is_single_shot() {
        let mut sheet = Sheet::new();
        let a = sheet.push(circle(1.0));
        let b = sheet.push(circle(2.0));
        sheet.delete(a).unwrap();
        assert_eq!(sheet.delete(a), Err(EntityError::NotFound));
        assert_eq!(sheet.get(a).unwrap_err(), EntityError::NotFound);
        assert_eq!(sheet.ids(), &[b]);
    }

    #[test]
    fn remove_returns_ownership() {
        let mut sheet = Sheet::new();
        let id = sheet.push(circle(3.0));
        let Entity::Circle(c) = sheet.remove(id).unwrap() else {
            panic!("expected circle");
        };
        assert!((c.radius() - 3.0).abs() < 1e-12);
        assert!(sheet.is_empty());
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut sheet = Sheet::new();
        let id = sheet.push(circle(1.0));
        sheet.get_mut(id).unwrap().pen_mut().unwrap().width = 0.7;
        assert!((sheet.get(id).unwrap().pen().unwrap().width - 0.7).abs() < 1e-12);
    }

    #[test]
    fn clear_empties_everything() {
        let mut sheet = Sheet::new();
        let id = sheet.push(circle(1.0));
        sheet.push(TransformMarker::pop().into());
        sheet.take_redraw();
        sheet.clear();
        assert!(sheet.is_empty());
        assert!(sheet.get(id).is_err());
        assert!(sheet.take_redraw());
    }

    #[test]
    fn record_preserves_order() {
        let mut sheet = Sheet::new();
        sheet.push(circle(1.0));
        sheet.push(
            Polyline::new(vec![Point2::origin(), Point2::new(1.0, 1.0)], false)
                .unwrap()
                .into(),
        );
        let json = serde_json::to_string(&sheet.to_record()).unwrap();
        let back = Sheet::from_record(serde_json::from_str(&json).unwrap()).unwrap();
        let kinds: Vec<_> = back.iter().map(|(_, e)| e.kind()).collect();
        assert_eq!(kinds, ["circle", "polyline"]);
        assert_eq!(back.to_record(), sheet.to_record());
    }
}
