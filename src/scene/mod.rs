//! In-memory scene graph.
//!
//! The [`Scene`] is the single source of truth for everything on the drawing
//! surface: the ordered entity list (first = bottom, last = top), the active
//! selection, and a queue of [`SceneEvent`] notifications that observers
//! drain in emission order.
//!
//! Provisional entities are tool previews. They live in the entity list so the
//! surface can show them, but they never appear in snapshots and creating,
//! updating or removing them emits no mutation notifications.

mod entity;
mod events;
mod snapshot;

pub use entity::{Entity, EntityId, InteractionFlags};
pub use events::{MutationKind, SceneEvent};
pub use snapshot::Snapshot;

use crate::draw::{Shape, Style};
use crate::util::Point;
use log::debug;
use thiserror::Error;

/// Errors raised while capturing or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("snapshot contains entity {0} more than once")]
    DuplicateEntity(EntityId),
}

/// Ordered collection of entities plus selection and notification queue.
#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<Entity>,
    active: Option<EntityId>,
    next_id: u64,
    events: Vec<SceneEvent>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entities in draw order, provisional ones included.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities that are part of the document (not tool previews).
    pub fn permanent_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| !entity.provisional)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    fn allocate_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    /// Adds a permanent entity on top and emits `Added`.
    pub fn add_entity(&mut self, shape: Shape, style: Style, flags: InteractionFlags) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(Entity {
            id,
            shape,
            style,
            flags,
            provisional: false,
        });
        self.events.push(SceneEvent::Added(id));
        id
    }

    /// Adds inert preview geometry on top without notifying anyone.
    pub fn add_provisional(&mut self, shape: Shape, style: Style) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(Entity {
            id,
            shape,
            style,
            flags: InteractionFlags::inert(),
            provisional: true,
        });
        id
    }

    /// Applies `update` to a provisional entity. Returns false when `id` is
    /// missing or not provisional.
    pub fn update_provisional(&mut self, id: EntityId, update: impl FnOnce(&mut Entity)) -> bool {
        match self.get_mut(id) {
            Some(entity) if entity.provisional => {
                update(entity);
                true
            }
            _ => false,
        }
    }

    /// Turns a provisional entity into a permanent one and emits `Added`.
    pub fn promote(&mut self, id: EntityId, flags: InteractionFlags) -> bool {
        let Some(entity) = self.get_mut(id) else {
            return false;
        };
        if !entity.provisional {
            return false;
        }
        entity.provisional = false;
        entity.flags = flags;
        self.events.push(SceneEvent::Added(id));
        true
    }

    /// Applies `update` to a permanent entity and emits the matching mutation event.
    pub fn modify_entity(
        &mut self,
        id: EntityId,
        kind: MutationKind,
        update: impl FnOnce(&mut Entity),
    ) -> bool {
        match self.get_mut(id) {
            Some(entity) if !entity.provisional => {
                update(entity);
                self.events.push(SceneEvent::mutation(kind, id));
                true
            }
            _ => false,
        }
    }

    /// Moves a permanent entity and emits `Modified`.
    pub fn translate_entity(&mut self, id: EntityId, dx: f64, dy: f64) -> bool {
        self.modify_entity(id, MutationKind::Modified, |entity| {
            entity.shape.translate(dx, dy)
        })
    }

    /// Overwrites interaction flags without emitting a notification.
    ///
    /// Tools use this to suspend and restore interactivity; it is not a
    /// document change.
    pub fn set_flags(&mut self, id: EntityId, flags: InteractionFlags) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.flags = flags;
                true
            }
            None => false,
        }
    }

    /// Removes an entity. Emits `Removed` unless it was provisional.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|entity| entity.id == id)?;
        let entity = self.entities.remove(index);
        if self.active == Some(id) {
            self.set_active_entity(None);
        }
        if !entity.provisional {
            self.events.push(SceneEvent::Removed(id));
        }
        Some(entity)
    }

    /// Removes every entity, provisional ones included.
    pub fn clear_all(&mut self) {
        self.set_active_entity(None);
        for entity in self.entities.drain(..) {
            if !entity.provisional {
                self.events.push(SceneEvent::Removed(entity.id));
            }
        }
    }

    pub fn active_entity(&self) -> Option<EntityId> {
        self.active
    }

    /// Changes the active selection, emitting `SelectionChanged` when it differs.
    ///
    /// Only existing, selectable, permanent entities can become active.
    pub fn set_active_entity(&mut self, id: Option<EntityId>) -> bool {
        if let Some(candidate) = id {
            let allowed = self
                .get(candidate)
                .is_some_and(|entity| !entity.provisional && entity.flags.selectable);
            if !allowed {
                return false;
            }
        }
        if self.active != id {
            self.active = id;
            self.events.push(SceneEvent::SelectionChanged(id));
        }
        true
    }

    /// Returns the topmost evented permanent entity under `point`.
    pub fn hit_test(&self, point: Point) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .filter(|entity| !entity.provisional && entity.flags.evented)
            .find(|entity| entity.shape.contains(point, entity.flags.hit_tolerance))
            .map(|entity| entity.id)
    }

    /// Captures every permanent entity.
    pub fn snapshot(&self) -> Result<Snapshot, SceneError> {
        snapshot::encode(self.entities.iter())
    }

    /// Replaces the scene with the contents of `snapshot`.
    ///
    /// The snapshot is parsed completely before the scene is touched, so a
    /// malformed snapshot leaves the scene as it was. On success the scene is
    /// cleared, rebuilt, and a `RestoreComplete` notification is queued after
    /// the notifications the rebuild produced.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SceneError> {
        let entities = snapshot::decode(snapshot)?;

        self.clear_all();
        for entity in entities {
            self.next_id = self.next_id.max(entity.id.0);
            self.events.push(SceneEvent::Added(entity.id));
            self.entities.push(entity);
        }
        self.events.push(SceneEvent::RestoreComplete);

        debug!("Restored scene with {} entities", self.entities.len());
        Ok(())
    }

    /// Drains queued notifications in emission order.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::Rect {
            x,
            y,
            width: w,
            height: h,
        }
    }

    #[test]
    fn add_and_remove_emit_notifications() {
        let mut scene = Scene::new();
        let id = scene.add_entity(
            rect(0.0, 0.0, 10.0, 10.0),
            Style::default(),
            InteractionFlags::default(),
        );
        scene.remove_entity(id);

        assert_eq!(
            scene.take_events(),
            vec![SceneEvent::Added(id), SceneEvent::Removed(id)]
        );
        assert!(scene.is_empty());
    }

    #[test]
    fn provisional_lifecycle_is_silent_until_promotion() {
        let mut scene = Scene::new();
        let id = scene.add_provisional(rect(0.0, 0.0, 0.0, 0.0), Style::default());
        assert!(scene.update_provisional(id, |entity| {
            entity.shape = rect(0.0, 0.0, 5.0, 5.0);
        }));
        assert!(scene.take_events().is_empty());

        assert!(scene.promote(id, InteractionFlags::default()));
        assert_eq!(scene.take_events(), vec![SceneEvent::Added(id)]);
        assert!(!scene.update_provisional(id, |_| {}));
    }

    #[test]
    fn selection_rejects_unselectable_entities() {
        let mut scene = Scene::new();
        let locked = scene.add_entity(
            rect(0.0, 0.0, 10.0, 10.0),
            Style::default(),
            InteractionFlags {
                selectable: false,
                ..InteractionFlags::default()
            },
        );
        let preview = scene.add_provisional(rect(0.0, 0.0, 1.0, 1.0), Style::default());
        scene.take_events();

        assert!(!scene.set_active_entity(Some(locked)));
        assert!(!scene.set_active_entity(Some(preview)));
        assert_eq!(scene.active_entity(), None);
        assert!(scene.take_events().is_empty());
    }

    #[test]
    fn hit_test_prefers_topmost_and_skips_non_evented() {
        let mut scene = Scene::new();
        let bottom = scene.add_entity(
            rect(0.0, 0.0, 100.0, 100.0),
            Style::default(),
            InteractionFlags::default(),
        );
        let top = scene.add_entity(
            rect(10.0, 10.0, 20.0, 20.0),
            Style::default(),
            InteractionFlags::default(),
        );
        assert_eq!(scene.hit_test(Point::new(15.0, 15.0)), Some(top));

        let mut flags = InteractionFlags::default();
        flags.evented = false;
        scene.set_flags(top, flags);
        assert_eq!(scene.hit_test(Point::new(15.0, 15.0)), Some(bottom));
        assert_eq!(scene.hit_test(Point::new(150.0, 15.0)), None);
    }

    #[test]
    fn restore_round_trip_is_idempotent() {
        let mut scene = Scene::new();
        scene.add_entity(
            rect(1.0, 2.0, 3.0, 4.0),
            Style::default(),
            InteractionFlags::interactive(2.0),
        );
        let snapshot = scene.snapshot().unwrap();

        scene.restore(&snapshot).unwrap();
        scene.restore(&snapshot).unwrap();
        assert_eq!(scene.snapshot().unwrap(), snapshot);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn restore_queues_completion_after_rebuild_events() {
        let mut scene = Scene::new();
        let id = scene.add_entity(
            rect(0.0, 0.0, 1.0, 1.0),
            Style::default(),
            InteractionFlags::default(),
        );
        let snapshot = scene.snapshot().unwrap();
        scene.take_events();

        scene.restore(&snapshot).unwrap();
        assert_eq!(
            scene.take_events(),
            vec![
                SceneEvent::Removed(id),
                SceneEvent::Added(id),
                SceneEvent::RestoreComplete
            ]
        );
    }

    #[test]
    fn malformed_restore_leaves_scene_untouched() {
        let mut scene = Scene::new();
        scene.add_entity(
            rect(0.0, 0.0, 1.0, 1.0),
            Style::default(),
            InteractionFlags::default(),
        );
        let before = scene.snapshot().unwrap();
        scene.take_events();

        assert!(scene.restore(&Snapshot::from_json("[]")).is_err());
        assert_eq!(scene.snapshot().unwrap(), before);
        assert!(scene.take_events().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_restore() {
        let mut scene = Scene::new();
        let first = scene.add_entity(
            rect(0.0, 0.0, 1.0, 1.0),
            Style::default(),
            InteractionFlags::default(),
        );
        let snapshot = scene.snapshot().unwrap();
        let second = scene.add_entity(
            rect(0.0, 0.0, 1.0, 1.0),
            Style::default(),
            InteractionFlags::default(),
        );

        scene.restore(&snapshot).unwrap();
        let third = scene.add_entity(
            rect(0.0, 0.0, 1.0, 1.0),
            Style::default(),
            InteractionFlags::default(),
        );
        assert_ne!(third, first);
        assert_ne!(third, second);
    }
}
