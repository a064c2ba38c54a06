//! Notifications emitted by the scene.

use super::entity::EntityId;

/// Kind of in-place change reported through [`SceneEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Geometry or style was rewritten
    Modified,
    /// Interactive scale transform in progress
    Scaling,
    /// Interactive rotate transform in progress
    Rotating,
}

/// Scene notification, queued in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Added(EntityId),
    Removed(EntityId),
    Modified(EntityId),
    Scaling(EntityId),
    Rotating(EntityId),
    /// The active selection changed (or was cleared)
    SelectionChanged(Option<EntityId>),
    /// A snapshot restore finished reconstructing the scene
    RestoreComplete,
}

impl SceneEvent {
    pub(crate) fn mutation(kind: MutationKind, id: EntityId) -> Self {
        match kind {
            MutationKind::Modified => SceneEvent::Modified(id),
            MutationKind::Scaling => SceneEvent::Scaling(id),
            MutationKind::Rotating => SceneEvent::Rotating(id),
        }
    }

    /// Returns true for the events the history journal records.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            SceneEvent::Added(_)
                | SceneEvent::Removed(_)
                | SceneEvent::Modified(_)
                | SceneEvent::Scaling(_)
                | SceneEvent::Rotating(_)
        )
    }
}
