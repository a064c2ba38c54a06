//! Scene entities and their interaction flags.

use crate::draw::{Shape, Style};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an entity within a scene.
///
/// Identities survive snapshot round-trips, so side tables keyed by
/// `EntityId` stay valid across undo and redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interaction flags captured by snapshots.
///
/// This is the complete allow-list of per-entity interaction state that the
/// history journal preserves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionFlags {
    /// Whether the entity can become the active selection
    pub selectable: bool,
    /// Whether pointer events are routed to the entity at all
    pub evented: bool,
    /// Extra distance (scene units) around the geometry that still counts as a hit
    pub hit_tolerance: f64,
    /// Whether the renderer may cache the entity's raster
    pub object_caching: bool,
}

impl Default for InteractionFlags {
    fn default() -> Self {
        Self {
            selectable: true,
            evented: true,
            hit_tolerance: 0.0,
            object_caching: true,
        }
    }
}

impl InteractionFlags {
    /// Flags for provisional preview geometry: never selected, never hit.
    pub fn inert() -> Self {
        Self {
            selectable: false,
            evented: false,
            hit_tolerance: 0.0,
            object_caching: false,
        }
    }

    /// Interactive flags with the given hit tolerance.
    pub fn interactive(hit_tolerance: f64) -> Self {
        Self {
            hit_tolerance,
            ..Self::default()
        }
    }
}

/// A renderable member of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub shape: Shape,
    pub style: Style,
    pub flags: InteractionFlags,
    /// Tool preview geometry; excluded from snapshots and notifications
    pub provisional: bool,
}
