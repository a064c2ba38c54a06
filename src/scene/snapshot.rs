use super::SceneError;
use super::entity::{Entity, EntityId, InteractionFlags};
use crate::draw::{Shape, Style};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const CURRENT_VERSION: u32 = 1;

/// Opaque, serialised capture of every permanent entity in a scene.
///
/// Two snapshots compare equal exactly when they describe the same scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    /// Wraps an already-encoded snapshot. No validation happens until restore.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self(json.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    entities: Vec<EntityRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EntityRecord {
    id: EntityId,
    shape: Shape,
    style: Style,
    flags: InteractionFlags,
}

pub(super) fn encode<'a>(entities: impl Iterator<Item = &'a Entity>) -> Result<Snapshot, SceneError> {
    let file = SnapshotFile {
        version: CURRENT_VERSION,
        entities: entities
            .filter(|entity| !entity.provisional)
            .map(|entity| EntityRecord {
                id: entity.id,
                shape: entity.shape.clone(),
                style: entity.style,
                flags: entity.flags,
            })
            .collect(),
    };
    Ok(Snapshot(serde_json::to_string(&file)?))
}

/// Parses a snapshot fully before anything touches the live scene.
pub(super) fn decode(snapshot: &Snapshot) -> Result<Vec<Entity>, SceneError> {
    let file: SnapshotFile = serde_json::from_str(&snapshot.0)?;
    if file.version != CURRENT_VERSION {
        return Err(SceneError::UnsupportedVersion(file.version));
    }

    let mut seen = HashSet::with_capacity(file.entities.len());
    let mut entities = Vec::with_capacity(file.entities.len());
    for record in file.entities {
        if !seen.insert(record.id) {
            return Err(SceneError::DuplicateEntity(record.id));
        }
        entities.push(Entity {
            id: record.id,
            shape: record.shape,
            style: record.style,
            flags: record.flags,
            provisional: false,
        });
    }
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Point;

    fn entity(id: u64, provisional: bool) -> Entity {
        Entity {
            id: EntityId(id),
            shape: Shape::Line {
                from: Point::new(0.0, 0.0),
                to: Point::new(5.0, 5.0),
            },
            style: Style::default(),
            flags: InteractionFlags::default(),
            provisional,
        }
    }

    #[test]
    fn encode_skips_provisional_entities() {
        let entities = [entity(1, false), entity(2, true)];
        let snapshot = encode(entities.iter()).unwrap();
        let decoded = decode(&snapshot).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, EntityId(1));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode(&Snapshot::from_json("{not json")).unwrap_err();
        assert!(matches!(err, SceneError::MalformedSnapshot(_)));
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let err = decode(&Snapshot::from_json(r#"{"version":99,"entities":[]}"#)).unwrap_err();
        assert!(matches!(err, SceneError::UnsupportedVersion(99)));
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let entities = [entity(4, false), entity(4, false)];
        let snapshot = encode(entities.iter()).unwrap();
        let err = decode(&snapshot).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateEntity(EntityId(4))));
    }
}
