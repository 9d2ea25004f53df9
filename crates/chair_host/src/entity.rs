//! Entity and player identifiers.
//!
//! The seating core only ever holds ids of marker entities it spawned itself.
//! Whether such an entity still exists is the host's business
//! ([`Host::is_valid`](crate::Host::is_valid)); an id on its own says nothing
//! about liveness.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an entity in the host simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(u64);

impl Entity {
    /// Wrap a host-assigned id.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Hands out entity ids for a simulation.
///
/// Ids only ever grow: a despawned entity's id is never issued again, so a
/// stale id held by the registry can never name a newer entity.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    last: u64,
}

impl EntityAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next unused id.
    pub fn allocate(&mut self) -> Entity {
        self.last += 1;
        Entity(self.last)
    }
}

/// Stable identity of a player, independent of connection or entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a random player id.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocated_ids_never_repeat() {
        let mut ids = EntityAllocator::new();
        let issued: Vec<Entity> = (0..100).map(|_| ids.allocate()).collect();
        let distinct: std::collections::HashSet<_> = issued.iter().collect();
        assert_eq!(distinct.len(), issued.len());
        assert!(issued.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_entity_display_and_json() {
        let marker = Entity::from_raw(7);
        assert_eq!(marker.to_string(), "entity#7");
        assert_eq!(serde_json::to_string(&marker).unwrap(), "7");
        assert_eq!(serde_json::from_str::<Entity>("7").unwrap(), marker);
    }

    #[test]
    fn test_player_ids_are_distinct() {
        assert_ne!(PlayerId::new_v4(), PlayerId::new_v4());
    }

    #[test]
    fn test_player_id_serializes_as_plain_uuid() {
        let id = PlayerId(Uuid::nil());
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"00000000-0000-0000-0000-000000000000\""
        );
    }
}
