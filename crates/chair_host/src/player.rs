//! Player state snapshots.

use std::collections::BTreeSet;

use chair_math::Location;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, PlayerId};

/// A player's game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

/// Player state at the moment it was queried from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    /// Current position and facing.
    pub location: Location,
    pub sneaking: bool,
    pub game_mode: GameMode,
    /// The entity the player is riding, if any.
    pub vehicle: Option<Entity>,
    pub on_ground: bool,
    /// Permission nodes granted to the player.
    #[serde(default)]
    pub permissions: BTreeSet<String>,
}

impl PlayerSnapshot {
    /// A standing survival player with no permissions.
    #[must_use]
    pub fn new(id: PlayerId, location: Location) -> Self {
        Self {
            id,
            location,
            sneaking: false,
            game_mode: GameMode::Survival,
            vehicle: None,
            on_ground: true,
            permissions: BTreeSet::new(),
        }
    }

    /// Grant a permission node.
    #[must_use]
    pub fn with_permission(mut self, node: impl Into<String>) -> Self {
        self.permissions.insert(node.into());
        self
    }

    /// Returns `true` if the player holds `node`.
    #[must_use]
    pub fn has_permission(&self, node: &str) -> bool {
        self.permissions.contains(node)
    }

    /// Returns `true` if the player is riding any entity.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.vehicle.is_some()
    }
}
