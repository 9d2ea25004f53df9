//! Seating configuration.

use serde::{Deserialize, Serialize};

/// Permission node required to sit, unless configured otherwise.
pub const DEFAULT_PERMISSION: &str = "chair.use";

/// Tunables for seat qualification, placement and teardown.
///
/// Every field has a default, so a partial JSON document deserialises into a
/// complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChairConfig {
    /// Permission node a player must hold to sit.
    pub permission: String,
    /// Height of the seat anchor above the cell's base, at the cell's center.
    pub seat_height: f64,
    /// Maximum squared distance from the player to the seat anchor.
    pub max_reach_squared: f64,
    /// How far the anchor is pushed along the facing direction, clear of the
    /// stair riser.
    pub riser_nudge: f64,
    /// Teleport-out only applies to players within this squared distance of
    /// the anchor.
    pub teleport_out_radius_squared: f64,
    /// Defer the teleport-out after a dismount to the next tick, for hosts
    /// that settle positions a tick later.
    pub defer_dismount_teleport: bool,
    /// Play the stair's hit sound when a player sits down.
    pub feedback_sound: bool,
}

impl Default for ChairConfig {
    fn default() -> Self {
        Self {
            permission: DEFAULT_PERMISSION.to_string(),
            seat_height: 0.3,
            max_reach_squared: 4.0,
            riser_nudge: 0.2,
            teleport_out_radius_squared: 1.0,
            defer_dismount_teleport: true,
            feedback_sound: true,
        }
    }
}

impl ChairConfig {
    /// Override the permission node.
    #[must_use]
    pub fn with_permission(mut self, node: impl Into<String>) -> Self {
        self.permission = node.into();
        self
    }

    /// Choose whether dismount teleport-out is deferred one tick.
    #[must_use]
    pub fn with_deferred_dismount(mut self, defer: bool) -> Self {
        self.defer_dismount_teleport = defer;
        self
    }

    /// Enable or disable the feedback sound.
    #[must_use]
    pub fn with_feedback_sound(mut self, enabled: bool) -> Self {
        self.feedback_sound = enabled;
        self
    }
}
