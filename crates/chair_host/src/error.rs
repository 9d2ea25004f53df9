//! Host-side error types.

use chair_math::Location;

use crate::entity::{Entity, PlayerId};

/// Errors a host can report when asked to change world state.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The named world is not loaded.
    #[error("no such world: {0}")]
    UnknownWorld(String),

    /// The player is not online.
    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),

    /// The entity does not exist (or no longer exists).
    #[error("no such entity: {0}")]
    UnknownEntity(Entity),

    /// The simulation declined to spawn an entity.
    #[error("entity spawn refused at {0}")]
    SpawnRefused(Location),

    /// The simulation declined to mount the player.
    #[error("{player} cannot mount {vehicle}")]
    MountRefused {
        /// The player that was to be mounted.
        player: PlayerId,
        /// The intended vehicle.
        vehicle: Entity,
    },

    /// The simulation declined to move the player.
    #[error("{0} cannot be teleported")]
    TeleportRefused(PlayerId),

    /// The player is riding a vehicle and cannot be moved.
    #[error("{0} is riding a vehicle")]
    Mounted(PlayerId),
}
