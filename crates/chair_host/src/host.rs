//! The collaborator contract between the seating core and its host.
//!
//! All calls are synchronous and happen on the host's single event-processing
//! thread, so implementations need no internal locking.

use chair_math::{BlockVector, Location};
use serde::{Deserialize, Serialize};

use crate::block::BlockState;
use crate::entity::{Entity, PlayerId};
use crate::error::HostError;
use crate::player::PlayerSnapshot;

/// Flags for spawned entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerFlags {
    /// Whether the entity survives a restart.
    pub persistent: bool,
    pub visible: bool,
    /// Marker mode: no collision box, no interaction.
    pub marker: bool,
}

impl MarkerFlags {
    /// Flags of a seat marker: transient, invisible, non-colliding.
    pub const SEAT: MarkerFlags = MarkerFlags {
        persistent: false,
        visible: false,
        marker: true,
    };
}

/// A sound to play at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundEffect {
    /// Sound key, e.g. `"block.wood.hit"`.
    pub key: String,
    pub volume: f32,
    pub pitch: f32,
}

impl SoundEffect {
    /// A sound at full volume and normal pitch.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            volume: 1.0,
            pitch: 1.0,
        }
    }
}

/// Read access to block geometry.
pub trait BlockAccess {
    /// The state of the block at `at`, or `None` if the world does not exist.
    fn block_at(&self, at: &BlockVector) -> Option<BlockState>;

    /// Returns `true` if the cell exists and can be moved through.
    fn is_passable(&self, at: &BlockVector) -> bool {
        self.block_at(at).is_some_and(|block| block.passable)
    }
}

/// The services the seating core consumes from the world simulation.
pub trait Host: BlockAccess {
    /// Current state of an online player.
    fn player(&self, id: PlayerId) -> Option<PlayerSnapshot>;

    /// Spawn a marker entity at `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation cannot or will not spawn it.
    fn spawn_marker(&mut self, at: &Location, flags: MarkerFlags) -> Result<Entity, HostError>;

    /// Remove an entity, ejecting its passengers. Removing an entity that no
    /// longer exists is a no-op.
    fn despawn(&mut self, entity: Entity);

    /// Returns `true` while the entity is alive in the simulation.
    fn is_valid(&self, entity: Entity) -> bool;

    /// Players currently riding `entity`.
    fn passengers(&self, entity: Entity) -> Vec<PlayerId>;

    /// Make `player` ride `vehicle`.
    ///
    /// # Errors
    ///
    /// Returns an error if either party is gone or the simulation refuses.
    fn mount(&mut self, vehicle: Entity, player: PlayerId) -> Result<(), HostError>;

    /// Move a player, setting both position and facing.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is offline or cannot be moved.
    fn teleport(&mut self, player: PlayerId, to: &Location) -> Result<(), HostError>;

    /// Fire-and-forget sound playback.
    fn play_sound(&mut self, at: &Location, sound: &SoundEffect);
}
