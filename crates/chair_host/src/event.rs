//! Events delivered by the host simulation.
//!
//! Events arrive independently and in no guaranteed order. Most refer to
//! blocks or entities the seating core knows nothing about; handlers treat
//! those as no-ops.

use chair_math::BlockVector;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, PlayerId};

/// The kind of player interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RightClickBlock,
    LeftClickBlock,
    RightClickAir,
    LeftClickAir,
    /// Stepping on a pressure plate, trampling farmland and the like.
    Physical,
}

/// An event delivered by the host simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A player interacted with the world.
    Interact {
        player: PlayerId,
        action: Action,
        /// The clicked block, for block interactions.
        #[serde(default)]
        block: Option<BlockVector>,
    },
    /// A player is disconnecting. Delivered while the player is still
    /// present in the world.
    Quit { player: PlayerId },
    /// A player stopped riding `vehicle`, for any reason.
    Dismount { passenger: PlayerId, vehicle: Entity },
    /// A block was broken.
    BlockBreak { block: BlockVector },
    /// A block exploded, destroying `affected`.
    BlockExplode {
        block: BlockVector,
        affected: Vec<BlockVector>,
    },
    /// An entity exploded, destroying `affected`.
    EntityExplode {
        entity: Entity,
        affected: Vec<BlockVector>,
    },
    /// A piston extended, pushing `moved`.
    PistonExtend {
        piston: BlockVector,
        moved: Vec<BlockVector>,
    },
    /// A piston retracted, pulling `moved`.
    PistonRetract {
        piston: BlockVector,
        moved: Vec<BlockVector>,
    },
}

impl HostEvent {
    /// Short name of the event kind, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            HostEvent::Interact { .. } => "interact",
            HostEvent::Quit { .. } => "quit",
            HostEvent::Dismount { .. } => "dismount",
            HostEvent::BlockBreak { .. } => "block_break",
            HostEvent::BlockExplode { .. } => "block_explode",
            HostEvent::EntityExplode { .. } => "entity_explode",
            HostEvent::PistonExtend { .. } => "piston_extend",
            HostEvent::PistonRetract { .. } => "piston_retract",
        }
    }
}
