//! Reasons a seating interaction is declined.
//!
//! None of these are failures of the host: every variant ends in "no seat
//! created" with no partial state left behind.

use chair_host::{HostError, PlayerId};
use chair_math::BlockVector;

/// A failed geometry or player-state check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Unsuitable {
    #[error("player is sneaking")]
    Sneaking,
    #[error("player is spectating")]
    Spectating,
    #[error("player is already riding something")]
    Mounted,
    #[error("player is not on the ground")]
    Airborne,
    #[error("player lacks the seating permission")]
    NoPermission,
    #[error("block does not exist")]
    Missing,
    #[error("block is not a stair")]
    NotStairs,
    #[error("stair is upside down")]
    TopHalf,
    #[error("stair is a corner")]
    NotStraight,
    #[error("no headroom above the stair")]
    NoHeadroom,
    #[error("player stands on a different level")]
    DifferentLevel,
    #[error("no open space in front of the stair")]
    Blocked,
    #[error("stair is out of reach")]
    OutOfReach,
}

/// Why `try_sit` did not create a seat.
#[derive(Debug, thiserror::Error)]
pub enum SitError {
    /// Someone is already sitting there.
    #[error("seat at {0} is occupied")]
    Occupied(BlockVector),

    /// The block or the player does not qualify.
    #[error("cannot sit: {0}")]
    Unsuitable(#[from] Unsuitable),

    /// The player is not online.
    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),

    /// The host did not spawn the marker entity.
    #[error("marker spawn failed: {0}")]
    Spawn(#[source] HostError),

    /// The player could not be moved to the seat; the marker was removed.
    #[error("moving player to seat failed: {0}")]
    Place(#[source] HostError),

    /// The player could not be mounted on the marker; the marker was removed
    /// and the player moved back.
    #[error("mount failed: {0}")]
    Mount(#[source] HostError),
}
