//! Seat qualification.
//!
//! Decides, from block geometry and player state alone, whether a player may
//! sit on a block. Only a plain, bottom-half, straight stair with headroom and
//! open space in front of it qualifies, and only for a player standing next to
//! it on the same level. Checks run in a fixed order and stop at the first
//! failure; nothing here has side effects.

use chair_host::{BlockAccess, GameMode, Half, PlayerSnapshot, StairShape};
use chair_math::{BlockFace, BlockVector, DVec3};

use crate::config::ChairConfig;
use crate::error::Unsuitable;

/// The point seat distances are measured from: the cell's horizontal center,
/// `seat_height` above its base.
#[must_use]
pub fn reference_point(block: &BlockVector, config: &ChairConfig) -> DVec3 {
    block.point(DVec3::new(0.5, config.seat_height, 0.5))
}

/// Run every check for `player` sitting on `block`.
///
/// On success returns the face the seated player looks out of (the stair's
/// open side).
///
/// # Errors
///
/// Returns the first check that failed.
pub fn check(
    world: &impl BlockAccess,
    block: &BlockVector,
    player: &PlayerSnapshot,
    config: &ChairConfig,
) -> Result<BlockFace, Unsuitable> {
    check_player(player, config)?;

    let state = world.block_at(block).ok_or(Unsuitable::Missing)?;
    let stairs = state.as_stairs().ok_or(Unsuitable::NotStairs)?;
    if stairs.half != Half::Bottom {
        return Err(Unsuitable::TopHalf);
    }
    if stairs.shape != StairShape::Straight {
        return Err(Unsuitable::NotStraight);
    }

    for height in 1..=2 {
        if !world.is_passable(&block.relative(BlockFace::Up, height)) {
            return Err(Unsuitable::NoHeadroom);
        }
    }

    if !player.location.in_world(&block.world) || player.location.block_y() != block.y {
        return Err(Unsuitable::DifferentLevel);
    }

    let open_face = stairs.facing.opposite();
    if !world.is_passable(&block.relative(open_face, 1)) {
        return Err(Unsuitable::Blocked);
    }

    if player.location.distance_squared(reference_point(block, config)) > config.max_reach_squared {
        return Err(Unsuitable::OutOfReach);
    }

    Ok(open_face)
}

/// Returns `true` if `player` may sit on `block`.
#[must_use]
pub fn can_sit(
    world: &impl BlockAccess,
    block: &BlockVector,
    player: &PlayerSnapshot,
    config: &ChairConfig,
) -> bool {
    check(world, block, player, config).is_ok()
}

fn check_player(player: &PlayerSnapshot, config: &ChairConfig) -> Result<(), Unsuitable> {
    if player.sneaking {
        return Err(Unsuitable::Sneaking);
    }
    if player.game_mode == GameMode::Spectator {
        return Err(Unsuitable::Spectating);
    }
    if player.is_mounted() {
        return Err(Unsuitable::Mounted);
    }
    if !player.on_ground {
        return Err(Unsuitable::Airborne);
    }
    if !player.has_permission(&config.permission) {
        return Err(Unsuitable::NoPermission);
    }
    Ok(())
}
