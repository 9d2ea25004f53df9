//! Shared test scene.

use chair_host::{BlockState, PlayerId, PlayerSnapshot, SimWorld, Stairs};
use chair_math::{BlockFace, BlockVector, DVec3, Location};

pub const WORLD: &str = "world";

/// A seatable stair at `(0, 64, 0)` facing north, so the seated player looks
/// south. The floor is stone.
pub fn stair() -> BlockVector {
    BlockVector::new(WORLD, 0, 64, 0)
}

/// A loaded world with the stair from [`stair`] and a stone floor around it.
pub fn scene() -> SimWorld {
    let mut sim = SimWorld::new();
    sim.add_world(WORLD);
    sim.add_world("nether");
    for x in -3..=3 {
        for z in -3..=3 {
            sim.set_block(&BlockVector::new(WORLD, x, 63, z), BlockState::solid("stone", "stone"))
                .unwrap();
        }
    }
    sim.set_block(
        &stair(),
        BlockState::stairs("oak_stairs", Stairs::straight(BlockFace::North), "wood"),
    )
    .unwrap();
    sim
}

/// A permitted player standing one block south of the stair.
pub fn player_at(sim: &mut SimWorld, position: DVec3) -> PlayerId {
    let id = PlayerId::new_v4();
    sim.add_player(
        PlayerSnapshot::new(id, Location::new(WORLD, position)).with_permission("chair.use"),
    );
    id
}

/// A permitted player standing in front of the stair.
pub fn player(sim: &mut SimWorld) -> PlayerId {
    player_at(sim, DVec3::new(0.5, 64.0, 1.5))
}
