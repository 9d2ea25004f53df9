//! The demo world and event script.
//!
//! The built-in scene is a stone floor with a row of stairs, some seatable and
//! some not, and three players with fixed ids:
//!
//! | Player | Id |
//! |---|---|
//! | alice | `00000000-0000-0000-0000-000000000001` |
//! | bob | `00000000-0000-0000-0000-000000000002` |
//! | carol | `00000000-0000-0000-0000-000000000003` |
//!
//! A script file is a JSON array of `{ "tick": n, "event": <HostEvent> }`
//! entries and may refer to these players.

use std::path::Path;

use anyhow::{Context, Result};
use chair_host::{Action, BlockState, Entity, HostEvent, PlayerId, PlayerSnapshot, SimWorld, StairShape, Stairs};
use chair_math::{BlockFace, BlockVector, DVec3, Location};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the main demo world.
pub const WORLD: &str = "world";

/// Stands in for entities the demo world does not simulate: the exploding
/// creeper, and the vehicle of a scripted dismount, which the world looks up
/// itself when it performs the dismount.
const UNSIMULATED: Entity = Entity::from_raw(u64::MAX);

/// Permission node the demo players hold.
const PERMISSION: &str = "chair.use";

/// The players of the built-in scene.
#[derive(Debug, Clone, Copy)]
pub struct Cast {
    pub alice: PlayerId,
    pub bob: PlayerId,
    pub carol: PlayerId,
}

impl Cast {
    fn new() -> Self {
        Self {
            alice: PlayerId(Uuid::from_u128(1)),
            bob: PlayerId(Uuid::from_u128(2)),
            carol: PlayerId(Uuid::from_u128(3)),
        }
    }
}

/// A host event delivered on a given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub tick: u64,
    pub event: HostEvent,
}

/// Host events ordered by the tick they are delivered on.
#[derive(Debug, Clone, Default)]
pub struct Script {
    events: Vec<ScriptedEvent>,
}

impl Script {
    /// Build a script; entries are delivered in tick order, ties in the given
    /// order.
    #[must_use]
    pub fn new(mut events: Vec<ScriptedEvent>) -> Self {
        events.sort_by_key(|e| e.tick);
        Self { events }
    }

    /// Events due on `tick`.
    pub fn due(&self, tick: u64) -> impl Iterator<Item = &HostEvent> {
        self.events
            .iter()
            .filter(move |e| e.tick == tick)
            .map(|e| &e.event)
    }

    /// The last tick any event is scheduled for.
    #[must_use]
    pub fn last_tick(&self) -> u64 {
        self.events.last().map_or(0, |e| e.tick)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Load a script from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> Result<Script> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let events: Vec<ScriptedEvent> = serde_json::from_str(&text)
        .with_context(|| format!("parsing script {}", path.display()))?;
    Ok(Script::new(events))
}

fn at(x: i32, y: i32, z: i32) -> BlockVector {
    BlockVector::new(WORLD, x, y, z)
}

/// Build the demo world.
///
/// Stairs at `y = 64`:
/// - `x = 0`: oak, straight, facing north: seatable.
/// - `x = 2`: oak, outer corner: not seatable.
/// - `x = 4`: stone, straight, with a slab two blocks above: no headroom.
/// - `x = 6`: spruce, straight, facing east: seatable from the west.
///
/// # Errors
///
/// Returns an error if the simulation rejects a block.
pub fn demo_scene() -> Result<(SimWorld, Cast)> {
    let mut sim = SimWorld::new();
    sim.add_world(WORLD);
    sim.add_world("nether");

    for x in -4..=8 {
        for z in -4..=4 {
            sim.set_block(&at(x, 63, z), BlockState::solid("stone", "stone"))?;
        }
    }
    sim.set_block(
        &at(0, 64, 0),
        BlockState::stairs("oak_stairs", Stairs::straight(BlockFace::North), "wood"),
    )?;
    sim.set_block(
        &at(2, 64, 0),
        BlockState::stairs(
            "oak_stairs",
            Stairs::straight(BlockFace::North).with_shape(StairShape::OuterLeft),
            "wood",
        ),
    )?;
    sim.set_block(
        &at(4, 64, 0),
        BlockState::stairs("stone_stairs", Stairs::straight(BlockFace::North), "stone"),
    )?;
    sim.set_block(&at(4, 66, 0), BlockState::solid("stone_slab", "stone"))?;
    sim.set_block(
        &at(6, 64, 0),
        BlockState::stairs("spruce_stairs", Stairs::straight(BlockFace::East), "wood"),
    )?;

    let cast = Cast::new();
    for (id, position) in [
        (cast.alice, DVec3::new(0.5, 64.0, 1.5)),
        (cast.bob, DVec3::new(5.5, 64.0, 0.5)),
        (cast.carol, DVec3::new(2.5, 64.0, 1.5)),
    ] {
        sim.add_player(
            PlayerSnapshot::new(id, Location::new(WORLD, position)).with_permission(PERMISSION),
        );
    }
    Ok((sim, cast))
}

fn right_click(tick: u64, player: PlayerId, block: BlockVector) -> ScriptedEvent {
    ScriptedEvent {
        tick,
        event: HostEvent::Interact {
            player,
            action: Action::RightClickBlock,
            block: Some(block),
        },
    }
}

/// The built-in script: players sit, get up, get pushed and blown off their
/// seats, and one of them leaves. Bob is still seated when it ends.
#[must_use]
pub fn demo_script(cast: &Cast) -> Script {
    Script::new(vec![
        right_click(1, cast.alice, at(0, 64, 0)),
        right_click(2, cast.carol, at(2, 64, 0)),
        right_click(3, cast.bob, at(6, 64, 0)),
        right_click(4, cast.carol, at(0, 64, 0)),
        ScriptedEvent {
            tick: 6,
            event: HostEvent::Dismount {
                passenger: cast.alice,
                vehicle: UNSIMULATED,
            },
        },
        right_click(8, cast.alice, at(0, 64, 0)),
        ScriptedEvent {
            tick: 10,
            event: HostEvent::PistonExtend {
                piston: at(-1, 64, 0),
                moved: vec![at(0, 64, 0), at(1, 64, 0)],
            },
        },
        ScriptedEvent {
            tick: 12,
            event: HostEvent::EntityExplode {
                entity: UNSIMULATED,
                affected: vec![at(5, 64, 0), at(6, 64, 0)],
            },
        },
        right_click(14, cast.alice, at(0, 64, 0)),
        ScriptedEvent {
            tick: 16,
            event: HostEvent::Quit {
                player: cast.alice,
            },
        },
        right_click(18, cast.bob, at(6, 64, 0)),
    ])
}

#[cfg(test)]
mod tests {
    use chair_core::{ChairConfig, qualifier};
    use chair_host::Host;

    use super::*;

    #[test]
    fn test_scene_stairs() {
        let (sim, cast) = demo_scene().unwrap();
        let config = ChairConfig::default();
        let alice = sim.player(cast.alice).unwrap();
        let bob = sim.player(cast.bob).unwrap();
        let carol = sim.player(cast.carol).unwrap();

        assert!(qualifier::can_sit(&sim, &at(0, 64, 0), &alice, &config));
        assert!(qualifier::can_sit(&sim, &at(6, 64, 0), &bob, &config));
        assert!(!qualifier::can_sit(&sim, &at(2, 64, 0), &carol, &config));
        assert!(!qualifier::can_sit(&sim, &at(4, 64, 0), &carol, &config));
    }

    #[test]
    fn test_script_ordering() {
        let script = Script::new(vec![
            ScriptedEvent {
                tick: 5,
                event: HostEvent::BlockBreak { block: at(0, 64, 0) },
            },
            ScriptedEvent {
                tick: 2,
                event: HostEvent::BlockBreak { block: at(1, 64, 0) },
            },
            ScriptedEvent {
                tick: 2,
                event: HostEvent::BlockBreak { block: at(2, 64, 0) },
            },
        ]);
        assert_eq!(script.len(), 3);
        assert_eq!(script.last_tick(), 5);
        let due: Vec<_> = script.due(2).collect();
        assert_eq!(
            due,
            vec![
                &HostEvent::BlockBreak { block: at(1, 64, 0) },
                &HostEvent::BlockBreak { block: at(2, 64, 0) },
            ]
        );
        assert_eq!(script.due(3).count(), 0);
    }

    #[test]
    fn test_script_json() {
        let json = r#"[
            {"tick": 1, "event": {"type": "interact",
                "player": "00000000-0000-0000-0000-000000000001",
                "action": "right_click_block",
                "block": {"world": "world", "x": 0, "y": 64, "z": 0}}},
            {"tick": 3, "event": {"type": "quit",
                "player": "00000000-0000-0000-0000-000000000001"}}
        ]"#;
        let events: Vec<ScriptedEvent> = serde_json::from_str(json).unwrap();
        let script = Script::new(events);
        let cast = Cast::new();
        assert_eq!(script.last_tick(), 3);
        assert_eq!(
            script.due(3).next(),
            Some(&HostEvent::Quit { player: cast.alice })
        );
    }

    #[test]
    fn test_demo_script_ends_on_tick_18() {
        let (_, cast) = demo_scene().unwrap();
        let script = demo_script(&cast);
        assert!(!script.is_empty());
        assert_eq!(script.last_tick(), 18);
    }
}
