//! In-memory host simulation.
//!
//! [`SimWorld`] holds block cells per named world, online players and the
//! marker entities they ride. It behaves like a real host where the seating
//! core can observe it: removing an entity ejects its passengers and emits a
//! [`HostEvent::Dismount`], and a mounted player cannot be teleported. It also
//! lets tests inject the failures a live simulation produces on its own.

use std::collections::{HashMap, VecDeque};

use chair_math::{BlockVector, IVec3, Location};
use tracing::debug;

use crate::block::BlockState;
use crate::entity::{Entity, EntityAllocator, PlayerId};
use crate::error::HostError;
use crate::event::HostEvent;
use crate::host::{BlockAccess, Host, MarkerFlags, SoundEffect};
use crate::player::PlayerSnapshot;

/// A live marker entity.
#[derive(Debug, Clone)]
pub struct Marker {
    pub location: Location,
    pub flags: MarkerFlags,
    pub passengers: Vec<PlayerId>,
}

/// An in-memory world simulation implementing [`Host`].
#[derive(Debug, Default)]
pub struct SimWorld {
    /// Block cells per world. Cells not present are air.
    worlds: HashMap<String, HashMap<IVec3, BlockState>>,
    /// Entity ID allocator.
    allocator: EntityAllocator,
    /// Live marker entities.
    markers: HashMap<Entity, Marker>,
    /// Online players.
    players: HashMap<PlayerId, PlayerSnapshot>,
    /// Sounds played so far, oldest first.
    sounds: Vec<(Location, SoundEffect)>,
    /// Events produced by the simulation itself, waiting to be delivered.
    outbox: VecDeque<HostEvent>,
    refuse_next_spawn: bool,
    refuse_next_mount: bool,
    refuse_next_teleport: bool,
}

impl SimWorld {
    /// Create a simulation with no worlds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an empty world.
    pub fn add_world(&mut self, name: impl Into<String>) {
        self.worlds.entry(name.into()).or_default();
    }

    /// Unload a world with all of its cells.
    ///
    /// Returns `true` if the world was loaded.
    pub fn remove_world(&mut self, name: &str) -> bool {
        self.worlds.remove(name).is_some()
    }

    /// Set the block at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownWorld`] if the world is not loaded.
    pub fn set_block(&mut self, at: &BlockVector, block: BlockState) -> Result<(), HostError> {
        let cells = self
            .worlds
            .get_mut(&at.world)
            .ok_or_else(|| HostError::UnknownWorld(at.world.clone()))?;
        cells.insert(at.coords(), block);
        Ok(())
    }

    /// Replace the block at `at` with air and emit a [`HostEvent::BlockBreak`].
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownWorld`] if the world is not loaded.
    pub fn break_block(&mut self, at: &BlockVector) -> Result<(), HostError> {
        self.set_block(at, BlockState::air())?;
        self.outbox
            .push_back(HostEvent::BlockBreak { block: at.clone() });
        Ok(())
    }

    /// Bring a player online.
    pub fn add_player(&mut self, player: PlayerSnapshot) {
        self.players.insert(player.id, player);
    }

    /// Take a player offline, ejecting them from their vehicle first.
    ///
    /// Returns the player's last state.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<PlayerSnapshot> {
        let vehicle = self.players.get(&id).and_then(|p| p.vehicle);
        if let Some(vehicle) = vehicle {
            self.detach(vehicle, id);
        }
        self.players.remove(&id)
    }

    /// Mutable access to a player's state, for scripting movement.
    ///
    /// Changes made here bypass the simulation's rules.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerSnapshot> {
        self.players.get_mut(&id)
    }

    /// The player stops riding their vehicle, as if they pressed the dismount
    /// key. Emits a [`HostEvent::Dismount`].
    ///
    /// Returns `true` if the player was riding something.
    pub fn dismount(&mut self, id: PlayerId) -> bool {
        let Some(vehicle) = self.players.get(&id).and_then(|p| p.vehicle) else {
            return false;
        };
        self.detach(vehicle, id);
        self.outbox.push_back(HostEvent::Dismount {
            passenger: id,
            vehicle,
        });
        true
    }

    /// Remove an entity without ejecting anyone through the event system,
    /// as chunk unloads and admin commands do.
    pub fn invalidate(&mut self, entity: Entity) {
        if let Some(marker) = self.markers.remove(&entity) {
            for passenger in marker.passengers {
                if let Some(player) = self.players.get_mut(&passenger) {
                    player.vehicle = None;
                }
            }
        }
    }

    /// Clear an entity's passengers without emitting any event.
    pub fn eject_silently(&mut self, entity: Entity) {
        let passengers = self
            .markers
            .get_mut(&entity)
            .map(|m| std::mem::take(&mut m.passengers))
            .unwrap_or_default();
        for passenger in passengers {
            if let Some(player) = self.players.get_mut(&passenger) {
                player.vehicle = None;
            }
        }
    }

    /// Make the next [`Host::spawn_marker`] call fail.
    pub fn refuse_next_spawn(&mut self) {
        self.refuse_next_spawn = true;
    }

    /// Make the next [`Host::mount`] call fail.
    pub fn refuse_next_mount(&mut self) {
        self.refuse_next_mount = true;
    }

    /// Make the next [`Host::teleport`] call fail.
    pub fn refuse_next_teleport(&mut self) {
        self.refuse_next_teleport = true;
    }

    /// Returns a live marker entity.
    #[must_use]
    pub fn marker(&self, entity: Entity) -> Option<&Marker> {
        self.markers.get(&entity)
    }

    /// Returns the number of live marker entities.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Returns the number of online players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns every sound played so far.
    #[must_use]
    pub fn sounds(&self) -> &[(Location, SoundEffect)] {
        &self.sounds
    }

    /// Take the events the simulation has produced since the last call.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.outbox.drain(..).collect()
    }

    fn detach(&mut self, vehicle: Entity, id: PlayerId) {
        if let Some(marker) = self.markers.get_mut(&vehicle) {
            marker.passengers.retain(|p| *p != id);
        }
        if let Some(player) = self.players.get_mut(&id) {
            player.vehicle = None;
        }
    }
}

impl BlockAccess for SimWorld {
    fn block_at(&self, at: &BlockVector) -> Option<BlockState> {
        let cells = self.worlds.get(&at.world)?;
        Some(cells.get(&at.coords()).cloned().unwrap_or_else(BlockState::air))
    }
}

impl Host for SimWorld {
    fn player(&self, id: PlayerId) -> Option<PlayerSnapshot> {
        self.players.get(&id).cloned()
    }

    fn spawn_marker(&mut self, at: &Location, flags: MarkerFlags) -> Result<Entity, HostError> {
        if !self.worlds.contains_key(&at.world) {
            return Err(HostError::UnknownWorld(at.world.clone()));
        }
        if std::mem::take(&mut self.refuse_next_spawn) {
            return Err(HostError::SpawnRefused(at.clone()));
        }
        let entity = self.allocator.allocate();
        self.markers.insert(
            entity,
            Marker {
                location: at.clone(),
                flags,
                passengers: Vec::new(),
            },
        );
        debug!(%entity, location = %at, "marker spawned");
        Ok(entity)
    }

    fn despawn(&mut self, entity: Entity) {
        let Some(marker) = self.markers.remove(&entity) else {
            return;
        };
        for passenger in marker.passengers {
            if let Some(player) = self.players.get_mut(&passenger) {
                player.vehicle = None;
            }
            self.outbox.push_back(HostEvent::Dismount {
                passenger,
                vehicle: entity,
            });
        }
        debug!(%entity, "marker removed");
    }

    fn is_valid(&self, entity: Entity) -> bool {
        self.markers.contains_key(&entity)
    }

    fn passengers(&self, entity: Entity) -> Vec<PlayerId> {
        self.markers
            .get(&entity)
            .map(|m| m.passengers.clone())
            .unwrap_or_default()
    }

    fn mount(&mut self, vehicle: Entity, player: PlayerId) -> Result<(), HostError> {
        if !self.markers.contains_key(&vehicle) {
            return Err(HostError::UnknownEntity(vehicle));
        }
        let rider = self
            .players
            .get_mut(&player)
            .ok_or(HostError::UnknownPlayer(player))?;
        if std::mem::take(&mut self.refuse_next_mount) || rider.vehicle.is_some() {
            return Err(HostError::MountRefused { player, vehicle });
        }
        rider.vehicle = Some(vehicle);
        if let Some(marker) = self.markers.get_mut(&vehicle) {
            marker.passengers.push(player);
        }
        Ok(())
    }

    fn teleport(&mut self, player: PlayerId, to: &Location) -> Result<(), HostError> {
        if !self.worlds.contains_key(&to.world) {
            return Err(HostError::UnknownWorld(to.world.clone()));
        }
        let snapshot = self
            .players
            .get_mut(&player)
            .ok_or(HostError::UnknownPlayer(player))?;
        if snapshot.vehicle.is_some() {
            return Err(HostError::Mounted(player));
        }
        if std::mem::take(&mut self.refuse_next_teleport) {
            return Err(HostError::TeleportRefused(player));
        }
        snapshot.location = to.clone();
        Ok(())
    }

    fn play_sound(&mut self, at: &Location, sound: &SoundEffect) {
        self.sounds.push((at.clone(), sound.clone()));
    }
}
