//! Seat lifecycle: creation and teardown.
//!
//! A seat goes from nothing to created on a successful [`SeatController::try_sit`]
//! and from created to destroyed on any teardown. Destroyed is terminal.
//!
//! Creation either commits fully (marker spawned, player mounted, seat
//! registered) or rolls back everything it allocated. Teardown always removes
//! the seat from the registry before releasing the marker, and releases the
//! marker before trying to move the player.

use chair_host::{Host, MarkerFlags, PlayerId};
use chair_math::{BlockVector, DVec3, Location};
use tracing::{debug, info, warn};

use crate::config::ChairConfig;
use crate::error::SitError;
use crate::qualifier;
use crate::registry::{ChairRegistry, Occupancy};
use crate::seat::Seat;

/// Height of the lower step of a bottom-half stair above the cell's base.
const STEP_HEIGHT: f64 = 0.5;

/// Owns the seat registry and performs every change to it.
#[derive(Debug, Default)]
pub struct SeatController {
    registry: ChairRegistry,
    config: ChairConfig,
}

impl SeatController {
    /// Create a controller with an empty registry.
    #[must_use]
    pub fn new(config: ChairConfig) -> Self {
        Self {
            registry: ChairRegistry::new(),
            config,
        }
    }

    /// Returns a reference to the seat registry.
    #[must_use]
    pub fn registry(&self) -> &ChairRegistry {
        &self.registry
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ChairConfig {
        &self.config
    }

    /// Returns `true` if a live seat is anchored at `location`.
    ///
    /// A stale seat found here is torn down on the spot.
    pub fn is_occupied(&mut self, host: &mut impl Host, location: &BlockVector) -> bool {
        match self.registry.occupancy(location, &*host) {
            Occupancy::Vacant => false,
            Occupancy::Occupied => true,
            Occupancy::Stale(seat) => {
                info!(location = %seat.location(), marker = %seat.marker(), "removing stale seat");
                self.teardown(host, &seat);
                false
            }
        }
    }

    /// Seat `player` on the stair at `block`.
    ///
    /// # Errors
    ///
    /// Returns why no seat was created. Nothing is left allocated on error.
    pub fn try_sit(
        &mut self,
        host: &mut impl Host,
        block: &BlockVector,
        player: PlayerId,
    ) -> Result<Seat, SitError> {
        if self.is_occupied(host, block) {
            return Err(SitError::Occupied(block.clone()));
        }

        let snapshot = host.player(player).ok_or(SitError::UnknownPlayer(player))?;
        let open_face = qualifier::check(&*host, block, &snapshot, &self.config)?;

        let facing = open_face.direction();
        let anchor = self.anchor(block, facing);
        let previous = snapshot.location;

        let marker = host
            .spawn_marker(&anchor, MarkerFlags::SEAT)
            .map_err(|e| {
                warn!(location = %block, error = %e, "seat marker spawn failed");
                SitError::Spawn(e)
            })?;

        let placed = host
            .teleport(player, &anchor)
            .map_err(SitError::Place)
            .and_then(|()| host.mount(marker, player).map_err(SitError::Mount));
        if let Err(e) = placed {
            warn!(location = %block, %marker, error = %e, "placing player on seat failed, rolling back");
            host.despawn(marker);
            if let Err(e) = host.teleport(player, &previous) {
                debug!(%player, error = %e, "could not restore player position");
            }
            return Err(e);
        }

        let seat = Seat::new(block.clone(), marker, facing, player);
        self.registry.register(seat.clone());
        info!(location = %block, %marker, %player, "seat created");
        Ok(seat)
    }

    /// Where the marker for a seat on `block` facing `facing` is placed: the
    /// reference point nudged along the facing, clear of the stair riser.
    #[must_use]
    pub fn anchor(&self, block: &BlockVector, facing: DVec3) -> Location {
        Location::new(
            block.world.clone(),
            qualifier::reference_point(block, &self.config) + facing * self.config.riser_nudge,
        )
        .with_direction(facing)
    }

    /// Tear a seat down: unregister it, remove its marker, and move the
    /// occupant back onto their feet if they are still at the seat.
    ///
    /// Returns `false` if the seat was already gone, in which case nothing
    /// happens.
    pub fn teardown(&mut self, host: &mut impl Host, seat: &Seat) -> bool {
        let Some(seat) = self.release(host, seat) else {
            return false;
        };
        self.teleport_out(host, &seat);
        true
    }

    /// Tear down the seat anchored at `location`, if there is one.
    pub fn teardown_at(&mut self, host: &mut impl Host, location: &BlockVector) -> bool {
        match self.registry.by_location(location).cloned() {
            Some(seat) => self.teardown(host, &seat),
            None => false,
        }
    }

    /// Tear down every registered seat, regardless of where the occupants
    /// are. Returns the number of seats removed.
    pub fn teardown_all(&mut self, host: &mut impl Host) -> usize {
        let mut removed = 0;
        for seat in self.registry.seats() {
            if self.teardown(host, &seat) {
                removed += 1;
            }
        }
        removed
    }

    /// First half of teardown: unregister the seat and remove its marker.
    ///
    /// Returns the removed seat, or `None` if it was already gone.
    pub(crate) fn release(&mut self, host: &mut impl Host, seat: &Seat) -> Option<Seat> {
        let seat = self.registry.unregister(seat)?;
        host.despawn(seat.marker());
        debug!(location = %seat.location(), marker = %seat.marker(), "seat released");
        Some(seat)
    }

    /// Second half of teardown: put the former occupant back on their feet,
    /// facing the way they sat.
    ///
    /// Skipped if the player is offline, in another world, or further than
    /// `teleport_out_radius_squared` from the seat. Returns `true` if the
    /// player was moved.
    pub(crate) fn teleport_out(&self, host: &mut impl Host, seat: &Seat) -> bool {
        let Some(player) = host.player(seat.occupant()) else {
            return false;
        };
        let location = seat.location();
        let anchor = qualifier::reference_point(location, &self.config);
        if !player.location.in_world(&location.world)
            || player.location.distance_squared(anchor) > self.config.teleport_out_radius_squared
        {
            debug!(player = %seat.occupant(), location = %player.location, "player left the seat, not moving them");
            return false;
        }

        let mut target = player.location.with_direction(seat.facing());
        target.position.y = target.position.y.max(f64::from(location.y) + STEP_HEIGHT);
        match host.teleport(seat.occupant(), &target) {
            Ok(()) => true,
            Err(e) => {
                debug!(player = %seat.occupant(), error = %e, "teleport-out failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chair_host::{BlockState, HostError, SimWorld, StairShape, Stairs};
    use chair_math::BlockFace;

    use super::*;
    use crate::error::Unsuitable;
    use crate::fixture::{self, WORLD};

    fn setup() -> (SeatController, SimWorld, PlayerId) {
        let mut sim = fixture::scene();
        let player = fixture::player(&mut sim);
        (SeatController::new(ChairConfig::default()), sim, player)
    }

    #[test]
    fn test_try_sit_creates_seat() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();

        assert_eq!(seat.location(), &fixture::stair());
        assert_eq!(seat.occupant(), player);
        assert_eq!(seat.facing(), DVec3::Z);
        assert_eq!(chairs.registry().len(), 1);
        assert_eq!(chairs.registry().by_marker(seat.marker()), Some(&seat));
        assert!(chairs.registry().check_consistency());

        let marker = sim.marker(seat.marker()).unwrap();
        assert_eq!(marker.flags, MarkerFlags::SEAT);
        assert_eq!(marker.passengers, vec![player]);
        assert_eq!(marker.location.world, WORLD);
        assert!(marker.location.position.distance(DVec3::new(0.5, 64.3, 0.7)) < 1e-9);

        let snapshot = sim.player(player).unwrap();
        assert_eq!(snapshot.vehicle, Some(seat.marker()));
        assert_eq!(snapshot.location.direction, DVec3::Z);
    }

    #[test]
    fn test_corner_stair_rejected_without_side_effects() {
        let (mut chairs, mut sim, player) = setup();
        sim.set_block(
            &fixture::stair(),
            BlockState::stairs(
                "oak_stairs",
                Stairs::straight(BlockFace::North).with_shape(StairShape::OuterRight),
                "wood",
            ),
        )
        .unwrap();

        let result = chairs.try_sit(&mut sim, &fixture::stair(), player);
        assert!(matches!(
            result,
            Err(SitError::Unsuitable(Unsuitable::NotStraight))
        ));
        assert!(chairs.registry().is_empty());
        assert_eq!(sim.marker_count(), 0);
    }

    #[test]
    fn test_occupied_seat_rejects_second_player() {
        let (mut chairs, mut sim, first) = setup();
        let second = fixture::player_at(&mut sim, DVec3::new(1.5, 64.0, 0.5));
        chairs.try_sit(&mut sim, &fixture::stair(), first).unwrap();

        let result = chairs.try_sit(&mut sim, &fixture::stair(), second);
        assert!(matches!(result, Err(SitError::Occupied(_))));
        assert_eq!(chairs.registry().len(), 1);
        assert_eq!(sim.marker_count(), 1);
    }

    #[test]
    fn test_unknown_player() {
        let (mut chairs, mut sim, _) = setup();
        let result = chairs.try_sit(&mut sim, &fixture::stair(), PlayerId::new_v4());
        assert!(matches!(result, Err(SitError::UnknownPlayer(_))));
    }

    #[test]
    fn test_spawn_failure_leaves_nothing() {
        let (mut chairs, mut sim, player) = setup();
        sim.refuse_next_spawn();
        let before = sim.player(player).unwrap().location;

        let result = chairs.try_sit(&mut sim, &fixture::stair(), player);
        assert!(matches!(result, Err(SitError::Spawn(HostError::SpawnRefused(_)))));
        assert!(chairs.registry().is_empty());
        assert_eq!(sim.marker_count(), 0);
        assert_eq!(sim.player(player).unwrap().location, before);
    }

    #[test]
    fn test_anchor_teleport_failure_rolls_back() {
        let (mut chairs, mut sim, player) = setup();
        sim.refuse_next_teleport();
        let before = sim.player(player).unwrap().location;

        let result = chairs.try_sit(&mut sim, &fixture::stair(), player);
        assert!(matches!(result, Err(SitError::Place(HostError::TeleportRefused(_)))));
        assert!(chairs.registry().is_empty());
        assert_eq!(sim.marker_count(), 0);

        let snapshot = sim.player(player).unwrap();
        assert!(snapshot.vehicle.is_none());
        assert_eq!(snapshot.location, before);
    }

    #[test]
    fn test_mount_failure_rolls_back() {
        let (mut chairs, mut sim, player) = setup();
        sim.refuse_next_mount();
        let before = sim.player(player).unwrap().location;

        let result = chairs.try_sit(&mut sim, &fixture::stair(), player);
        assert!(matches!(result, Err(SitError::Mount(HostError::MountRefused { .. }))));
        assert!(chairs.registry().is_empty());
        assert!(chairs.registry().by_location(&fixture::stair()).is_none());
        assert_eq!(sim.marker_count(), 0);

        let snapshot = sim.player(player).unwrap();
        assert!(snapshot.vehicle.is_none());
        assert_eq!(snapshot.location, before);
    }

    #[test]
    fn test_stale_seat_heals_on_lookup() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();
        sim.invalidate(seat.marker());

        assert!(!chairs.is_occupied(&mut sim, &fixture::stair()));
        assert!(chairs.registry().is_empty());
        assert!(chairs.registry().by_marker(seat.marker()).is_none());
        assert!(chairs.registry().check_consistency());
    }

    #[test]
    fn test_silently_ejected_seat_is_stale() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();
        sim.eject_silently(seat.marker());

        assert!(!chairs.is_occupied(&mut sim, &fixture::stair()));
        assert!(chairs.registry().is_empty());
        assert!(!sim.is_valid(seat.marker()));
    }

    #[test]
    fn test_stale_seat_can_be_replaced() {
        let (mut chairs, mut sim, player) = setup();
        let old = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();
        sim.invalidate(old.marker());
        sim.player_mut(player).unwrap().location.position = DVec3::new(0.5, 64.0, 1.5);

        let new = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();
        assert_ne!(new.marker(), old.marker());
        assert_eq!(chairs.registry().len(), 1);
        assert!(chairs.registry().check_consistency());
    }

    #[test]
    fn test_teardown_releases_everything() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();

        assert!(chairs.teardown(&mut sim, &seat));
        assert!(chairs.registry().is_empty());
        assert!(!sim.is_valid(seat.marker()));

        let snapshot = sim.player(player).unwrap();
        assert!(snapshot.vehicle.is_none());
        assert_eq!(snapshot.location.direction, seat.facing());
        assert!(snapshot.location.position.y >= 64.5);
    }

    #[test]
    fn test_teardown_twice_is_noop() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();

        assert!(chairs.teardown(&mut sim, &seat));
        let after_first = sim.player(player).unwrap();
        assert!(!chairs.teardown(&mut sim, &seat));
        assert!(!chairs.teardown_at(&mut sim, &fixture::stair()));
        assert!(chairs.registry().is_empty());
        assert_eq!(sim.player(player).unwrap(), after_first);
    }

    #[test]
    fn test_teardown_at_vacant_location() {
        let (mut chairs, mut sim, _) = setup();
        assert!(!chairs.teardown_at(&mut sim, &BlockVector::new(WORLD, 9, 9, 9)));
    }

    #[test]
    fn test_teleport_out_within_radius() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();
        // Half a block from the anchor reference point.
        sim.player_mut(player).unwrap().location = Location::new(WORLD, DVec3::new(0.5, 64.8, 0.5))
            .with_direction(DVec3::X);

        assert!(chairs.teardown(&mut sim, &seat));
        let snapshot = sim.player(player).unwrap();
        assert_eq!(snapshot.location.direction, seat.facing());
        assert_eq!(snapshot.location.position, DVec3::new(0.5, 64.8, 0.5));
    }

    #[test]
    fn test_teleport_out_skipped_when_far() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();
        let far = Location::new(WORLD, DVec3::new(40.0, 70.0, 40.0)).with_direction(DVec3::X);
        sim.player_mut(player).unwrap().location = far.clone();

        assert!(chairs.teardown(&mut sim, &seat));
        assert!(chairs.registry().is_empty());
        assert_eq!(sim.player(player).unwrap().location, far);
    }

    #[test]
    fn test_teleport_out_skipped_in_other_world() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();
        let elsewhere = Location::new("nether", DVec3::new(0.5, 64.3, 0.5));
        sim.player_mut(player).unwrap().location = elsewhere.clone();

        assert!(chairs.teardown(&mut sim, &seat));
        assert_eq!(sim.player(player).unwrap().location, elsewhere);
    }

    #[test]
    fn test_teardown_with_offline_player() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();
        sim.remove_player(player);

        assert!(chairs.teardown(&mut sim, &seat));
        assert!(chairs.registry().is_empty());
        assert_eq!(sim.marker_count(), 0);
    }

    #[test]
    fn test_teardown_all() {
        let (mut chairs, mut sim, first) = setup();
        let other = BlockVector::new(WORLD, 2, 64, 0);
        sim.set_block(
            &other,
            BlockState::stairs("stone_stairs", Stairs::straight(BlockFace::North), "stone"),
        )
        .unwrap();
        let second = fixture::player_at(&mut sim, DVec3::new(2.5, 64.0, 1.5));
        chairs.try_sit(&mut sim, &fixture::stair(), first).unwrap();
        chairs.try_sit(&mut sim, &other, second).unwrap();

        assert_eq!(chairs.teardown_all(&mut sim), 2);
        assert!(chairs.registry().is_empty());
        assert_eq!(sim.marker_count(), 0);
        assert_eq!(chairs.teardown_all(&mut sim), 0);
    }

    #[test]
    fn test_release_then_teleport_out() {
        let (mut chairs, mut sim, player) = setup();
        let seat = chairs.try_sit(&mut sim, &fixture::stair(), player).unwrap();

        let released = chairs.release(&mut sim, &seat).unwrap();
        assert!(chairs.registry().is_empty());
        assert!(chairs.release(&mut sim, &seat).is_none());
        assert!(chairs.teleport_out(&mut sim, &released));
        assert!(!sim.is_valid(released.marker()));
    }
}
