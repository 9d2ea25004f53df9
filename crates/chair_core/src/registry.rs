//! Seat registry: the two indices over all live seats.
//!
//! Every seat is reachable both by the block it is anchored to and by the
//! marker entity carrying its occupant. The two maps are views of one set and
//! are only ever changed together, through [`ChairRegistry::register`] and
//! [`ChairRegistry::unregister`], so:
//!
//! - a seat present in one map is present, by value, in the other;
//! - a location or a marker maps to at most one seat.

use std::collections::HashMap;

use chair_host::{Entity, Host};
use chair_math::BlockVector;

use crate::seat::Seat;

/// Occupancy of a location, as found by [`ChairRegistry::occupancy`].
#[derive(Debug, Clone, PartialEq)]
pub enum Occupancy {
    /// No seat is registered there.
    Vacant,
    /// A live marker is carrying a passenger.
    Occupied,
    /// A seat is registered but its marker is gone or empty. The seat should
    /// be torn down.
    Stale(Seat),
}

/// Registry of all live seats.
#[derive(Debug, Default)]
pub struct ChairRegistry {
    /// Seats keyed by anchor block.
    by_location: HashMap<BlockVector, Seat>,
    /// Seats keyed by marker entity.
    by_marker: HashMap<Entity, Seat>,
}

impl ChairRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_location: HashMap::new(),
            by_marker: HashMap::new(),
        }
    }

    /// Add a seat to both indices.
    ///
    /// The caller guarantees neither the location nor the marker is already
    /// registered: markers are freshly spawned per seat and locations are
    /// checked for occupancy first.
    pub(crate) fn register(&mut self, seat: Seat) {
        debug_assert!(!self.by_location.contains_key(seat.location()));
        debug_assert!(!self.by_marker.contains_key(&seat.marker()));
        self.by_marker.insert(seat.marker(), seat.clone());
        self.by_location.insert(seat.location().clone(), seat);
    }

    /// Remove a seat from both indices.
    ///
    /// Returns the removed seat, or `None` if it was not registered. A seat
    /// is identified by its marker, so a stale copy of an earlier seat never
    /// removes a newer seat at the same location.
    pub(crate) fn unregister(&mut self, seat: &Seat) -> Option<Seat> {
        let removed = self.by_marker.remove(&seat.marker())?;
        if self
            .by_location
            .get(removed.location())
            .is_some_and(|s| s.marker() == removed.marker())
        {
            self.by_location.remove(removed.location());
        }
        Some(removed)
    }

    /// Returns the seat anchored at `location`.
    #[must_use]
    pub fn by_location(&self, location: &BlockVector) -> Option<&Seat> {
        self.by_location.get(location)
    }

    /// Returns the seat carried by `marker`.
    #[must_use]
    pub fn by_marker(&self, marker: Entity) -> Option<&Seat> {
        self.by_marker.get(&marker)
    }

    /// Classify `location` against the live host state.
    ///
    /// A seat whose marker is no longer valid, or no longer carries anyone,
    /// is [`Occupancy::Stale`]. Both causes are treated alike.
    #[must_use]
    pub fn occupancy(&self, location: &BlockVector, host: &impl Host) -> Occupancy {
        match self.by_location.get(location) {
            None => Occupancy::Vacant,
            Some(seat) if Self::is_live(seat, host) => Occupancy::Occupied,
            Some(seat) => Occupancy::Stale(seat.clone()),
        }
    }

    /// Returns `true` if the seat's marker is alive and carrying a passenger.
    #[must_use]
    pub fn is_live(seat: &Seat, host: &impl Host) -> bool {
        host.is_valid(seat.marker()) && !host.passengers(seat.marker()).is_empty()
    }

    /// Returns the number of registered seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_location.len()
    }

    /// Returns `true` if no seats are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_location.is_empty()
    }

    /// Returns an iterator over all registered seats.
    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.by_location.values()
    }

    /// Returns an owned copy of all registered seats.
    #[must_use]
    pub fn seats(&self) -> Vec<Seat> {
        self.by_location.values().cloned().collect()
    }

    /// Returns `true` if both indices hold exactly the same seats, each keyed
    /// by its own location and marker.
    #[must_use]
    pub fn check_consistency(&self) -> bool {
        self.by_location.len() == self.by_marker.len()
            && self.by_location.iter().all(|(location, seat)| {
                seat.location() == location && self.by_marker.get(&seat.marker()) == Some(seat)
            })
            && self
                .by_marker
                .iter()
                .all(|(marker, seat)| seat.marker() == *marker)
    }
}
