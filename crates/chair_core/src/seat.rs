//! The seat record.

use chair_host::{Entity, PlayerId};
use chair_math::{BlockVector, DVec3};

/// A player seated on a stair, riding a marker entity.
///
/// Seats are immutable. A seat is created once by the controller and destroyed
/// by teardown; sitting down again always produces a new seat with a new
/// marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Seat {
    location: BlockVector,
    marker: Entity,
    facing: DVec3,
    occupant: PlayerId,
}

impl Seat {
    pub(crate) fn new(location: BlockVector, marker: Entity, facing: DVec3, occupant: PlayerId) -> Self {
        Self {
            location,
            marker,
            facing,
            occupant,
        }
    }

    /// The stair block the seat is anchored to.
    #[must_use]
    pub fn location(&self) -> &BlockVector {
        &self.location
    }

    /// The marker entity carrying the occupant.
    #[must_use]
    pub fn marker(&self) -> Entity {
        self.marker
    }

    /// Direction the occupant faces, restored when they get up.
    #[must_use]
    pub fn facing(&self) -> DVec3 {
        self.facing
    }

    /// The seated player.
    #[must_use]
    pub fn occupant(&self) -> PlayerId {
        self.occupant
    }
}
