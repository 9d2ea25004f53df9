//! Block cell keys and world locations.
//!
//! [`BlockVector`] identifies a cell by value and is the key the seat registry
//! indexes by. [`Location`] is a continuous position in a named world together
//! with the direction an entity standing there faces.

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

use crate::face::BlockFace;

/// Value-typed identifier of a block cell: world name plus integer
/// coordinates.
///
/// Equality and hashing are by value, so two keys built independently for the
/// same cell are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockVector {
    /// Name of the world the cell lives in.
    pub world: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockVector {
    /// Create a key for the cell at `(x, y, z)` in `world`.
    #[must_use]
    pub fn new(world: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// Integer coordinates of the cell.
    #[must_use]
    pub const fn coords(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// The cell `distance` steps away across `face`.
    #[must_use]
    pub fn relative(&self, face: BlockFace, distance: i32) -> Self {
        let c = self.coords() + face.offset() * distance;
        Self::new(self.world.clone(), c.x, c.y, c.z)
    }

    /// World-space position of the cell's minimum corner.
    #[must_use]
    pub fn base(&self) -> DVec3 {
        self.coords().as_dvec3()
    }

    /// World-space point at `offset` from the cell's minimum corner.
    #[must_use]
    pub fn point(&self, offset: DVec3) -> DVec3 {
        self.base() + offset
    }
}

impl std::fmt::Display for BlockVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{},{},{}", self.world, self.x, self.y, self.z)
    }
}

/// A position in a named world plus a facing direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Name of the world.
    pub world: String,
    /// World-space position.
    pub position: DVec3,
    /// Unit vector the entity at this location faces.
    pub direction: DVec3,
}

impl Location {
    /// Facing used when none has been set: due south.
    pub const DEFAULT_DIRECTION: DVec3 = DVec3::Z;

    /// Create a location facing [`Location::DEFAULT_DIRECTION`].
    #[must_use]
    pub fn new(world: impl Into<String>, position: DVec3) -> Self {
        Self {
            world: world.into(),
            position,
            direction: Self::DEFAULT_DIRECTION,
        }
    }

    /// Replace the facing direction. A zero vector leaves the facing unchanged.
    #[must_use]
    pub fn with_direction(mut self, direction: DVec3) -> Self {
        if let Some(unit) = direction.try_normalize() {
            self.direction = unit;
        }
        self
    }

    /// Vertical cell coordinate of this location.
    #[must_use]
    pub fn block_y(&self) -> i32 {
        self.position.y.floor() as i32
    }

    /// Returns `true` if this location is in the named world.
    #[must_use]
    pub fn in_world(&self, world: &str) -> bool {
        self.world == world
    }

    /// Squared distance to a point, ignoring worlds.
    #[must_use]
    pub fn distance_squared(&self, point: DVec3) -> f64 {
        self.position.distance_squared(point)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{:.2},{:.2},{:.2}",
            self.world, self.position.x, self.position.y, self.position.z
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_block_vector_equality_by_value() {
        let a = BlockVector::new("world", 1, 2, 3);
        let b = BlockVector::new(String::from("world"), 1, 2, 3);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&BlockVector::new("nether", 1, 2, 3)));
    }

    #[test]
    fn test_relative() {
        let v = BlockVector::new("world", 0, 64, 0);
        assert_eq!(v.relative(BlockFace::Up, 2), BlockVector::new("world", 0, 66, 0));
        assert_eq!(v.relative(BlockFace::North, 1), BlockVector::new("world", 0, 64, -1));
        assert_eq!(v.relative(BlockFace::East, 1).world, "world");
    }

    #[test]
    fn test_point_offset_from_base() {
        let v = BlockVector::new("world", -3, 10, 4);
        assert_eq!(v.point(DVec3::new(0.5, 0.3, 0.5)), DVec3::new(-2.5, 10.3, 4.5));
    }

    #[test]
    fn test_block_y_floors() {
        assert_eq!(Location::new("world", DVec3::new(-0.5, 63.9, 2.0)).block_y(), 63);
        assert_eq!(Location::new("world", DVec3::new(0.0, -0.1, 0.0)).block_y(), -1);
        assert_eq!(Location::new("world", DVec3::new(0.0, 64.0, 0.0)).block_y(), 64);
    }

    #[test]
    fn test_with_direction_normalizes() {
        let loc = Location::new("world", DVec3::ZERO).with_direction(DVec3::new(0.0, 0.0, -4.0));
        assert_eq!(loc.direction, DVec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_with_zero_direction_keeps_facing() {
        let loc = Location::new("world", DVec3::ZERO).with_direction(DVec3::ZERO);
        assert_eq!(loc.direction, Location::DEFAULT_DIRECTION);
    }

    #[test]
    fn test_block_vector_json_shape() {
        let v: BlockVector =
            serde_json::from_str(r#"{"world":"world","x":1,"y":2,"z":3}"#).unwrap();
        assert_eq!(v, BlockVector::new("world", 1, 2, 3));
    }
}
