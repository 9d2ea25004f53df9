//! Axis-aligned block faces.
//!
//! Horizontal faces follow the usual voxel-world convention: north is `-Z`,
//! south is `+Z`, east is `+X` and west is `-X`.

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

/// One of the six faces of a block cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockFace {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl BlockFace {
    /// Integer cell offset of the neighbour across this face.
    #[must_use]
    pub const fn offset(self) -> IVec3 {
        match self {
            BlockFace::North => IVec3::new(0, 0, -1),
            BlockFace::East => IVec3::new(1, 0, 0),
            BlockFace::South => IVec3::new(0, 0, 1),
            BlockFace::West => IVec3::new(-1, 0, 0),
            BlockFace::Up => IVec3::new(0, 1, 0),
            BlockFace::Down => IVec3::new(0, -1, 0),
        }
    }

    /// Unit direction vector pointing out of this face.
    #[must_use]
    pub fn direction(self) -> DVec3 {
        self.offset().as_dvec3()
    }

    /// The face on the other side of the cell.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            BlockFace::North => BlockFace::South,
            BlockFace::East => BlockFace::West,
            BlockFace::South => BlockFace::North,
            BlockFace::West => BlockFace::East,
            BlockFace::Up => BlockFace::Down,
            BlockFace::Down => BlockFace::Up,
        }
    }
}

impl std::fmt::Display for BlockFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BlockFace::North => "north",
            BlockFace::East => "east",
            BlockFace::South => "south",
            BlockFace::West => "west",
            BlockFace::Up => "up",
            BlockFace::Down => "down",
        };
        f.write_str(name)
    }
}
