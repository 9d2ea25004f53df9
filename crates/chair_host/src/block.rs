//! Block state as seen by the seating qualifier.
//!
//! Only the stair family carries structured data here; every other block is
//! described by its material name, passability and sound group.

use chair_math::BlockFace;
use serde::{Deserialize, Serialize};

/// Which half of the cell a bisected block occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Top,
    Bottom,
}

/// How a stair connects to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StairShape {
    Straight,
    InnerLeft,
    InnerRight,
    OuterLeft,
    OuterRight,
}

/// Orientation data of a stair block.
///
/// `facing` is the direction of the tall back of the stair; a player sitting on
/// it faces the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stairs {
    pub facing: BlockFace,
    pub half: Half,
    pub shape: StairShape,
}

impl Stairs {
    /// A bottom-half, straight stair facing `facing`.
    #[must_use]
    pub const fn straight(facing: BlockFace) -> Self {
        Self {
            facing,
            half: Half::Bottom,
            shape: StairShape::Straight,
        }
    }

    #[must_use]
    pub const fn with_half(mut self, half: Half) -> Self {
        self.half = half;
        self
    }

    #[must_use]
    pub const fn with_shape(mut self, shape: StairShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Type-specific block data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockData {
    /// A member of the stair family.
    Stairs(Stairs),
    /// Any block without data the core cares about.
    Simple,
}

/// The state of one block cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockState {
    /// Material name, e.g. `"oak_stairs"`.
    pub material: String,
    pub data: BlockData,
    /// Whether entities can move through the cell.
    pub passable: bool,
    /// Sound group name, e.g. `"wood"`.
    pub sound_group: String,
}

impl BlockState {
    /// An empty, passable cell.
    #[must_use]
    pub fn air() -> Self {
        Self {
            material: "air".to_string(),
            data: BlockData::Simple,
            passable: true,
            sound_group: "stone".to_string(),
        }
    }

    /// A full, non-passable block.
    #[must_use]
    pub fn solid(material: impl Into<String>, sound_group: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            data: BlockData::Simple,
            passable: false,
            sound_group: sound_group.into(),
        }
    }

    /// A passable block without collision, such as a flower or a torch.
    #[must_use]
    pub fn decoration(material: impl Into<String>, sound_group: impl Into<String>) -> Self {
        Self {
            passable: true,
            ..Self::solid(material, sound_group)
        }
    }

    /// A stair block.
    #[must_use]
    pub fn stairs(
        material: impl Into<String>,
        stairs: Stairs,
        sound_group: impl Into<String>,
    ) -> Self {
        Self {
            material: material.into(),
            data: BlockData::Stairs(stairs),
            passable: false,
            sound_group: sound_group.into(),
        }
    }

    /// Stair data, if this block belongs to the stair family.
    #[must_use]
    pub fn as_stairs(&self) -> Option<&Stairs> {
        match &self.data {
            BlockData::Stairs(stairs) => Some(stairs),
            BlockData::Simple => None,
        }
    }

    /// Sound key played when the block is hit.
    #[must_use]
    pub fn hit_sound(&self) -> String {
        format!("block.{}.hit", self.sound_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_passable() {
        let air = BlockState::air();
        assert!(air.passable);
        assert!(air.as_stairs().is_none());
    }

    #[test]
    fn test_stairs_data() {
        let block = BlockState::stairs(
            "oak_stairs",
            Stairs::straight(BlockFace::North).with_shape(StairShape::OuterLeft),
            "wood",
        );
        let stairs = block.as_stairs().unwrap();
        assert_eq!(stairs.facing, BlockFace::North);
        assert_eq!(stairs.half, Half::Bottom);
        assert_eq!(stairs.shape, StairShape::OuterLeft);
        assert!(!block.passable);
    }

    #[test]
    fn test_decoration_is_passable() {
        let torch = BlockState::decoration("torch", "wood");
        assert!(torch.passable);
        assert_eq!(torch.material, "torch");
    }

    #[test]
    fn test_hit_sound_key() {
        assert_eq!(BlockState::solid("stone", "stone").hit_sound(), "block.stone.hit");
    }
}
