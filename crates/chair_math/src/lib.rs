//! # chair_math
//!
//! World-space value types for the seating engine. Re-exports [`glam`] for
//! vector math and defines the keys shared by the host contract and the core:
//!
//! - [`BlockVector`]: value-typed block cell identifier (world + integer coordinates).
//! - [`Location`]: a point in a named world with a facing direction.
//! - [`BlockFace`]: the six axis-aligned faces of a block cell.

pub mod face;
pub mod location;

// Re-export glam types for convenience.
pub use glam::{DVec3, IVec3};

pub use face::BlockFace;
pub use location::{BlockVector, Location};
