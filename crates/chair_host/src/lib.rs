//! # chair_host
//!
//! The services the seating core needs from the world simulation it runs
//! inside. The core never owns world state: it reads block geometry and player
//! state, spawns and removes marker entities, mounts and teleports players, all
//! through the traits defined here.
//!
//! This crate provides:
//!
//! - [`Entity`] / [`EntityAllocator`]: marker entity identifiers.
//! - [`PlayerId`]: stable player identity.
//! - [`BlockState`], [`Stairs`]: the block geometry the qualifier inspects.
//! - [`PlayerSnapshot`]: player state at the moment of a query.
//! - [`HostEvent`]: events the simulation delivers to the core.
//! - [`BlockAccess`] / [`Host`]: the collaborator contract.
//! - [`SimWorld`]: an in-memory host used by tests and the demo driver.

pub mod block;
pub mod entity;
pub mod error;
pub mod event;
pub mod host;
pub mod player;
pub mod sim;

pub use block::{BlockData, BlockState, Half, StairShape, Stairs};
pub use entity::{Entity, EntityAllocator, PlayerId};
pub use error::HostError;
pub use event::{Action, HostEvent};
pub use host::{BlockAccess, Host, MarkerFlags, SoundEffect};
pub use player::{GameMode, PlayerSnapshot};
pub use sim::SimWorld;
