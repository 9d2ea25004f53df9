//! # chair_core
//!
//! Transient seating on stair blocks. A player who right-clicks a suitable
//! stair is mounted on an invisible marker entity; any disruption (quitting,
//! dismounting, the block breaking, exploding or being pushed) tears the seat
//! down again without leaving markers, registry entries or stranded players
//! behind.
//!
//! Layers, leaf-first:
//!
//! - [`qualifier`]: pure predicate deciding whether a player may sit on a block.
//! - [`registry`]: the location and marker indices over all live [`Seat`]s.
//! - [`controller`]: seat creation and the single teardown path.
//! - [`scheduler`]: work deferred to the next tick.
//! - [`dispatch`]: maps [`HostEvent`](chair_host::HostEvent)s onto the controller.
//!
//! Everything runs on the host's event thread. [`ChairService`] is the owned,
//! single-writer entry point; create it at startup and call
//! [`ChairService::shutdown`] before the host goes away.

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod qualifier;
pub mod registry;
pub mod scheduler;
pub mod seat;

#[cfg(test)]
pub(crate) mod fixture;

pub use config::ChairConfig;
pub use controller::SeatController;
pub use dispatch::{ChairService, Outcome};
pub use error::{SitError, Unsuitable};
pub use registry::{ChairRegistry, Occupancy};
pub use scheduler::{Deferred, TickScheduler};
pub use seat::Seat;
