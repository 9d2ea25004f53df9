//! Disruption dispatch: host events to seat lifecycle calls.
//!
//! | Event | Effect |
//! |---|---|
//! | right-click on a block | try to seat the player |
//! | quit | tear down the seat the player rides |
//! | dismount | release the seat now, teleport-out now or next tick |
//! | block break | tear down the seat on that block |
//! | block / entity explosion | tear down seats on every destroyed block |
//! | piston extend / retract | tear down seats on every moved block |
//!
//! Events for blocks and entities without a seat are silently ignored; most
//! events the host delivers are unrelated to seating.

use chair_host::{Action, Entity, Host, HostEvent, PlayerId, SoundEffect};
use chair_math::BlockVector;
use tracing::{debug, info};

use crate::config::ChairConfig;
use crate::controller::SeatController;
use crate::error::SitError;
use crate::registry::ChairRegistry;
use crate::scheduler::{Deferred, TickScheduler};
use crate::seat::Seat;

/// What handling one event did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// The host should cancel the event's default behaviour.
    pub cancel: bool,
    /// The seat created by an interaction.
    pub seated: Option<Seat>,
    /// Seats torn down.
    pub torn_down: usize,
}

impl Outcome {
    fn torn_down(count: usize) -> Self {
        Self {
            torn_down: count,
            ..Self::default()
        }
    }
}

/// The seating service: owns all seating state and handles host events.
///
/// Create one at startup; call [`ChairService::tick`] once per host tick and
/// [`ChairService::shutdown`] before the host goes away. Nothing survives a
/// restart.
#[derive(Debug, Default)]
pub struct ChairService {
    controller: SeatController,
    scheduler: TickScheduler,
}

impl ChairService {
    /// Create a service with no seats.
    #[must_use]
    pub fn new(config: ChairConfig) -> Self {
        info!(permission = %config.permission, "seating service started");
        Self {
            controller: SeatController::new(config),
            scheduler: TickScheduler::new(),
        }
    }

    /// Returns a reference to the seat controller.
    #[must_use]
    pub fn controller(&self) -> &SeatController {
        &self.controller
    }

    /// Returns a reference to the seat registry.
    #[must_use]
    pub fn registry(&self) -> &ChairRegistry {
        self.controller.registry()
    }

    /// Returns a reference to the next-tick scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Handle one host event.
    pub fn handle(&mut self, host: &mut impl Host, event: &HostEvent) -> Outcome {
        debug!(event = event.kind(), "handling host event");
        match event {
            HostEvent::Interact {
                player,
                action,
                block,
            } => self.on_interact(host, *player, *action, block.as_ref()),
            HostEvent::Quit { player } => Outcome::torn_down(usize::from(self.on_quit(host, *player))),
            HostEvent::Dismount { passenger, vehicle } => {
                Outcome::torn_down(usize::from(self.on_dismount(host, *passenger, *vehicle)))
            }
            HostEvent::BlockBreak { block } => {
                Outcome::torn_down(usize::from(self.controller.teardown_at(host, block)))
            }
            HostEvent::BlockExplode { affected, .. } | HostEvent::EntityExplode { affected, .. } => {
                Outcome::torn_down(self.on_blocks_destroyed(host, affected))
            }
            HostEvent::PistonExtend { moved, .. } | HostEvent::PistonRetract { moved, .. } => {
                Outcome::torn_down(self.on_blocks_destroyed(host, moved))
            }
        }
    }

    /// A player interacted with the world. Only a right-click on a block can
    /// seat them. Once the player and block qualify the interaction is
    /// cancelled, even if the host then fails to seat them.
    pub fn on_interact(
        &mut self,
        host: &mut impl Host,
        player: PlayerId,
        action: Action,
        block: Option<&BlockVector>,
    ) -> Outcome {
        let (Action::RightClickBlock, Some(block)) = (action, block) else {
            return Outcome::default();
        };
        match self.controller.try_sit(host, block, player) {
            Ok(seat) => {
                self.play_feedback(host, &seat);
                Outcome {
                    cancel: true,
                    seated: Some(seat),
                    torn_down: 0,
                }
            }
            Err(e @ (SitError::Spawn(_) | SitError::Place(_) | SitError::Mount(_))) => {
                debug!(%player, location = %block, reason = %e, "seating failed after qualifying");
                Outcome {
                    cancel: true,
                    ..Outcome::default()
                }
            }
            Err(e) => {
                debug!(%player, location = %block, reason = %e, "not seating player");
                Outcome::default()
            }
        }
    }

    /// A player is disconnecting. Their seat, if they ride one, is torn down.
    pub fn on_quit(&mut self, host: &mut impl Host, player: PlayerId) -> bool {
        let Some(vehicle) = host.player(player).and_then(|p| p.vehicle) else {
            return false;
        };
        let Some(seat) = self.controller.registry().by_marker(vehicle).cloned() else {
            return false;
        };
        info!(%player, location = %seat.location(), "seated player quit");
        self.controller.teardown(host, &seat)
    }

    /// A passenger left `vehicle`. If that was a seat marker the seat is
    /// released immediately; the teleport-out waits a tick when the host
    /// settles positions late.
    pub fn on_dismount(&mut self, host: &mut impl Host, passenger: PlayerId, vehicle: Entity) -> bool {
        let Some(seat) = self.controller.registry().by_marker(vehicle).cloned() else {
            return false;
        };
        debug!(%passenger, location = %seat.location(), "seat dismounted");
        if !self.controller.config().defer_dismount_teleport {
            return self.controller.teardown(host, &seat);
        }
        match self.controller.release(host, &seat) {
            Some(seat) => {
                self.scheduler.run_next_tick(Deferred::TeleportOut(seat));
                true
            }
            None => false,
        }
    }

    /// Blocks were destroyed or moved. Tears down the seat on each one.
    pub fn on_blocks_destroyed(&mut self, host: &mut impl Host, blocks: &[BlockVector]) -> usize {
        let mut removed = 0;
        for block in blocks {
            if self.controller.teardown_at(host, block) {
                removed += 1;
            }
        }
        removed
    }

    /// Start a new tick: run the work deferred from the previous one.
    ///
    /// Returns the number of deferred tasks run.
    pub fn tick(&mut self, host: &mut impl Host) -> usize {
        let due = self.scheduler.advance();
        let count = due.len();
        for task in due {
            self.run(host, task);
        }
        count
    }

    fn run(&mut self, host: &mut impl Host, task: Deferred) {
        match task {
            Deferred::TeleportOut(seat) => {
                self.controller.teleport_out(host, &seat);
            }
        }
    }

    /// Run pending deferred work now, then tear down every seat.
    ///
    /// Returns the number of seats torn down.
    pub fn shutdown(&mut self, host: &mut impl Host) -> usize {
        let pending = self.scheduler.drain();
        let flushed = pending.len();
        for task in pending {
            self.run(host, task);
        }
        let removed = self.controller.teardown_all(host);
        info!(seats = removed, flushed, "seating service stopped");
        removed
    }

    fn play_feedback(&self, host: &mut impl Host, seat: &Seat) {
        if !self.controller.config().feedback_sound {
            return;
        }
        let Some(block) = host.block_at(seat.location()) else {
            return;
        };
        let at = self.controller.anchor(seat.location(), seat.facing());
        host.play_sound(&at, &SoundEffect::new(block.hit_sound()));
    }
}
