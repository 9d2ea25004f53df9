//! Demo tick loop.
//!
//! Each tick:
//!
//! 1. Run seating work deferred from the previous tick.
//! 2. Apply the script's events for this tick to the world.
//! 3. Deliver everything the world emitted to the seating service, until the
//!    outbox is empty.
//!
//! Scripted dismounts and block breaks are performed on the world, which then
//! reports them like any other change. Other scripted events are delivered
//! as-is; explosions and piston moves are reported without editing cells.

use std::time::Duration;

use chair_core::ChairService;
use chair_host::{HostEvent, SimWorld};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::scene::Script;

/// Configuration for the demo tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = until interrupted).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 20.0,
            max_ticks: 0,
        }
    }
}

/// The demo's tick loop state.
#[derive(Debug)]
pub struct TickLoop {
    /// Current tick counter.
    tick_id: u64,
    /// Tick configuration.
    config: TickConfig,
    /// The simulated world.
    host: SimWorld,
    /// The seating service under test.
    service: ChairService,
    /// Events to inject.
    script: Script,
}

impl TickLoop {
    #[must_use]
    pub fn new(config: TickConfig, host: SimWorld, service: ChairService, script: Script) -> Self {
        Self {
            tick_id: 0,
            config,
            host,
            service,
            script,
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Returns a reference to the world.
    #[must_use]
    pub fn host(&self) -> &SimWorld {
        &self.host
    }

    /// Returns a reference to the seating service.
    #[must_use]
    pub fn service(&self) -> &ChairService {
        &self.service
    }

    /// Run one tick.
    pub fn tick(&mut self) {
        self.tick_id += 1;

        let deferred = self.service.tick(&mut self.host);
        debug!(tick_id = self.tick_id, deferred, "tick start");

        let due: Vec<HostEvent> = self.script.due(self.tick_id).cloned().collect();
        for event in due {
            self.apply(event);
        }
        self.pump();
    }

    /// Apply one scripted event to the world.
    fn apply(&mut self, event: HostEvent) {
        match event {
            HostEvent::Dismount { passenger, .. } => {
                if !self.host.dismount(passenger) {
                    debug!(player = %passenger, "scripted dismount while not riding");
                }
            }
            HostEvent::BlockBreak { block } => {
                if let Err(e) = self.host.break_block(&block) {
                    warn!(error = %e, %block, "scripted block break failed");
                }
            }
            HostEvent::Quit { player } => {
                self.deliver(&HostEvent::Quit { player });
                self.host.remove_player(player);
            }
            other => self.deliver(&other),
        }
    }

    /// Deliver everything in the world's outbox, including events raised
    /// while handling earlier ones.
    fn pump(&mut self) {
        loop {
            let events = self.host.drain_events();
            if events.is_empty() {
                break;
            }
            for event in &events {
                self.deliver(event);
            }
        }
    }

    fn deliver(&mut self, event: &HostEvent) {
        let outcome = self.service.handle(&mut self.host, event);
        debug!(
            tick_id = self.tick_id,
            event = event.kind(),
            cancel = outcome.cancel,
            torn_down = outcome.torn_down,
            "event handled"
        );
        if let Some(seat) = &outcome.seated {
            info!(
                tick_id = self.tick_id,
                player = %seat.occupant(),
                location = %seat.location(),
                "player seated"
            );
        }
    }

    /// Run ticks at the configured rate until `max_ticks` is reached or the
    /// process is interrupted.
    pub async fn run_async(&mut self) {
        let period = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let interrupt = tokio::signal::ctrl_c();
        tokio::pin!(interrupt);

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            script_events = self.script.len(),
            "tick loop starting"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick();
                    if self.config.max_ticks > 0 && self.tick_id >= self.config.max_ticks {
                        info!(tick_id = self.tick_id, "reached max ticks");
                        break;
                    }
                }
                result = &mut interrupt => {
                    if let Err(e) = result {
                        warn!(error = %e, "failed to listen for ctrl-c");
                    }
                    info!(tick_id = self.tick_id, "interrupted");
                    break;
                }
            }
        }
    }

    /// Tear down all seats and flush the resulting events.
    ///
    /// Returns the number of seats torn down.
    pub fn shutdown(&mut self) -> usize {
        let removed = self.service.shutdown(&mut self.host);
        self.pump();
        info!(
            tick_id = self.tick_id,
            seats = removed,
            markers = self.host.marker_count(),
            "tick loop shut down"
        );
        removed
    }
}
