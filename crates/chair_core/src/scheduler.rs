//! Next-tick deferral.
//!
//! Some hosts only settle a player's position a tick after a dismount, so the
//! teleport-out that follows a dismount has to wait. Deferred work runs on the
//! same event thread at the start of the next tick, in submission order. It is
//! plain data rather than closures so the queue can be inspected and flushed
//! early at shutdown.

use std::collections::VecDeque;

use crate::seat::Seat;

/// Work deferred to a later tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    /// Put the former occupant of an already-released seat back on their feet.
    TeleportOut(Seat),
}

/// Queue of work keyed by the tick it becomes due.
#[derive(Debug, Default)]
pub struct TickScheduler {
    /// Current tick counter.
    tick: u64,
    /// Pending work with its due tick, in submission order.
    queue: VecDeque<(u64, Deferred)>,
}

impl TickScheduler {
    /// Create a scheduler at tick 0 with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick: 0,
            queue: VecDeque::new(),
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Run `task` once the current tick has ended.
    pub fn run_next_tick(&mut self, task: Deferred) {
        self.queue.push_back((self.tick + 1, task));
    }

    /// Advance to the next tick and take everything now due.
    pub fn advance(&mut self) -> Vec<Deferred> {
        self.tick += 1;
        let mut due = Vec::new();
        let mut waiting = VecDeque::with_capacity(self.queue.len());
        for (at, task) in self.queue.drain(..) {
            if at <= self.tick {
                due.push(task);
            } else {
                waiting.push_back((at, task));
            }
        }
        self.queue = waiting;
        due
    }

    /// Returns the number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Take all pending work regardless of when it is due, in submission
    /// order. The tick counter does not move.
    pub fn drain(&mut self) -> Vec<Deferred> {
        self.queue.drain(..).map(|(_, task)| task).collect()
    }
}
