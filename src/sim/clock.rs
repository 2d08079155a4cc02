//! Fixed-interval simulation clock
//!
//! The clock only decides *how many* ticks are due; the caller runs them.
//! Wall time is accumulated while running and drained in whole intervals,
//! capped per call so a long stall cannot trigger a burst of catch-up ticks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Run state of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Clone)]
pub struct SimClock {
    state: ClockState,
    interval: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl SimClock {
    pub fn new(interval: Duration, max_substeps: u32) -> Self {
        Self {
            state: ClockState::Stopped,
            interval,
            max_substeps,
            accumulator: Duration::ZERO,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stopped -> Running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = ClockState::Running;
        self.accumulator = Duration::ZERO;
        true
    }

    /// Running -> Stopped. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = ClockState::Stopped;
        self.accumulator = Duration::ZERO;
        true
    }

    /// Feed elapsed wall time; returns the number of ticks to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.is_running() || self.interval.is_zero() {
            self.accumulator = Duration::ZERO;
            return 0;
        }

        self.accumulator += elapsed;

        let mut due = 0;
        while self.accumulator >= self.interval && due < self.max_substeps {
            self.accumulator -= self.interval;
            due += 1;
        }

        // Drop the backlog we refused to run
        if due == self.max_substeps && self.accumulator >= self.interval {
            log::debug!(
                "clock backlog of {:?} dropped after {} substeps",
                self.accumulator,
                due
            );
            self.accumulator = Duration::ZERO;
        }

        due
    }
}
