//! timers.rs
//!
//! Fire-once records for everything the launch sequence schedules ahead of time.

use std::time::Duration;

use bevy::prelude::*;

/// A callback slot that fires exactly once after its delay.
#[derive(Debug, Clone)]
pub struct Deferred {
    timer: Timer,
    fired: bool,
}

impl Deferred {
    pub fn after(secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(secs, TimerMode::Once),
            fired: false,
        }
    }

    /// Returns true on the tick the delay elapses, never again afterwards.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.fired {
            return false;
        }

        self.timer.tick(delta);
        if self.timer.finished() {
            self.fired = true;
        }
        self.fired
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    Show(u32),
    Liftoff,
}

/// Counts down once per step, then reports liftoff a single time.
#[derive(Debug, Clone)]
pub struct Countdown {
    timer: Timer,
    remaining: u32,
    done: bool,
}

impl Countdown {
    pub fn new(from: u32, step_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(step_secs, TimerMode::Repeating),
            remaining: from,
            done: false,
        }
    }

    /// Latest step reached during this tick. A long frame can cover several
    /// steps; only the last one is reported, and liftoff is never skipped.
    pub fn tick(&mut self, delta: Duration) -> Option<CountdownStep> {
        if self.done {
            return None;
        }

        self.timer.tick(delta);

        let mut reached = None;
        for _ in 0..self.timer.times_finished_this_tick() {
            if self.remaining == 0 {
                self.done = true;
                return Some(CountdownStep::Liftoff);
            }
            reached = Some(CountdownStep::Show(self.remaining));
            self.remaining -= 1;
        }
        reached
    }
}
