//! time.rs
//!
//! Planetary clock. Starts at the wall-clock time and is advanced by the
//! frame delta times a speed multiplier, so at x1 the planets sit exactly
//! where real time would put them.

use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::config::{CLOCK_MAX_SPEED, CLOCK_MIN_SPEED};

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimClock::starting_at(Utc::now()))
            .add_systems(Update, (clock_controls, update).chain().in_set(super::SimSet::Input));
    }
}

#[derive(Resource, Debug)]
pub struct SimClock {
    pub is_paused: bool,
    pub speed_mult: f64,
    pub sim_time: DateTime<Utc>,
}

impl SimClock {
    pub fn starting_at(sim_time: DateTime<Utc>) -> Self {
        Self {
            is_paused: false,
            speed_mult: 1.0,
            sim_time,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
    }

    // slow planets down
    pub fn step_backward(&mut self) {
        self.is_paused = false;
        self.speed_mult = (self.speed_mult / 2.0).clamp(CLOCK_MIN_SPEED, CLOCK_MAX_SPEED);
    }

    // speed planets up
    pub fn step_forward(&mut self) {
        self.is_paused = false;
        self.speed_mult = (self.speed_mult * 2.0).clamp(CLOCK_MIN_SPEED, CLOCK_MAX_SPEED);
    }

    pub fn reset_to_normal(&mut self) {
        self.speed_mult = 1.0;
        self.is_paused = false;
    }

    pub fn advance(&mut self, real_delta_seconds: f64) {
        if self.is_paused {
            return;
        }

        let sim_delta_seconds = real_delta_seconds * self.speed_mult;
        // sub-millisecond precision keeps slow speeds moving
        let delta = chrono::Duration::microseconds((sim_delta_seconds * 1_000_000.0) as i64);
        if let Some(new_time) = self.sim_time.checked_add_signed(delta) {
            self.sim_time = new_time;
        }
    }

    /// Orbit angle for a body turning `speed` radians per clock millisecond.
    pub fn orbit_angle(&self, speed: f64) -> f32 {
        let millis = self.sim_time.timestamp_micros() as f64 / 1_000.0;
        (millis * speed).rem_euclid(std::f64::consts::TAU) as f32
    }

    pub fn readout(&self) -> String {
        let stamp = self.sim_time.format("%Y-%m-%d %H:%M:%S");
        if self.is_paused {
            format!("Clock: {} UTC (paused)", stamp)
        } else {
            format!("Clock: {} UTC x{}", stamp, self.speed_mult)
        }
    }
}

fn clock_controls(keys: Res<ButtonInput<KeyCode>>, mut clock: ResMut<SimClock>) {
    if keys.just_pressed(KeyCode::Period) {
        clock.step_forward();
    }
    if keys.just_pressed(KeyCode::Comma) {
        clock.step_backward();
    }
    if keys.just_pressed(KeyCode::Slash) {
        clock.reset_to_normal();
    }
    if keys.just_pressed(KeyCode::KeyP) {
        clock.toggle_pause();
    }
}

fn update(mut clock: ResMut<SimClock>, time: Res<Time>) {
    clock.advance(time.delta_secs_f64());
}
