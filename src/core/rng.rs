//! Seeded randomness and simulation time.
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// The only randomness source in the simulation (damage jitter, firing angles).
#[derive(Resource, Deref, DerefMut)]
pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Frame-stepped simulation clock. Advances by exactly one fixed step per frame,
/// independent of wall-clock time, so lifetimes line up with physics steps.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimClock {
    pub frame: u64,
    pub elapsed: Duration,
    pub step: Duration,
}

impl SimClock {
    pub fn from_frame_rate(frame_rate: f32) -> Self {
        Self {
            frame: 0,
            elapsed: Duration::ZERO,
            step: Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1.0))),
        }
    }

    pub fn advance(&mut self) {
        self.frame += 1;
        self.elapsed += self.step;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::from_frame_rate(60.0)
    }
}

pub(crate) fn advance_sim_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}
