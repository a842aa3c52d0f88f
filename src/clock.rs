//! Phase clock
//!
//! Converts wall-clock frame time into simulation phase. The phase only
//! grows while the clock is playing, at `speed` phase units per second.

use crate::consts::{DEFAULT_SIM_SPEED, MAX_SIM_SPEED, MIN_SIM_SPEED};
use crate::error::{Result, SimError};

#[derive(Debug, Clone)]
pub struct PhaseClock {
    phase: f64,
    speed: f64,
    playing: bool,
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self {
            phase: 0.0,
            speed: DEFAULT_SIM_SPEED,
            playing: false,
        }
    }
}

impl PhaseClock {
    /// Paused clock at phase 0
    pub fn new(speed: f64) -> Result<Self> {
        let mut clock = Self::default();
        clock.set_speed(speed)?;
        Ok(clock)
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        if !self.playing {
            log::debug!("Clock playing at phase {:.3}", self.phase);
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        if self.playing {
            log::debug!("Clock paused at phase {:.3}", self.phase);
            self.playing = false;
        }
    }

    /// Change speed (phase units per second)
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if !(MIN_SIM_SPEED..=MAX_SIM_SPEED).contains(&speed) {
            return Err(SimError::InvalidSimulationSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// Advance by `dt` seconds. Returns the new phase while playing.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        if !self.playing {
            return None;
        }
        self.phase += self.speed * dt.max(0.0);
        Some(self.phase)
    }
}
