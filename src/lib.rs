//! Domino Shuffle - Aztec diamond tiling engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, tiles, shuffling, phase states)
//! - `clock`: Phase clock that turns frame time into simulation phase
//! - `params`: Simulation parameters, loadable from JSON
//! - `error`: Error type shared by the whole crate

pub mod clock;
pub mod error;
pub mod params;
pub mod sim;

pub use clock::PhaseClock;
pub use error::{Result, SimError};
pub use params::{DisplayMode, SimulationParams};
pub use sim::{SimEvent, Simulator};

/// Engine configuration constants
pub mod consts {
    /// Frames per second of the headless driver
    pub const FRAMES_PER_SEC: u32 = 30;
    /// Wall-clock seconds per driver frame
    pub const FRAME_DT: f64 = 1.0 / FRAMES_PER_SEC as f64;

    /// Simulation speed bounds (phase units per second)
    pub const MIN_SIM_SPEED: f64 = 0.5;
    pub const MAX_SIM_SPEED: f64 = 5.0;
    pub const DEFAULT_SIM_SPEED: f64 = 2.0;

    /// Default simulation parameters
    pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
    pub const DEFAULT_RANDOM_BIAS_COEF: f64 = 0.5;

    /// Upper bound (exclusive) for generated seeds
    pub const MAX_GENERATED_SEED: u64 = (1 << 31) - 1;
}
