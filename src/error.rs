//! Error type for the simulation engine
//!
//! Two families matter to callers:
//! - invalid input (parameters, phase), rejected before any state changes
//! - internal consistency faults, which abort the current run

use glam::Vec2;
use thiserror::Error;

/// Unified result type for the crate.
pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid {name} value: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("invalid simulation speed: {0} (expected {min}..={max})", min = crate::consts::MIN_SIM_SPEED, max = crate::consts::MAX_SIM_SPEED)]
    InvalidSimulationSpeed(f64),
    #[error("phase went backwards: {current} -> {requested}")]
    PhaseRegression { current: f64, requested: f64 },
    #[error("phase must be finite, got {0}")]
    NonFinitePhase(f64),
    #[error("{0} grid cells do not form a whole number of rings")]
    BrokenRingCount(usize),
    #[error("cell at {pos} lies outside the {size}x{size} matrix")]
    CellOutsideMatrix { pos: Vec2, size: usize },
    #[error("tile allocator stalled with {remaining} empty cells left")]
    AllocatorStalled { remaining: usize },
    #[error("matrix has not been built for this iteration")]
    MatrixMissing,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// True for errors that mean the tiling itself is inconsistent
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SimError::BrokenRingCount(_)
                | SimError::CellOutsideMatrix { .. }
                | SimError::AllocatorStalled { .. }
                | SimError::MatrixMissing
        )
    }
}
