//! Simulation parameters
//!
//! Owned by the simulator and changed through its validated setters.
//! Can also be loaded from / saved to a JSON file for the headless runner.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_ITERATIONS, DEFAULT_RANDOM_BIAS_COEF};
use crate::error::{Result, SimError};

/// How tiles are presented by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Colors,
    Arrows,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Colors => "colors",
            DisplayMode::Arrows => "arrows",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "colors" | "colours" => Some(DisplayMode::Colors),
            "arrows" => Some(DisplayMode::Arrows),
            _ => None,
        }
    }
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParams {
    /// Iteration after which the simulation stops (>= 1)
    pub max_iterations: u32,
    /// Seed of the pseudo-random source
    pub random_seed: u64,
    /// Probability threshold in [0, 1]. A draw above it yields a vertical
    /// pair, otherwise a horizontal one. 0.5 is a fair tiling.
    pub random_bias_coef: f64,
    /// Whether the arctic circle overlay is shown
    pub arctic_circle_active: bool,
    pub display_mode: DisplayMode,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            random_seed: 0,
            random_bias_coef: DEFAULT_RANDOM_BIAS_COEF,
            arctic_circle_active: false,
            display_mode: DisplayMode::Colors,
        }
    }
}

impl SimulationParams {
    /// Default parameters with the given seed
    pub fn with_seed(random_seed: u64) -> Self {
        Self {
            random_seed,
            ..Self::default()
        }
    }

    /// Check every range-constrained field
    pub fn validate(&self) -> Result<()> {
        validate_max_iterations(self.max_iterations)?;
        validate_random_bias_coef(self.random_bias_coef)?;
        Ok(())
    }

    /// Parse and validate parameters from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load parameters from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let params = Self::from_json(&json)?;
        log::info!("Loaded simulation params from {}", path.display());
        Ok(params)
    }

    /// Save parameters to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        log::info!("Simulation params saved to {}", path.display());
        Ok(())
    }
}

pub(crate) fn validate_max_iterations(max_iterations: u32) -> Result<()> {
    if max_iterations < 1 {
        return Err(SimError::InvalidParameter {
            name: "maxIterations",
            value: max_iterations as f64,
        });
    }
    Ok(())
}

pub(crate) fn validate_random_bias_coef(coef: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&coef) {
        return Err(SimError::InvalidParameter {
            name: "randomBiasCoef",
            value: coef,
        });
    }
    Ok(())
}
