//! Notifications emitted by the simulator
//!
//! Events are queued in emission order and handed out by
//! `Simulator::drain_events`. Consumers only read them.

use glam::Vec2;
use serde::Serialize;

use super::clash::Clash;
use super::grid_cell::GridCell;
use super::phase::PhaseState;
use super::tile::Tile;
use crate::params::DisplayMode;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum SimEvent {
    /// A new iteration began (1-based index)
    IterationStarted(u32),
    RunningStateChanged(bool),
    GridCellsAdded(Vec<GridCell>),
    /// Centers of the 2x2 blocks about to receive tile pairs
    PlaceholdersAdded(Vec<Vec2>),
    TilesAdded(Vec<Tile>),
    TilesRemoved(Vec<Tile>),
    /// Where each removed pair annihilated
    ClashesDetected(Vec<Clash>),
    PhaseStateChanged(PhaseState),
    MaxIterationsChanged(u32),
    RandomSeedChanged(u64),
    RandomBiasCoefChanged(f64),
    ArcticCircleActiveChanged(bool),
    DisplayModeChanged(DisplayMode),
}

impl SimEvent {
    /// Short name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::IterationStarted(_) => "iterationStarted",
            SimEvent::RunningStateChanged(_) => "runningStateChanged",
            SimEvent::GridCellsAdded(_) => "gridCellsAdded",
            SimEvent::PlaceholdersAdded(_) => "placeholdersAdded",
            SimEvent::TilesAdded(_) => "tilesAdded",
            SimEvent::TilesRemoved(_) => "tilesRemoved",
            SimEvent::ClashesDetected(_) => "clashesDetected",
            SimEvent::PhaseStateChanged(_) => "phaseStateChanged",
            SimEvent::MaxIterationsChanged(_) => "maxIterationsChanged",
            SimEvent::RandomSeedChanged(_) => "randomSeedChanged",
            SimEvent::RandomBiasCoefChanged(_) => "randomBiasCoefChanged",
            SimEvent::ArcticCircleActiveChanged(_) => "arcticCircleActiveChanged",
            SimEvent::DisplayModeChanged(_) => "displayModeChanged",
        }
    }
}
