//! Simulator state
//!
//! Everything the engine owns lives here: tiles, grid cells, the matrix of
//! the current iteration, the seeded RNG and the pending event queue.
//! The per-phase logic is in `tick`.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::direction::Direction;
use super::event::SimEvent;
use super::grid_cell::GridCell;
use super::matrix::Matrix;
use super::phase::{PhaseState, PhaseStateHandler};
use super::tile::{Tile, TileId};
use super::transition::{LinearTransition, TileTransition};
use crate::error::Result;
use crate::params::{
    DisplayMode, SimulationParams, validate_max_iterations, validate_random_bias_coef,
};

/// The domino shuffling engine
#[derive(Debug)]
pub struct Simulator {
    pub(super) params: SimulationParams,
    pub(super) rng: Pcg32,
    pub(super) phase: f64,
    pub(super) running: bool,
    /// Number of iterations started so far
    pub(super) iteration_index: u32,
    pub(super) phase_state: Option<PhaseState>,
    pub(super) phase_handler: PhaseStateHandler,
    pub(super) tiles: Vec<Tile>,
    pub(super) grid_cells: Vec<GridCell>,
    /// Built when placeholders are shown, kept in sync until the next rebuild
    pub(super) matrix: Option<Matrix>,
    pub(super) insertion_points: Vec<Vec2>,
    /// Cloned into every tile that starts sliding
    pub(super) transition: Box<dyn TileTransition>,
    pub(super) events: Vec<SimEvent>,
    next_id: TileId,
}

impl Simulator {
    /// Create a running simulator with linear tile motion
    pub fn new(params: SimulationParams) -> Result<Self> {
        Self::with_transition(params, LinearTransition::boxed())
    }

    /// Create a running simulator with a custom tile motion law
    pub fn with_transition(
        params: SimulationParams,
        transition: Box<dyn TileTransition>,
    ) -> Result<Self> {
        params.validate()?;

        let mut sim = Self {
            rng: Pcg32::seed_from_u64(params.random_seed),
            params,
            phase: 0.0,
            running: false,
            iteration_index: 0,
            phase_state: None,
            phase_handler: PhaseStateHandler::new(0.0),
            tiles: Vec::new(),
            grid_cells: Vec::new(),
            matrix: None,
            insertion_points: Vec::new(),
            transition,
            events: Vec::new(),
            next_id: 1,
        };
        sim.set_running_state(true);

        Ok(sim)
    }

    /// Allocate a new tile ID
    pub(super) fn next_tile_id(&mut self) -> TileId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(super) fn emit(&mut self, event: SimEvent) {
        log::trace!("Event: {}", event.name());
        self.events.push(event);
    }

    pub(super) fn set_running_state(&mut self, running: bool) {
        self.running = running;
        self.emit(SimEvent::RunningStateChanged(running));
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted since the last drain
    pub fn pending_events(&self) -> &[SimEvent] {
        &self.events
    }

    // === Queries ===

    pub fn params(&self) -> SimulationParams {
        self.params.clone()
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn iteration_index(&self) -> u32 {
        self.iteration_index
    }

    pub fn phase_state(&self) -> Option<PhaseState> {
        self.phase_state
    }

    /// Copy of the current tiles
    pub fn tiles(&self) -> Vec<Tile> {
        self.tiles.clone()
    }

    pub fn grid_cells(&self) -> &[GridCell] {
        &self.grid_cells
    }

    pub fn insertion_points(&self) -> &[Vec2] {
        &self.insertion_points
    }

    pub fn matrix(&self) -> Option<&Matrix> {
        self.matrix.as_ref()
    }

    /// Number of tiles pointing in each direction
    pub fn direction_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts: BTreeMap<&'static str, usize> = Direction::ALL
            .iter()
            .map(|d| (direction_name(*d), 0))
            .collect();
        for tile in &self.tiles {
            *counts.entry(direction_name(tile.direction())).or_default() += 1;
        }
        counts
    }

    // === Parameter setters ===

    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<()> {
        validate_max_iterations(max_iterations)?;
        self.params.max_iterations = max_iterations;
        self.emit(SimEvent::MaxIterationsChanged(max_iterations));
        Ok(())
    }

    /// Change the seed and restart the random stream from it
    pub fn set_random_seed(&mut self, seed: u64) {
        self.params.random_seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.emit(SimEvent::RandomSeedChanged(seed));
    }

    pub fn set_random_bias_coef(&mut self, coef: f64) -> Result<()> {
        validate_random_bias_coef(coef)?;
        self.params.random_bias_coef = coef;
        self.emit(SimEvent::RandomBiasCoefChanged(coef));
        Ok(())
    }

    pub fn set_arctic_circle_active(&mut self, active: bool) {
        self.params.arctic_circle_active = active;
        self.emit(SimEvent::ArcticCircleActiveChanged(active));
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.params.display_mode = mode;
        self.emit(SimEvent::DisplayModeChanged(mode));
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "up",
        Direction::Down => "down",
        Direction::Left => "left",
        Direction::Right => "right",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_new_simulator_is_running() {
        let mut sim = Simulator::new(SimulationParams::with_seed(1)).unwrap();
        assert!(sim.is_running());
        assert_eq!(sim.phase(), 0.0);
        assert_eq!(sim.iteration_index(), 0);
        assert!(sim.tiles().is_empty());

        let events = sim.drain_events();
        assert!(matches!(events[..], [SimEvent::RunningStateChanged(true)]));
        assert!(sim.pending_events().is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_params() {
        let mut params = SimulationParams::with_seed(1);
        params.random_bias_coef = -0.1;
        assert!(matches!(
            Simulator::new(params),
            Err(SimError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_setters_validate_and_notify() {
        let mut sim = Simulator::new(SimulationParams::with_seed(1)).unwrap();
        sim.drain_events();

        assert!(sim.set_max_iterations(0).is_err());
        assert!(sim.set_random_bias_coef(1.5).is_err());
        // Failed setters change nothing and emit nothing
        assert_eq!(sim.params(), SimulationParams::with_seed(1));
        assert!(sim.pending_events().is_empty());

        sim.set_max_iterations(5).unwrap();
        sim.set_random_bias_coef(0.25).unwrap();
        sim.set_random_seed(99);
        sim.set_arctic_circle_active(true);
        sim.set_display_mode(DisplayMode::Arrows);

        let params = sim.params();
        assert_eq!(params.max_iterations, 5);
        assert_eq!(params.random_bias_coef, 0.25);
        assert_eq!(params.random_seed, 99);
        assert!(params.arctic_circle_active);
        assert_eq!(params.display_mode, DisplayMode::Arrows);

        let names: Vec<&str> = sim.drain_events().iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "maxIterationsChanged",
                "randomBiasCoefChanged",
                "randomSeedChanged",
                "arcticCircleActiveChanged",
                "displayModeChanged",
            ]
        );
    }

    #[test]
    fn test_params_are_a_copy() {
        let sim = Simulator::new(SimulationParams::with_seed(3)).unwrap();
        let mut params = sim.params();
        params.max_iterations = 1;
        assert_eq!(sim.params().max_iterations, 100);
    }
}
