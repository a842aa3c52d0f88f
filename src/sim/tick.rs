//! Phase-driven simulation step
//!
//! `update` advances every tile to the new phase, then runs the handler of
//! each phase state reached, in order:
//!   1. AddingGridCells     - grow the diamond by one ring
//!   2. RemovingTiles       - annihilate clashing pairs
//!   3. TransitioningTiles  - slide survivors one unit
//!   4. ShowingPlaceholders - rebuild the matrix, find insertion points
//!   5. AddingTiles         - fill each insertion point with a random pair

use std::collections::HashSet;

use rand::Rng;

use super::allocator::TileAllocator;
use super::clash::find_clashing_tile_pairs;
use super::direction::Direction;
use super::event::SimEvent;
use super::grid_cell::GridCell;
use super::matrix::Matrix;
use super::phase::PhaseState;
use super::state::Simulator;
use super::tile::{Tile, TileId, TileState};
use crate::error::{Result, SimError};

impl Simulator {
    /// Advance the simulation to `phase`.
    ///
    /// Does nothing once the simulator stopped. A fatal error stops the run
    /// and is returned.
    pub fn update(&mut self, phase: f64) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        if !phase.is_finite() {
            return Err(SimError::NonFinitePhase(phase));
        }
        if phase < self.phase {
            return Err(SimError::PhaseRegression {
                current: self.phase,
                requested: phase,
            });
        }

        self.phase = phase;

        for tile in &mut self.tiles {
            tile.update(phase);
        }

        let mut handler = self.phase_handler.clone();
        let mut outcome = Ok(());
        handler.update_with(phase, |state| match self.enter_state(state) {
            Ok(()) => self.running,
            Err(err) => {
                outcome = Err(err);
                false
            }
        });
        self.phase_handler = handler;

        outcome
    }

    /// Run the handler of a newly entered state. A failure stops the run.
    fn enter_state(&mut self, state: PhaseState) -> Result<()> {
        self.phase_state = Some(state);
        self.emit(SimEvent::PhaseStateChanged(state));

        if let Err(err) = self.on_phase_state_change(state) {
            log::error!(
                "Simulation aborted in iteration {} ({:?}): {}",
                self.iteration_index,
                state,
                err
            );
            self.set_running_state(false);
            return Err(err);
        }
        Ok(())
    }

    fn on_phase_state_change(&mut self, state: PhaseState) -> Result<()> {
        match state {
            PhaseState::AddingGridCells => {
                self.add_grid_cells();
                // First state in the sequence: a new iteration starts
                self.iteration_index += 1;
                log::info!("Iteration {} started", self.iteration_index);
                self.emit(SimEvent::IterationStarted(self.iteration_index));
                Ok(())
            }
            PhaseState::RemovingTiles => {
                self.remove_tiles();
                Ok(())
            }
            PhaseState::TransitioningTiles => {
                self.transition_tiles();
                Ok(())
            }
            PhaseState::ShowingPlaceholders => self.show_placeholders(),
            PhaseState::AddingTiles => self.add_tiles(),
        }
    }

    /// Grow the diamond by one ring
    fn add_grid_cells(&mut self) {
        let added = GridCell::ring(self.iteration_index);
        log::debug!("Adding {} grid cells", added.len());

        self.grid_cells.extend_from_slice(&added);
        self.emit(SimEvent::GridCellsAdded(added));
    }

    /// Remove both tiles of every clashing pair
    fn remove_tiles(&mut self) {
        let clashes = match &self.matrix {
            Some(matrix) => find_clashing_tile_pairs(&self.tiles, matrix),
            // No tile has been placed yet
            None => Vec::new(),
        };

        let ids: Vec<TileId> = clashes
            .iter()
            .flat_map(|clash| [clash.tile1, clash.tile2])
            .collect();
        let id_set: HashSet<TileId> = ids.iter().copied().collect();

        let mut removed: Vec<Tile> = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(tile) = self.tiles.iter().find(|t| t.id == *id) {
                removed.push(tile.clone());
            }
        }
        self.tiles.retain(|t| !id_set.contains(&t.id));

        if let Some(matrix) = &mut self.matrix {
            for tile in &removed {
                matrix.remove_tile(tile);
            }
        }

        log::debug!("Removed {} tiles in {} clashes", removed.len(), clashes.len());
        self.emit(SimEvent::ClashesDetected(clashes));
        self.emit(SimEvent::TilesRemoved(removed));
    }

    /// Start sliding every tile. A slide left unfinished by a large phase
    /// step is completed first.
    fn transition_tiles(&mut self) {
        for tile in &mut self.tiles {
            if tile.state() == TileState::Transitioning {
                tile.finish_transition();
            }
            tile.start_transition(self.transition.clone());
        }
    }

    /// Rebuild the matrix and find this iteration's insertion points
    fn show_placeholders(&mut self) -> Result<()> {
        let mut matrix = Matrix::new(&self.tiles, &self.grid_cells)?;
        let points = TileAllocator::new(&mut matrix).find_insertion_points()?;

        // Reserved blocks are overwritten when their tiles are added
        self.matrix = Some(matrix);
        self.insertion_points = points.clone();

        log::debug!("Found {} insertion points", points.len());
        self.emit(SimEvent::PlaceholdersAdded(points));
        Ok(())
    }

    /// Place one random pair on every insertion point
    fn add_tiles(&mut self) -> Result<()> {
        if self.matrix.is_none() {
            return Err(SimError::MatrixMissing);
        }

        let points = std::mem::take(&mut self.insertion_points);
        let mut added: Vec<Tile> = Vec::with_capacity(2 * points.len());

        for ip in &points {
            let (dir1, dir2) = if self.rng.random::<f64>() > self.params.random_bias_coef {
                (Direction::Up, Direction::Down)
            } else {
                (Direction::Right, Direction::Left)
            };

            for direction in [dir1, dir2] {
                let id = self.next_tile_id();
                // Each tile sits on the half of the block it points toward
                let center = *ip + direction.versor() * 0.5;
                added.push(Tile::new(id, center, direction, self.phase));
            }
        }

        if let Some(matrix) = &mut self.matrix {
            for tile in &added {
                matrix.add_tile(tile)?;
            }
        }
        self.tiles.extend(added.iter().cloned());
        self.insertion_points = points;

        self.emit(SimEvent::TilesAdded(added));

        if self.iteration_index >= self.params.max_iterations {
            log::info!(
                "Reached max iterations ({}), stopping",
                self.params.max_iterations
            );
            self.set_running_state(false);
        }
        Ok(())
    }
}
