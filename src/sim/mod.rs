//! Deterministic simulation module
//!
//! All tiling logic lives here. This module must be pure and deterministic:
//! - Driven only by the phase values passed to `Simulator::update`
//! - Seeded RNG only, consumed in a fixed order
//! - Stable iteration order (tiles in creation order, matrix u-major)
//! - No rendering or platform dependencies

pub mod allocator;
pub mod clash;
pub mod direction;
pub mod event;
pub mod grid_cell;
pub mod matrix;
pub mod phase;
pub mod state;
pub mod tick;
pub mod tile;
pub mod transition;

pub use allocator::TileAllocator;
pub use clash::{Clash, find_clashing_tile_pairs};
pub use direction::{Direction, are_opposite};
pub use event::SimEvent;
pub use grid_cell::GridCell;
pub use matrix::{CellCoords, Matrix, MatrixCell};
pub use phase::{ITERATION_PHASE_DURATION, PhaseState, PhaseStateHandler};
pub use state::Simulator;
pub use tile::{Tile, TileId, TileState};
pub use transition::{EaseInOutTransition, LinearTransition, TileTransition};
