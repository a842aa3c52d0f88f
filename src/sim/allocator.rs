//! Insertion point allocation for new tile pairs
//!
//! After the surviving tiles slide, the empty part of the diamond splits
//! into 2x2 blocks. Each block receives one randomly oriented tile pair.
//!
//! Algorithm, repeated until the empty space is covered:
//!   1. List every (possibly overlapping) 2x2 empty block.
//!   2. Keep the blocks sitting in a corner: for at least one of their
//!      corners, both outside neighbours of that corner are unusable.
//!      Nothing else can cover that corner cell, so the block is forced.
//!   3. Mark the kept blocks as occupied.
//!
//! Every round covers at least one block, so at most `ceil(empty / 4)`
//! rounds are needed.

use glam::Vec2;

use super::matrix::{CellCoords, Matrix, MatrixCell};
use crate::error::{Result, SimError};

/// For each corner of a block (lower-left cell at 0,0), the two cells
/// diagonally outside that corner, as offsets from the lower-left cell.
const CORNER_NEIGHBORS: [[(i32, i32); 2]; 4] = [
    // Lower-left
    [(-1, 0), (0, -1)],
    // Lower-right
    [(2, 0), (1, -1)],
    // Upper-left
    [(-1, 1), (0, 2)],
    // Upper-right
    [(2, 1), (1, 2)],
];

const BLOCK_CELLS: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

pub struct TileAllocator<'a> {
    matrix: &'a mut Matrix,
}

impl<'a> TileAllocator<'a> {
    pub fn new(matrix: &'a mut Matrix) -> Self {
        Self { matrix }
    }

    /// Centers of the 2x2 blocks covering all empty space, in discovery order.
    ///
    /// The matrix is left with every block provisionally occupied.
    pub fn find_insertion_points(&mut self) -> Result<Vec<Vec2>> {
        let num_empty = self.matrix.empty_cells_coords().len();
        let max_rounds = num_empty.div_ceil(4);

        let mut found: Vec<CellCoords> = Vec::new();

        for round in 0..max_rounds {
            let candidates = self.find_two_by_two_empty_spaces();
            if candidates.is_empty() {
                break;
            }

            let forced = self.find_spaces_in_corners(&candidates);
            let claimed = self.mark_as_occupied(&forced);

            if claimed.is_empty() {
                let remaining = self.matrix.empty_cells_coords().len();
                log::error!("Allocator stalled in round {round} with {remaining} empty cells");
                return Err(SimError::AllocatorStalled { remaining });
            }
            found.extend(claimed);
        }

        let remaining = self.matrix.empty_cells_coords().len();
        if remaining > 0 {
            log::error!("Allocator left {remaining} empty cells uncovered");
            return Err(SimError::AllocatorStalled { remaining });
        }

        Ok(found
            .into_iter()
            // Lower-left cell center + (0.5, 0.5) is the block center
            .map(|coords| self.matrix.transform_grid_coords_to_pos(coords) + Vec2::splat(0.5))
            .collect())
    }

    fn is_block_empty(&self, corner: CellCoords) -> bool {
        BLOCK_CELLS
            .iter()
            .all(|&(du, dv)| self.matrix.is_cell_empty(corner.offset(du, dv)))
    }

    /// Lower-left cells of all 2x2 empty blocks
    fn find_two_by_two_empty_spaces(&self) -> Vec<CellCoords> {
        self.matrix
            .empty_cells_coords()
            .into_iter()
            .filter(|&c| self.is_block_empty(c))
            .collect()
    }

    /// Blocks with at least one corner closed off on both outer sides
    fn find_spaces_in_corners(&self, blocks: &[CellCoords]) -> Vec<CellCoords> {
        blocks
            .iter()
            .copied()
            .filter(|&block| {
                CORNER_NEIGHBORS.iter().any(|pair| {
                    pair.iter()
                        .all(|&(du, dv)| self.matrix.is_cell_unusable(block.offset(du, dv)))
                })
            })
            .collect()
    }

    /// Reserve the blocks' cells. A block overlapping one reserved earlier
    /// in the same round is left for the next round.
    fn mark_as_occupied(&mut self, blocks: &[CellCoords]) -> Vec<CellCoords> {
        let mut claimed = Vec::with_capacity(blocks.len());
        for &block in blocks {
            if !self.is_block_empty(block) {
                log::debug!("Deferring overlapping block at ({}, {})", block.u, block.v);
                continue;
            }
            for (du, dv) in BLOCK_CELLS {
                self.matrix
                    .set_cell_at_coords(block.offset(du, dv), MatrixCell::RESERVED);
            }
            claimed.push(block);
        }
        claimed
    }
}
