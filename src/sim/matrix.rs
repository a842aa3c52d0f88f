//! Occupancy matrix of the Aztec diamond
//!
//! Matrix coordinates are named (u, v), u along +x and v along +y, with the
//! origin in the lower-left corner. The matrix is a square of side `2n`
//! where `n` is the number of rings grown so far; it is rebuilt from the
//! tile and grid-cell lists once per iteration.

use glam::Vec2;
use serde::Serialize;

use super::grid_cell::{GridCell, cell_count_for_rings};
use super::tile::{Tile, TileId};
use crate::error::{Result, SimError};

/// Integer matrix coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellCoords {
    pub u: i32,
    pub v: i32,
}

impl CellCoords {
    pub const fn new(u: i32, v: i32) -> Self {
        Self { u, v }
    }

    pub fn offset(self, du: i32, dv: i32) -> Self {
        Self::new(self.u + du, self.v + dv)
    }
}

/// State of a single matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixCell {
    /// Inside the current diamond
    pub has_grid_cell: bool,
    pub has_tile: bool,
    /// Tile covering the cell; `None` for provisional allocator occupancy
    pub tile: Option<TileId>,
}

impl MatrixCell {
    /// What lookups outside the matrix report
    pub const OUTSIDE: MatrixCell = MatrixCell {
        has_grid_cell: false,
        has_tile: false,
        tile: None,
    };

    /// Provisional occupancy used while allocating insertion points
    pub const RESERVED: MatrixCell = MatrixCell {
        has_grid_cell: true,
        has_tile: true,
        tile: None,
    };
}

/// Number of rings `n` such that `2n(n+1) == grid_cells`
pub fn ring_count(grid_cells: usize) -> Result<usize> {
    let n = ((1.0 + 2.0 * grid_cells as f64).sqrt() - 1.0) / 2.0;
    let rings = n.round() as usize;
    if cell_count_for_rings(rings) != grid_cells {
        return Err(SimError::BrokenRingCount(grid_cells));
    }
    Ok(rings)
}

#[derive(Debug, Clone)]
pub struct Matrix {
    /// Column-major: index = u * size + v
    cells: Vec<MatrixCell>,
    size: usize,
}

impl Matrix {
    /// Build the matrix for the current iteration
    pub fn new(tiles: &[Tile], grid_cells: &[GridCell]) -> Result<Self> {
        let size = 2 * ring_count(grid_cells.len())?;

        let mut matrix = Self {
            cells: vec![MatrixCell::default(); size * size],
            size,
        };

        for grid_cell in grid_cells {
            let index = matrix.index_at_pos(grid_cell.center_pos)?;
            matrix.cells[index].has_grid_cell = true;
        }

        for tile in tiles {
            matrix.add_tile(tile)?;
        }

        Ok(matrix)
    }

    /// Side length of the square
    pub fn size(&self) -> usize {
        self.size
    }

    /// Mark the tile's two occupied cells
    pub fn add_tile(&mut self, tile: &Tile) -> Result<()> {
        let (pos1, pos2) = tile.occupied_cells();
        let index1 = self.index_at_pos(pos1)?;
        let index2 = self.index_at_pos(pos2)?;

        for index in [index1, index2] {
            self.cells[index].has_tile = true;
            self.cells[index].tile = Some(tile.id);
        }
        Ok(())
    }

    /// Clear the tile's two occupied cells
    pub fn remove_tile(&mut self, tile: &Tile) {
        let (pos1, pos2) = tile.occupied_cells();
        for pos in [pos1, pos2] {
            if let Ok(index) = self.index_at_pos(pos) {
                self.cells[index].has_tile = false;
                self.cells[index].tile = None;
            }
        }
    }

    pub fn transform_pos_to_grid_coords(&self, pos: Vec2) -> CellCoords {
        let half = self.size as f32 / 2.0;
        CellCoords::new(
            (pos.x + half).floor() as i32,
            (pos.y + half).floor() as i32,
        )
    }

    /// Center of the cell at `coords`
    pub fn transform_grid_coords_to_pos(&self, coords: CellCoords) -> Vec2 {
        let half = self.size as f32 / 2.0;
        Vec2::new(
            coords.u as f32 - half + 0.5,
            coords.v as f32 - half + 0.5,
        )
    }

    fn index(&self, coords: CellCoords) -> Option<usize> {
        let size = self.size as i32;
        if coords.u < 0 || coords.u >= size || coords.v < 0 || coords.v >= size {
            return None;
        }
        Some(coords.u as usize * self.size + coords.v as usize)
    }

    fn index_at_pos(&self, pos: Vec2) -> Result<usize> {
        self.index(self.transform_pos_to_grid_coords(pos))
            .ok_or_else(|| SimError::CellOutsideMatrix {
                pos,
                size: self.size,
            })
    }

    /// Cell at `coords`; outside the matrix this is `MatrixCell::OUTSIDE`
    pub fn cell_at_coords(&self, coords: CellCoords) -> MatrixCell {
        match self.index(coords) {
            Some(index) => self.cells[index],
            None => MatrixCell::OUTSIDE,
        }
    }

    pub fn cell_at_pos(&self, pos: Vec2) -> MatrixCell {
        self.cell_at_coords(self.transform_pos_to_grid_coords(pos))
    }

    /// Overwrite a cell. Writes outside the matrix are ignored.
    pub fn set_cell_at_coords(&mut self, coords: CellCoords, cell: MatrixCell) {
        if let Some(index) = self.index(coords) {
            self.cells[index] = cell;
        }
    }

    /// Inside the diamond and not covered by a tile
    pub fn is_cell_empty(&self, coords: CellCoords) -> bool {
        let cell = self.cell_at_coords(coords);
        cell.has_grid_cell && !cell.has_tile
    }

    /// Outside the diamond or covered by a tile
    pub fn is_cell_unusable(&self, coords: CellCoords) -> bool {
        let cell = self.cell_at_coords(coords);
        !cell.has_grid_cell || cell.has_tile
    }

    /// All empty cells, u-major then v
    pub fn empty_cells_coords(&self) -> Vec<CellCoords> {
        let size = self.size as i32;
        let mut result = Vec::new();
        for u in 0..size {
            for v in 0..size {
                let coords = CellCoords::new(u, v);
                if self.is_cell_empty(coords) {
                    result.push(coords);
                }
            }
        }
        result
    }

    /// Number of cells inside the diamond
    pub fn grid_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.has_grid_cell).count()
    }
}
