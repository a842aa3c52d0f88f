//! Boundary grid cells of the Aztec diamond

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single unit cell of the diamond, identified by its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub center_pos: Vec2,
}

impl GridCell {
    pub fn new(center_pos: Vec2) -> Self {
        Self { center_pos }
    }

    /// Cells of the ring that grows the diamond at `iteration_index`
    /// (0 for the very first ring).
    ///
    /// Each of the 4 quadrants gets `1 + iteration_index` cells, laid out
    /// diagonally from the axis point at distance `1 + iteration_index`.
    pub fn ring(iteration_index: u32) -> Vec<GridCell> {
        let cells_per_quadrant = 1 + iteration_index;
        let offset_length = (1 + iteration_index) as f32;

        let mut cells = Vec::with_capacity(4 * cells_per_quadrant as usize);

        for quadrant in 0..4 {
            // Axis point the quadrant starts from
            let (ux, uy) = match quadrant {
                0 => (1.0, 0.0),
                1 => (0.0, 1.0),
                2 => (-1.0, 0.0),
                _ => (0.0, -1.0),
            };
            let offset = Vec2::new(ux, uy) * offset_length;

            // Diagonal step along the quadrant edge
            let dx = if quadrant == 0 || quadrant == 1 { -1.0 } else { 1.0 };
            let dy = if quadrant == 0 || quadrant == 3 { 1.0 } else { -1.0 };
            let delta = Vec2::new(dx, dy);

            for i in 0..cells_per_quadrant {
                cells.push(GridCell::new(offset + (i as f32 + 0.5) * delta));
            }
        }

        cells
    }
}

/// Total number of grid cells after `rings` rings: 2n(n+1)
pub fn cell_count_for_rings(rings: usize) -> usize {
    2 * rings * (rings + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ring() {
        let cells = GridCell::ring(0);
        let positions: Vec<Vec2> = cells.iter().map(|c| c.center_pos).collect();
        assert_eq!(
            positions,
            vec![
                Vec2::new(0.5, 0.5),
                Vec2::new(-0.5, 0.5),
                Vec2::new(-0.5, -0.5),
                Vec2::new(0.5, -0.5),
            ]
        );
    }

    #[test]
    fn test_second_ring_lies_on_diamond_edge() {
        let cells = GridCell::ring(1);
        assert_eq!(cells.len(), 8);
        for cell in &cells {
            // Cells of the second ring satisfy |x| + |y| = 2
            let p = cell.center_pos;
            assert_eq!(p.x.abs() + p.y.abs(), 2.0);
        }
        assert!(cells.iter().any(|c| c.center_pos == Vec2::new(1.5, 0.5)));
        assert!(cells.iter().any(|c| c.center_pos == Vec2::new(0.5, 1.5)));
    }

    #[test]
    fn test_rings_never_repeat_cells() {
        let mut all: Vec<Vec2> = Vec::new();
        for i in 0..6 {
            all.extend(GridCell::ring(i).iter().map(|c| c.center_pos));
        }
        assert_eq!(all.len(), cell_count_for_rings(6));
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
