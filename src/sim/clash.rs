//! Clash detection between facing tiles
//!
//! Before sliding, two tiles that point at each other from adjacent rows
//! (or columns) would move into the same cells. Such pairs annihilate.

use std::collections::HashMap;

use glam::Vec2;
use serde::Serialize;

use super::direction::are_opposite;
use super::matrix::Matrix;
use super::tile::{Tile, TileId};

/// Two tiles that would collide on their next slide
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Clash {
    /// The up or right pointing tile
    pub tile1: TileId,
    /// The tile facing it
    pub tile2: TileId,
    /// Midpoint of both destination centers
    pub pos: Vec2,
}

/// Find every clashing pair.
///
/// Only up/right tiles are scanned, each clash involves exactly one of them.
/// A clash requires both covered cells of the scanned tile to be faced by
/// the same tile, pointing the opposite way.
pub fn find_clashing_tile_pairs(tiles: &[Tile], matrix: &Matrix) -> Vec<Clash> {
    let by_id: HashMap<TileId, &Tile> = tiles.iter().map(|t| (t.id, t)).collect();

    let mut clashes = Vec::new();

    for t1 in tiles.iter().filter(|t| t.direction().is_up_or_right()) {
        let versor = t1.direction_versor();
        let (du, dv) = (versor.x as i32, versor.y as i32);

        let (pos1, pos2) = t1.occupied_cells();
        let ahead1 = matrix.transform_pos_to_grid_coords(pos1).offset(du, dv);
        let ahead2 = matrix.transform_pos_to_grid_coords(pos2).offset(du, dv);

        let Some(t2_id) = matrix.cell_at_coords(ahead1).tile else {
            continue;
        };
        if matrix.cell_at_coords(ahead2).tile != Some(t2_id) {
            continue;
        }
        let Some(t2) = by_id.get(&t2_id) else {
            continue;
        };

        if are_opposite(t1.direction(), t2.direction()) {
            clashes.push(Clash {
                tile1: t1.id,
                tile2: t2.id,
                pos: (t1.dest_center_pos() + t2.dest_center_pos()) * 0.5,
            });
        }
    }

    clashes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::direction::Direction;
    use crate::sim::grid_cell::GridCell;

    fn rings(n: u32) -> Vec<GridCell> {
        (0..n).flat_map(GridCell::ring).collect()
    }

    fn detect(tiles: &[Tile]) -> Vec<Clash> {
        let matrix = Matrix::new(tiles, &rings(3)).unwrap();
        find_clashing_tile_pairs(tiles, &matrix)
    }

    #[test]
    fn test_vertical_facing_pair_clashes() {
        let tiles = [
            Tile::new(1, Vec2::new(0.0, -0.5), Direction::Up, 0.0),
            Tile::new(2, Vec2::new(0.0, 0.5), Direction::Down, 0.0),
        ];
        let clashes = detect(&tiles);
        assert_eq!(
            clashes,
            vec![Clash {
                tile1: 1,
                tile2: 2,
                pos: Vec2::ZERO
            }]
        );
    }

    #[test]
    fn test_horizontal_facing_pair_clashes() {
        let tiles = [
            Tile::new(1, Vec2::new(1.5, 0.0), Direction::Left, 0.0),
            Tile::new(2, Vec2::new(0.5, 0.0), Direction::Right, 0.0),
        ];
        let clashes = detect(&tiles);
        assert_eq!(clashes.len(), 1);
        // The right-pointing tile is reported first
        assert_eq!(clashes[0].tile1, 2);
        assert_eq!(clashes[0].tile2, 1);
        assert_eq!(clashes[0].pos, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_pair_pointing_apart_does_not_clash() {
        // The freshly placed pair of a block points outward
        let tiles = [
            Tile::new(1, Vec2::new(0.0, 0.5), Direction::Up, 0.0),
            Tile::new(2, Vec2::new(0.0, -0.5), Direction::Down, 0.0),
        ];
        assert!(detect(&tiles).is_empty());
    }

    #[test]
    fn test_same_direction_does_not_clash() {
        let tiles = [
            Tile::new(1, Vec2::new(0.0, -0.5), Direction::Up, 0.0),
            Tile::new(2, Vec2::new(0.0, 0.5), Direction::Up, 0.0),
        ];
        assert!(detect(&tiles).is_empty());
    }

    #[test]
    fn test_misaligned_opposite_tiles_do_not_clash() {
        // Facing each other but shifted by one cell: destinations differ
        let tiles = [
            Tile::new(1, Vec2::new(0.0, -0.5), Direction::Up, 0.0),
            Tile::new(2, Vec2::new(1.0, 0.5), Direction::Down, 0.0),
        ];
        assert!(detect(&tiles).is_empty());
    }

    #[test]
    fn test_each_clash_has_one_up_or_right_tile() {
        let tiles = [
            Tile::new(1, Vec2::new(0.0, -0.5), Direction::Up, 0.0),
            Tile::new(2, Vec2::new(0.0, 0.5), Direction::Down, 0.0),
            Tile::new(3, Vec2::new(-2.5, 0.0), Direction::Right, 0.0),
            Tile::new(4, Vec2::new(-1.5, 0.0), Direction::Left, 0.0),
        ];
        let clashes = detect(&tiles);
        assert_eq!(clashes.len(), 2);
        for clash in &clashes {
            let d1 = tiles.iter().find(|t| t.id == clash.tile1).unwrap().direction();
            let d2 = tiles.iter().find(|t| t.id == clash.tile2).unwrap().direction();
            assert!(d1.is_up_or_right());
            assert!(!d2.is_up_or_right());
        }
    }
}
