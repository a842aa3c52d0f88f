//! Tile directions and their unit displacement vectors

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Direction a tile points (and slides) in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit displacement vector
    pub fn versor(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Right-hand perpendicular of the versor, the axis a tile lies along
    pub fn perpendicular(self) -> Vec2 {
        let v = self.versor();
        Vec2::new(v.y, -v.x)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Rotation from the "up" sprite orientation, counter-clockwise (radians)
    pub fn rotation_angle(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Direction::Up => 0.0,
            Direction::Left => FRAC_PI_2,
            Direction::Down => PI,
            Direction::Right => 3.0 * FRAC_PI_2,
        }
    }

    /// Up and right tiles are the ones the clash detector scans
    pub fn is_up_or_right(self) -> bool {
        matches!(self, Direction::Up | Direction::Right)
    }
}

impl From<Direction> for Vec2 {
    fn from(direction: Direction) -> Self {
        direction.versor()
    }
}

/// True for (up, down) and (left, right) in either order
#[inline]
pub fn are_opposite(d1: Direction, d2: Direction) -> bool {
    d1.opposite() == d2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versors() {
        assert_eq!(Vec2::from(Direction::Up), Vec2::new(0.0, 1.0));
        assert_eq!(Vec2::from(Direction::Down), Vec2::new(0.0, -1.0));
        assert_eq!(Vec2::from(Direction::Left), Vec2::new(-1.0, 0.0));
        assert_eq!(Vec2::from(Direction::Right), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_are_opposite() {
        assert!(are_opposite(Direction::Up, Direction::Down));
        assert!(are_opposite(Direction::Down, Direction::Up));
        assert!(are_opposite(Direction::Left, Direction::Right));
        assert!(are_opposite(Direction::Right, Direction::Left));

        assert!(!are_opposite(Direction::Up, Direction::Up));
        assert!(!are_opposite(Direction::Up, Direction::Left));
        assert!(!are_opposite(Direction::Right, Direction::Down));
    }

    #[test]
    fn test_perpendicular_is_orthogonal_unit() {
        for d in Direction::ALL {
            let p = d.perpendicular();
            assert_eq!(p.dot(d.versor()), 0.0);
            assert_eq!(p.length(), 1.0);
        }
        assert_eq!(Direction::Up.perpendicular(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_rotation_turns_up_onto_versor() {
        for d in Direction::ALL {
            let (sin, cos) = d.rotation_angle().sin_cos();
            let up = Direction::Up.versor();
            let rotated = Vec2::new(up.x * cos - up.y * sin, up.x * sin + up.y * cos);
            assert!((rotated - d.versor()).length() < 1e-6, "{d:?}");
        }
        assert_eq!(Direction::Up.rotation_angle(), 0.0);
    }
}
