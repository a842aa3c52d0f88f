//! Tile motion laws
//!
//! A transition moves a tile one unit along its direction. One phase unit
//! of progress corresponds to the full displacement; how the tile gets
//! there in between is up to the law.

use std::fmt::Debug;

use glam::Vec2;

use super::direction::Direction;

/// Motion law for a sliding tile
pub trait TileTransition: Debug {
    /// Begin the slide, returning the final position
    fn start(&mut self, origin: Vec2, direction: Direction, phase: f64) -> Vec2;

    /// Interpolated position at `phase`
    fn position_at(&self, phase: f64) -> Vec2;

    /// Phase elapsed since the start, clamped to 1 (slide complete)
    fn progress(&self, phase: f64) -> f64;

    fn clone_box(&self) -> Box<dyn TileTransition>;
}

impl Clone for Box<dyn TileTransition> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Shared start state of the built-in laws
#[derive(Debug, Clone, Copy, Default)]
struct SlideStart {
    origin: Vec2,
    versor: Vec2,
    phase: f64,
}

impl SlideStart {
    fn begin(&mut self, origin: Vec2, direction: Direction, phase: f64) -> Vec2 {
        self.origin = origin;
        self.versor = direction.versor();
        self.phase = phase;
        origin + self.versor
    }

    fn progress(&self, phase: f64) -> f64 {
        (phase - self.phase).clamp(0.0, 1.0)
    }
}

/// Constant-speed slide
#[derive(Debug, Clone, Default)]
pub struct LinearTransition {
    start: SlideStart,
}

impl LinearTransition {
    pub fn boxed() -> Box<dyn TileTransition> {
        Box::new(Self::default())
    }
}

impl TileTransition for LinearTransition {
    fn start(&mut self, origin: Vec2, direction: Direction, phase: f64) -> Vec2 {
        self.start.begin(origin, direction, phase)
    }

    fn position_at(&self, phase: f64) -> Vec2 {
        let tp = self.start.progress(phase) as f32;
        self.start.origin + tp * self.start.versor
    }

    fn progress(&self, phase: f64) -> f64 {
        self.start.progress(phase)
    }

    fn clone_box(&self) -> Box<dyn TileTransition> {
        Box::new(self.clone())
    }
}

/// Smoothstep slide: accelerates out of the start, decelerates into the end
#[derive(Debug, Clone, Default)]
pub struct EaseInOutTransition {
    start: SlideStart,
}

impl EaseInOutTransition {
    pub fn boxed() -> Box<dyn TileTransition> {
        Box::new(Self::default())
    }
}

impl TileTransition for EaseInOutTransition {
    fn start(&mut self, origin: Vec2, direction: Direction, phase: f64) -> Vec2 {
        self.start.begin(origin, direction, phase)
    }

    fn position_at(&self, phase: f64) -> Vec2 {
        let t = self.start.progress(phase);
        let eased = (t * t * (3.0 - 2.0 * t)) as f32;
        self.start.origin + eased * self.start.versor
    }

    fn progress(&self, phase: f64) -> f64 {
        self.start.progress(phase)
    }

    fn clone_box(&self) -> Box<dyn TileTransition> {
        Box::new(self.clone())
    }
}
