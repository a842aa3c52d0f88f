//! Domino tiles
//!
//! A tile covers two adjacent cells lying across its direction. It slides
//! one unit along its direction each iteration, and its occupied cells are
//! always taken from the destination of the current slide.

use glam::Vec2;
use serde::Serialize;

use super::direction::Direction;
use super::transition::TileTransition;

/// Stable tile identifier, unique within a simulator
pub type TileId = u32;

/// Whether a tile is currently sliding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileState {
    Still,
    Transitioning,
}

/// A 1x2 domino
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub id: TileId,
    center_pos: Vec2,
    dest_center_pos: Vec2,
    direction: Direction,
    state: TileState,
    phase_at_creation: f64,
    /// Last phase seen by `update`
    phase: f64,
    #[serde(skip)]
    transition: Option<Box<dyn TileTransition>>,
}

impl Tile {
    pub fn new(id: TileId, center_pos: Vec2, direction: Direction, phase: f64) -> Self {
        Self {
            id,
            center_pos,
            dest_center_pos: center_pos,
            direction,
            state: TileState::Still,
            phase_at_creation: phase,
            phase,
            transition: None,
        }
    }

    pub fn center_pos(&self) -> Vec2 {
        self.center_pos
    }

    /// Center once the current slide completes (equals `center_pos` when still)
    pub fn dest_center_pos(&self) -> Vec2 {
        self.dest_center_pos
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn direction_versor(&self) -> Vec2 {
        self.direction.versor()
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn phase_at_creation(&self) -> f64 {
        self.phase_at_creation
    }

    /// Centers of the two cells covered at the destination.
    ///
    /// The first one is on the right-hand side of the direction.
    pub fn occupied_cells(&self) -> (Vec2, Vec2) {
        let half = self.direction.perpendicular() * 0.5;
        (self.dest_center_pos + half, self.dest_center_pos - half)
    }

    /// Start sliding one unit along the tile direction
    pub fn start_transition(&mut self, mut transition: Box<dyn TileTransition>) {
        self.dest_center_pos = transition.start(self.center_pos, self.direction, self.phase);
        self.transition = Some(transition);
        self.state = TileState::Transitioning;
    }

    /// Jump straight to the end of the current slide
    pub fn finish_transition(&mut self) {
        self.center_pos = self.dest_center_pos;
        self.state = TileState::Still;
        self.transition = None;
    }

    /// Advance the slide (if any) to `phase`
    pub fn update(&mut self, phase: f64) {
        self.phase = phase;

        if self.state != TileState::Transitioning {
            return;
        }
        if let Some(transition) = &self.transition {
            self.center_pos = transition.position_at(phase);

            if transition.progress(phase) >= 1.0 {
                self.finish_transition();
            }
        }
    }
}
