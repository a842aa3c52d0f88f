//! Phase states of a growth iteration
//!
//! One iteration cycles through five states, each lasting a fixed amount of
//! phase. The handler turns a growing phase value into state changes.

use serde::{Deserialize, Serialize};

/// State of the current iteration, in sequence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseState {
    AddingGridCells,
    RemovingTiles,
    TransitioningTiles,
    ShowingPlaceholders,
    AddingTiles,
}

impl PhaseState {
    /// All states in sequence order
    pub const SEQUENCE: [PhaseState; 5] = [
        PhaseState::AddingGridCells,
        PhaseState::RemovingTiles,
        PhaseState::TransitioningTiles,
        PhaseState::ShowingPlaceholders,
        PhaseState::AddingTiles,
    ];

    /// Phase units spent in this state
    pub fn duration(self) -> f64 {
        match self {
            PhaseState::TransitioningTiles => 2.0,
            _ => 1.0,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PhaseState::AddingGridCells => PhaseState::RemovingTiles,
            PhaseState::RemovingTiles => PhaseState::TransitioningTiles,
            PhaseState::TransitioningTiles => PhaseState::ShowingPlaceholders,
            PhaseState::ShowingPlaceholders => PhaseState::AddingTiles,
            PhaseState::AddingTiles => PhaseState::AddingGridCells,
        }
    }
}

/// Phase spanned by one full iteration
pub const ITERATION_PHASE_DURATION: f64 = 6.0;

/// Cyclic state machine driven by the phase
#[derive(Debug, Clone)]
pub struct PhaseStateHandler {
    /// `None` until the first transition fires
    state: Option<PhaseState>,
    last_transition_phase: f64,
}

impl PhaseStateHandler {
    pub fn new(start_phase: f64) -> Self {
        Self {
            state: None,
            last_transition_phase: start_phase,
        }
    }

    pub fn state(&self) -> Option<PhaseState> {
        self.state
    }

    /// Perform at most one transition. Overshoot past the state duration
    /// is carried into the next state. A non-finite phase never transitions.
    pub fn advance(&mut self, phase: f64) -> Option<PhaseState> {
        if !phase.is_finite() {
            return None;
        }
        // Before the first transition we sit in the state preceding the first
        let current = self.state.unwrap_or(PhaseState::AddingTiles);

        let elapsed = phase - self.last_transition_phase;
        let overshoot = elapsed - current.duration();
        if overshoot < 0.0 {
            return None;
        }

        let next = current.next();
        self.state = Some(next);
        self.last_transition_phase = phase - overshoot;
        Some(next)
    }

    /// All transitions reached by `phase`, in order. Large steps yield
    /// several states, never skipping one.
    pub fn update(&mut self, phase: f64) -> Vec<PhaseState> {
        let mut states = Vec::new();
        self.update_with(phase, |state| {
            states.push(state);
            true
        });
        states
    }

    /// Hand each transition reached by `phase` to `on_state`, in order.
    /// Stops as soon as `on_state` returns false; later transitions are
    /// left for the next call.
    pub fn update_with(&mut self, phase: f64, mut on_state: impl FnMut(PhaseState) -> bool) {
        while let Some(state) = self.advance(phase) {
            if !on_state(state) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_durations_sum_to_iteration() {
        let total: f64 = PhaseState::SEQUENCE.iter().map(|s| s.duration()).sum();
        assert_eq!(total, ITERATION_PHASE_DURATION);
    }

    #[test]
    fn test_sequence_wraps() {
        for (i, state) in PhaseState::SEQUENCE.iter().enumerate() {
            assert_eq!(state.next(), PhaseState::SEQUENCE[(i + 1) % 5]);
        }
    }

    #[test]
    fn test_one_event_per_boundary() {
        let mut handler = PhaseStateHandler::new(0.0);

        assert!(handler.update(0.0).is_empty());
        assert_eq!(handler.state(), None);
        assert_eq!(handler.update(1.0), vec![PhaseState::AddingGridCells]);
        assert_eq!(handler.update(2.0), vec![PhaseState::RemovingTiles]);
        assert_eq!(handler.update(4.0), vec![PhaseState::TransitioningTiles]);
        // Transitioning lasts 2 but 1 of overshoot was carried over
        assert_eq!(handler.update(5.0), vec![PhaseState::ShowingPlaceholders]);
        assert_eq!(handler.update(6.0), vec![PhaseState::AddingTiles]);
        assert!(handler.update(6.5).is_empty());
        assert_eq!(handler.update(7.0), vec![PhaseState::AddingGridCells]);
    }

    #[test]
    fn test_large_step_visits_every_state() {
        let mut handler = PhaseStateHandler::new(0.0);
        let states = handler.update(1.0 + ITERATION_PHASE_DURATION);
        assert_eq!(
            states,
            vec![
                PhaseState::AddingGridCells,
                PhaseState::RemovingTiles,
                PhaseState::TransitioningTiles,
                PhaseState::ShowingPlaceholders,
                PhaseState::AddingTiles,
                PhaseState::AddingGridCells,
            ]
        );
    }

    #[test]
    fn test_overshoot_does_not_accumulate() {
        let mut handler = PhaseStateHandler::new(0.0);
        // Steps of 0.7 never land on a boundary
        let mut count = 0;
        let mut phase = 0.0;
        for _ in 0..100 {
            phase += 0.7;
            count += handler.update(phase).len();
        }
        // 70 phase units: first transition at 1, then one iteration per 6
        let expected = 1 + ((70.0 - 1.0) / ITERATION_PHASE_DURATION * 5.0) as usize;
        assert!((count as i64 - expected as i64).abs() <= 1);
    }

    #[test]
    fn test_update_with_stops_early() {
        let mut handler = PhaseStateHandler::new(0.0);
        let mut seen = Vec::new();
        handler.update_with(7.5, |state| {
            seen.push(state);
            state != PhaseState::TransitioningTiles
        });
        assert_eq!(seen, PhaseState::SEQUENCE[..3].to_vec());
        assert_eq!(handler.state(), Some(PhaseState::TransitioningTiles));

        // The rest is picked up by the next call
        assert_eq!(
            handler.update(7.5),
            vec![
                PhaseState::ShowingPlaceholders,
                PhaseState::AddingTiles,
                PhaseState::AddingGridCells,
            ]
        );
    }

    #[test]
    fn test_non_finite_phase_never_transitions() {
        let mut handler = PhaseStateHandler::new(0.0);
        assert_eq!(handler.advance(f64::NAN), None);
        assert!(handler.update(f64::NAN).is_empty());
        assert!(handler.update(f64::INFINITY).is_empty());
        assert_eq!(handler.advance(f64::INFINITY), None);
        assert_eq!(handler.advance(f64::NEG_INFINITY), None);
        assert_eq!(handler.state(), None);

        // The handler is unharmed and keeps counting from where it was
        assert_eq!(
            handler.update(2.0),
            vec![PhaseState::AddingGridCells, PhaseState::RemovingTiles]
        );
        assert_eq!(handler.advance(f64::INFINITY), None);
        assert_eq!(
            handler.update(4.0),
            vec![PhaseState::TransitioningTiles]
        );
    }

    proptest! {
        #[test]
        fn prop_no_state_skipped(steps in proptest::collection::vec(0.0f64..4.0, 1..60)) {
            let mut handler = PhaseStateHandler::new(0.0);
            let mut phase = 0.0;
            let mut seen = Vec::new();
            for step in steps {
                phase += step;
                seen.extend(handler.update(phase));
            }
            for (i, state) in seen.iter().enumerate() {
                prop_assert_eq!(*state, PhaseState::SEQUENCE[i % 5]);
            }
        }
    }
}
