use rand::Rng;

use crate::action::Action;
use crate::bot::Bot;
use crate::state::GameStateView;

/// Baseline bot that flips a (possibly biased) coin between rolling and holding.
pub struct RandomBot<R: Rng> {
    rng: R,
    roll_probability: f64,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            roll_probability: 0.5,
        }
    }

    /// Values outside `[0, 1]` are clamped.
    pub fn with_roll_probability(mut self, probability: f64) -> Self {
        self.roll_probability = probability.clamp(0.0, 1.0);
        self
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(&mut self, _state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "at least one legal action must be available"
        );
        let wants = if self.rng.gen_bool(self.roll_probability) {
            Action::Roll
        } else {
            Action::Hold
        };
        if legal_actions.contains(&wants) {
            wants
        } else {
            legal_actions[0]
        }
    }
}
