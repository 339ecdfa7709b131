use crate::action::Action;
use crate::bot::Bot;
use crate::error::PigError;
use crate::state::GameStateView;

/// The classic rule of thumb for Pig with a six-sided die.
pub const DEFAULT_HOLD_AT: u32 = 20;

/// Keeps rolling until the turn total reaches a fixed threshold, or until
/// holding would reach the target.
pub struct HoldAtBot {
    threshold: u32,
}

impl HoldAtBot {
    pub fn new(threshold: u32) -> Result<Self, PigError> {
        if threshold == 0 {
            return Err(PigError::InvalidConfiguration(
                "hold threshold must be positive",
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for HoldAtBot {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_HOLD_AT,
        }
    }
}

impl Bot for HoldAtBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        let pig = state.pig_state();
        let wants = if pig.turn >= self.threshold || pig.is_winning(state.settings.target) {
            Action::Hold
        } else {
            Action::Roll
        };
        if legal_actions.contains(&wants) {
            wants
        } else {
            legal_actions[0]
        }
    }
}
