use std::sync::Arc;

use crate::action::Action;
use crate::bot::Bot;
use crate::error::PigError;
use crate::solution::Solution;
use crate::state::{GameSettings, GameStateView};

/// Plays the solved policy.
///
/// Several seats may share one solution; it is only ever read.
pub struct OptimalBot {
    solution: Arc<Solution>,
}

impl OptimalBot {
    pub fn new(solution: Arc<Solution>) -> Self {
        Self { solution }
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Seats the bot for a game played under `settings`.
    ///
    /// Fails when the solution was computed for a different variant.
    pub fn for_settings(
        solution: Arc<Solution>,
        settings: GameSettings,
    ) -> Result<Self, PigError> {
        let bot = Self::new(solution);
        bot.check_settings(settings)?;
        Ok(bot)
    }

    pub fn check_settings(&self, settings: GameSettings) -> Result<(), PigError> {
        if self.solution.settings() != settings {
            return Err(PigError::InvalidConfiguration(
                "solution was computed for different game settings",
            ));
        }
        Ok(())
    }
}

impl Bot for OptimalBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        let action = self.solution.recommended_action(state.pig_state());
        if legal_actions.contains(&action) {
            action
        } else {
            legal_actions[0]
        }
    }
}
