use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::PigError;
use crate::solver::{ActionValues, SolverConfig, action_values, lookup};
use crate::state::{GameSettings, PigState};
use crate::table::StateTable;

/// Converged value and policy tables for one `(die, target)` configuration.
///
/// Immutable once built; share it behind an `Arc` when several bots need it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Solution {
    config: SolverConfig,
    values: StateTable<f64>,
    policy: StateTable<bool>,
}

/// Answer to a query about one state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub state: PigState,
    pub win_probability: f64,
    pub action: Action,
}

/// One line of the CSV export.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateRecord {
    pub state: PigState,
    pub roll: bool,
    pub win_probability: f64,
}

impl Solution {
    pub(crate) fn new(
        config: SolverConfig,
        values: StateTable<f64>,
        policy: StateTable<bool>,
    ) -> Self {
        Self {
            config,
            values,
            policy,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn settings(&self) -> GameSettings {
        self.config.settings
    }

    pub fn values(&self) -> &StateTable<f64> {
        &self.values
    }

    pub fn policy(&self) -> &StateTable<bool> {
        &self.policy
    }

    /// Probability that the player to move wins from `state`.
    ///
    /// Decided games are resolved before the table is consulted, so any
    /// non-negative coordinates are valid.
    pub fn win_probability(&self, state: PigState) -> f64 {
        lookup(&self.values, state.own, state.opponent, state.turn)
    }

    /// Optimal action from `state`. Decided games always report `Hold`.
    pub fn recommended_action(&self, state: PigState) -> Action {
        let p = self.win_probability(state);
        if p == 0.0 || p == 1.0 {
            return Action::Hold;
        }
        match self.policy.try_get(state.own, state.opponent, state.turn) {
            Some(true) => Action::Roll,
            _ => Action::Hold,
        }
    }

    pub fn evaluate(&self, state: PigState) -> Evaluation {
        Evaluation {
            state,
            win_probability: self.win_probability(state),
            action: self.recommended_action(state),
        }
    }

    /// Hold and roll probabilities for a stored state, `None` once the game is decided.
    pub fn action_values(&self, state: PigState) -> Option<ActionValues> {
        self.values.try_get(state.own, state.opponent, state.turn)?;
        Some(action_values(
            &self.values,
            self.config.settings.die,
            state.own,
            state.opponent,
            state.turn,
        ))
    }

    /// Every stored state with its raw policy bit, in export order.
    pub fn records(&self) -> impl Iterator<Item = StateRecord> + '_ {
        self.values.coordinates().map(|(i, j, k)| StateRecord {
            state: PigState::new(i, j, k),
            roll: self.policy.get(i, j, k),
            win_probability: self.values.get(i, j, k),
        })
    }

    /// Checks that deserialized tables agree with the stored configuration.
    pub(crate) fn validate(&self) -> Result<(), PigError> {
        self.config
            .validate()
            .map_err(|_| PigError::CorruptSnapshot("stored configuration is invalid"))?;
        let target = self.config.settings.target;
        if self.values.target() != target || self.policy.target() != target {
            return Err(PigError::CorruptSnapshot(
                "table target does not match configuration",
            ));
        }
        if !self.values.is_consistent() || !self.policy.is_consistent() {
            return Err(PigError::CorruptSnapshot(
                "table length does not match layout",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::solve;

    fn small() -> Solution {
        solve(&SolverConfig::new(6, 15).unwrap()).unwrap()
    }

    #[test]
    fn decided_states_report_hold() {
        let solution = small();
        for state in [
            PigState::new(10, 3, 5),
            PigState::new(14, 0, 1),
            PigState::new(40, 40, 0),
            PigState::new(0, 15, 0),
            PigState::new(3, 22, 2),
        ] {
            let eval = solution.evaluate(state);
            assert!(eval.win_probability == 0.0 || eval.win_probability == 1.0);
            assert_eq!(eval.action, Action::Hold);
        }
    }

    #[test]
    fn action_values_only_for_stored_states() {
        let solution = small();
        assert!(solution.action_values(PigState::new(14, 0, 1)).is_none());
        let av = solution.action_values(PigState::new(5, 5, 3)).unwrap();
        let v = solution.win_probability(PigState::new(5, 5, 3));
        assert!((av.best() - v).abs() < 1e-6);
    }

    #[test]
    fn records_cover_the_table() {
        let solution = small();
        assert_eq!(solution.records().count(), 15 * 15 * 16 / 2);
        let first = solution.records().next().unwrap();
        assert_eq!(first.state, PigState::initial());
    }
}
