//! Value iteration over the Pig Markov decision process.
//!
//! The value of a state is the probability that the player to move wins under
//! optimal play by both sides:
//!
//! ```text
//! hold = 1 - V(j, i + k, 0)
//! roll = (1 - V(j, i, 0) + sum_{d=2..die} V(i, j, k + d)) / die
//! V(i, j, k) = max(hold, roll)
//! ```
//!
//! Banking only ever increases `i + j`, and rolling keeps it fixed, so states
//! are grouped into layers by that sum. A layer only reads values from layers
//! with an equal or larger sum; solving the layers from the top down lets each
//! small layer converge on its own instead of iterating the whole table.

use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::PigError;
use crate::policy::extract_policy;
use crate::solution::Solution;
use crate::state::GameSettings;
use crate::table::{StateTable, state_count};

/// Convergence tolerance used by the interactive tools.
pub const DEFAULT_EPSILON: f64 = 1e-7;

/// Order in which states are relaxed towards the fixed point.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SweepOrder {
    /// Converge one `i + j` layer at a time, highest sum first.
    #[default]
    Layered,
    /// Sweep the whole table until the largest change drops below epsilon.
    Global,
}

/// Parameters for one solve.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SolverConfig {
    pub settings: GameSettings,
    pub epsilon: f64,
    pub order: SweepOrder,
}

impl SolverConfig {
    pub fn new(die: u32, target: u32) -> Result<Self, PigError> {
        Ok(Self::from_settings(GameSettings::new(die, target)?))
    }

    pub fn from_settings(settings: GameSettings) -> Self {
        Self {
            settings,
            epsilon: DEFAULT_EPSILON,
            order: SweepOrder::default(),
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_order(mut self, order: SweepOrder) -> Self {
        self.order = order;
        self
    }

    /// Checks every field; public fields may have been set without going through `new`.
    pub fn validate(&self) -> Result<(), PigError> {
        GameSettings::new(self.settings.die, self.settings.target)?;
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(PigError::InvalidConfiguration(
                "epsilon must be a positive finite number",
            ));
        }
        let addressable = state_count(self.settings.target)
            .and_then(|len| len.checked_mul(std::mem::size_of::<f64>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !addressable {
            return Err(PigError::InvalidConfiguration(
                "target score is too large to tabulate",
            ));
        }
        Ok(())
    }
}

/// Win probabilities of the two choices available from one state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionValues {
    pub hold: f64,
    pub roll: f64,
}

impl ActionValues {
    #[inline]
    pub fn best(&self) -> f64 {
        self.hold.max(self.roll)
    }

    /// Ties go to holding.
    #[inline]
    pub fn prefers_roll(&self) -> bool {
        self.roll > self.hold
    }
}

/// Win probability of the player to move, resolving decided games analytically.
#[inline]
pub fn lookup(values: &StateTable<f64>, own: u32, opponent: u32, turn: u32) -> f64 {
    let target = values.target();
    if own.saturating_add(turn) >= target {
        return 1.0;
    }
    if opponent >= target {
        return 0.0;
    }
    values.get(own, opponent, turn)
}

/// Evaluates holding and rolling from the non-terminal state `(i, j, k)` against `values`.
#[inline]
pub fn action_values(values: &StateTable<f64>, die: u32, i: u32, j: u32, k: u32) -> ActionValues {
    let hold = 1.0 - lookup(values, j, i + k, 0);
    let mut roll = 1.0 - lookup(values, j, i, 0);
    for face in 2..=die {
        roll += lookup(values, i, j, k + face);
    }
    ActionValues {
        hold,
        roll: roll / die as f64,
    }
}

/// Solves the configuration and derives the optimal policy.
///
/// The configuration is validated before any table is allocated.
pub fn solve(config: &SolverConfig) -> Result<Solution, PigError> {
    config.validate()?;
    let GameSettings { die, target } = config.settings;
    info!(
        "solving pig: die={die} target={target} epsilon={:e} order={:?}",
        config.epsilon, config.order
    );
    let started = Instant::now();
    let mut values = StateTable::new(target, 0.0f64)?;
    let sweeps = match config.order {
        SweepOrder::Layered => solve_layered(&mut values, die, config.epsilon),
        SweepOrder::Global => converge_all(&mut values, die, config.epsilon),
    };
    let policy = extract_policy(&values, die)?;
    info!(
        "solved {} states with {sweeps} sweeps in {:.2?}",
        values.len(),
        started.elapsed()
    );
    Ok(Solution::new(*config, values, policy))
}

fn solve_layered(values: &mut StateTable<f64>, die: u32, epsilon: f64) -> usize {
    let target = values.target();
    let mut total = 0usize;
    for sum in (0..=2 * target - 2).rev() {
        let sweeps = converge_layer(values, die, sum, epsilon);
        debug!("layer {sum}: converged after {sweeps} sweeps");
        total += sweeps;
    }
    total
}

/// Gauss-Seidel sweeps over the states with `i + j == sum` until the largest
/// update is below `epsilon`. Returns the number of sweeps performed.
fn converge_layer(values: &mut StateTable<f64>, die: u32, sum: u32, epsilon: f64) -> usize {
    let target = values.target();
    let mut sweeps = 0usize;
    loop {
        let mut max_change = 0.0f64;
        for i in (0..target).rev() {
            let Some(j) = sum.checked_sub(i) else {
                continue;
            };
            if j >= target {
                continue;
            }
            for k in 0..target - i {
                max_change = max_change.max(relax(values, die, i, j, k));
            }
        }
        sweeps += 1;
        if max_change < epsilon {
            return sweeps;
        }
    }
}

fn converge_all(values: &mut StateTable<f64>, die: u32, epsilon: f64) -> usize {
    let target = values.target();
    let mut sweeps = 0usize;
    loop {
        let mut max_change = 0.0f64;
        for i in (0..target).rev() {
            for j in (0..target).rev() {
                for k in 0..target - i {
                    max_change = max_change.max(relax(values, die, i, j, k));
                }
            }
        }
        sweeps += 1;
        debug!("global sweep {sweeps}: max change {max_change:e}");
        if max_change < epsilon {
            return sweeps;
        }
    }
}

/// Applies the recurrence to one state in place and returns the absolute change.
#[inline]
fn relax(values: &mut StateTable<f64>, die: u32, i: u32, j: u32, k: u32) -> f64 {
    let old = values.get(i, j, k);
    let new = action_values(values, die, i, j, k).best();
    values.set(i, j, k, new);
    (new - old).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_parameters() {
        assert!(SolverConfig::new(1, 10).is_err());
        assert!(SolverConfig::new(6, 1).is_err());

        let config = SolverConfig::new(6, 10).unwrap();
        assert!(solve(&config.with_epsilon(0.0)).is_err());
        assert!(solve(&config.with_epsilon(-1e-3)).is_err());
        assert!(solve(&config.with_epsilon(f64::NAN)).is_err());

        let mut bypassed = config;
        bypassed.settings.die = 0;
        assert!(matches!(
            solve(&bypassed),
            Err(PigError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_targets_too_large_to_tabulate() {
        let config = SolverConfig::new(2, 3_000_000).unwrap();
        assert!(matches!(
            solve(&config),
            Err(PigError::InvalidConfiguration(_))
        ));
        let mut widest = config;
        widest.settings.target = u32::MAX;
        assert!(matches!(
            widest.validate(),
            Err(PigError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn lookup_applies_boundaries_before_the_table() {
        let values = StateTable::new(5, 0.5f64).unwrap();
        assert_eq!(lookup(&values, 3, 0, 2), 1.0);
        assert_eq!(lookup(&values, 7, 9, 0), 1.0);
        assert_eq!(lookup(&values, 0, 5, 0), 0.0);
        assert_eq!(lookup(&values, 2, 4, 2), 0.5);
    }

    #[test]
    fn action_values_on_two_sided_die() {
        // With a two-sided die every non-bust roll reaches the target of 2.
        let values = StateTable::new(2, 0.5f64).unwrap();
        let av = action_values(&values, 2, 0, 0, 0);
        assert!((av.hold - 0.5).abs() < 1e-12);
        assert!((av.roll - 0.75).abs() < 1e-12);
        assert!(av.prefers_roll());
    }

    #[test]
    fn ties_prefer_holding() {
        let tie = ActionValues {
            hold: 0.4,
            roll: 0.4,
        };
        assert!(!tie.prefers_roll());
        assert_eq!(tie.best(), 0.4);
    }

    #[test]
    fn smallest_game_converges_to_two_thirds() {
        let solution = solve(&SolverConfig::new(2, 2).unwrap().with_epsilon(1e-12)).unwrap();
        for (i, j, k) in solution.values().coordinates() {
            let v = solution.values().get(i, j, k);
            assert!((v - 2.0 / 3.0).abs() < 1e-9, "V({i},{j},{k}) = {v}");
            assert!(solution.policy().get(i, j, k));
        }
    }
}
