use std::io::Write;
use std::path::Path;

use crate::error::PigError;
use crate::export;
use crate::solution::{Evaluation, Solution};
use crate::solver::{DEFAULT_EPSILON, SolverConfig, SweepOrder, solve};
use crate::state::PigState;

/// The currently loaded configuration of an interactive run.
///
/// Starts empty; queries and exports fail with [`PigError::Unsolved`] until a
/// configuration has been solved or loaded. Solving again replaces the tables.
#[derive(Debug)]
pub struct Session {
    epsilon: f64,
    order: SweepOrder,
    solution: Option<Solution>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl Session {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            order: SweepOrder::default(),
            solution: None,
        }
    }

    pub fn with_order(mut self, order: SweepOrder) -> Self {
        self.order = order;
        self
    }

    /// Solves `(die, target)` from scratch. On error the previous solution is kept.
    pub fn solve_new(&mut self, die: u32, target: u32) -> Result<&Solution, PigError> {
        let config = SolverConfig::new(die, target)?
            .with_epsilon(self.epsilon)
            .with_order(self.order);
        let solution = solve(&config)?;
        Ok(self.replace(solution))
    }

    pub fn replace(&mut self, solution: Solution) -> &Solution {
        self.solution.insert(solution)
    }

    pub fn solution(&self) -> Result<&Solution, PigError> {
        self.solution.as_ref().ok_or(PigError::Unsolved)
    }

    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Evaluates raw user coordinates against the loaded solution.
    pub fn query(&self, own: i64, opponent: i64, turn: i64) -> Result<Evaluation, PigError> {
        let solution = self.solution()?;
        let state = PigState::from_signed(own, opponent, turn)?;
        Ok(solution.evaluate(state))
    }

    pub fn write_csv<W: Write>(&self, out: W) -> Result<usize, PigError> {
        export::write_csv(self.solution()?, out)
    }

    pub fn save_csv(&self, path: &Path) -> Result<usize, PigError> {
        export::save_csv(self.solution()?, path)
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<(), PigError> {
        export::save_snapshot(self.solution()?, path)
    }

    pub fn load_snapshot(&mut self, path: &Path) -> Result<&Solution, PigError> {
        let solution = export::load_snapshot(path)?;
        Ok(self.replace(solution))
    }
}
