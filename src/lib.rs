//! Optimal play for the dice game Pig, solved by value iteration.
//!
//! [`solve`] computes the win probability of every reachable state for a given
//! die size and target score, then derives the roll/hold policy. The rest of
//! the crate queries, exports and plays with the result.

pub mod action;
pub mod bot;
pub mod bots;
pub mod dice;
pub mod error;
pub mod export;
pub mod game;
pub mod policy;
pub mod session;
pub mod solution;
pub mod solver;
pub mod state;
pub mod table;
pub mod visualize;

pub use crate::action::{Action, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::registry::{create_bot_from_spec, label_for_spec, needs_solution};
pub use crate::bots::{HoldAtBot, OptimalBot, RandomBot};
pub use crate::dice::roll_die;
pub use crate::error::PigError;
pub use crate::export::{load_snapshot, save_csv, save_snapshot, write_csv};
pub use crate::game::{Game, GameBuilder, GameConfig, TurnEvent};
pub use crate::policy::extract_policy;
pub use crate::session::Session;
pub use crate::solution::{Evaluation, Solution, StateRecord};
pub use crate::solver::{
    ActionValues, DEFAULT_EPSILON, SolverConfig, SweepOrder, action_values, lookup, solve,
};
pub use crate::state::{GameSettings, GameStateView, GameStatus, PigState};
pub use crate::table::{StateTable, state_count};
pub use crate::visualize::{describe_evaluation, hold_thresholds};
