use std::fmt::Write;

use crate::action::Action;
use crate::solution::{Evaluation, Solution};
use crate::state::PigState;

/// Text block shown by the interactive `query` command.
pub fn describe_evaluation(eval: &Evaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "My score = {}", eval.state.own);
    let _ = writeln!(out, "Opponent's score = {}", eval.state.opponent);
    let _ = writeln!(out, "Turn total = {}", eval.state.turn);
    let _ = writeln!(
        out,
        "Probability of winning = {:.4}%",
        eval.win_probability * 100.0
    );
    let _ = write!(out, "Optimal action = {}", eval.action);
    out
}

/// For every `(own, opponent)` pair, the smallest turn total at which optimal
/// play holds. Indexed `[own][opponent]`.
///
/// When the policy rolls all the way, the value is the distance to the target,
/// where holding wins.
pub fn hold_thresholds(solution: &Solution) -> Vec<Vec<u32>> {
    let target = solution.settings().target;
    (0..target)
        .map(|own| {
            (0..target)
                .map(|opponent| {
                    (0..target - own)
                        .find(|&turn| {
                            solution.recommended_action(PigState::new(own, opponent, turn))
                                == Action::Hold
                        })
                        .unwrap_or(target - own)
                })
                .collect()
        })
        .collect()
}
