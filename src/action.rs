use std::fmt;

use serde::{Deserialize, Serialize};

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Decision available to the player to move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Roll the die again, risking the turn total on a 1.
    Roll,
    /// Bank the turn total and pass the die.
    Hold,
}

impl Action {
    /// Both actions are legal whenever the game is still running.
    pub const ALL: [Action; 2] = [Action::Roll, Action::Hold];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Roll => f.write_str("Roll"),
            Action::Hold => f.write_str("Hold"),
        }
    }
}
