use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::error::PigError;

pub const MIN_DIE_FACES: u32 = 2;
pub const MIN_TARGET: u32 = 2;
pub const NUM_PLAYERS: usize = 2;

/// Rules of one Pig variant: how many faces the die has and the score needed to win.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub die: u32,
    pub target: u32,
}

impl GameSettings {
    pub fn new(die: u32, target: u32) -> Result<Self, PigError> {
        if die < MIN_DIE_FACES {
            return Err(PigError::InvalidConfiguration(
                "die must have at least 2 faces",
            ));
        }
        if target < MIN_TARGET {
            return Err(PigError::InvalidConfiguration(
                "target score must be at least 2",
            ));
        }
        // A turn total plus a roll and the sum of both banked scores must fit in u32.
        if die.checked_add(target).is_none() || target.checked_mul(2).is_none() {
            return Err(PigError::InvalidConfiguration(
                "die and target score are too large",
            ));
        }
        Ok(Self { die, target })
    }

    /// Classic Pig: a six-sided die played to 100.
    pub fn standard() -> Self {
        Self {
            die: 6,
            target: 100,
        }
    }
}

/// A decision point seen from the player to move.
///
/// `own` and `opponent` are banked scores, `turn` is the unbanked turn total.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PigState {
    pub own: u32,
    pub opponent: u32,
    pub turn: u32,
}

impl PigState {
    pub fn new(own: u32, opponent: u32, turn: u32) -> Self {
        Self {
            own,
            opponent,
            turn,
        }
    }

    /// Start of the game for the first player.
    pub fn initial() -> Self {
        Self::new(0, 0, 0)
    }

    /// Converts user supplied coordinates, rejecting anything negative or too large to address.
    pub fn from_signed(own: i64, opponent: i64, turn: i64) -> Result<Self, PigError> {
        let out_of_range = || PigError::StateOutOfRange {
            own,
            opponent,
            turn,
        };
        Ok(Self {
            own: u32::try_from(own).map_err(|_| out_of_range())?,
            opponent: u32::try_from(opponent).map_err(|_| out_of_range())?,
            turn: u32::try_from(turn).map_err(|_| out_of_range())?,
        })
    }

    /// Whether holding now reaches the target.
    pub fn is_winning(&self, target: u32) -> bool {
        self.own as u64 + self.turn as u64 >= target as u64
    }

    /// Whether the opponent has already reached the target.
    pub fn is_lost(&self, target: u32) -> bool {
        self.opponent >= target
    }
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// Game snapshot handed to bots, expressed from one player's perspective.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub status: GameStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub scores: [u32; NUM_PLAYERS],
    pub turn_total: u32,
    pub last_roll: Option<u32>,
}

impl GameStateView {
    /// Solver coordinates for the player whose perspective this view was taken from.
    ///
    /// The turn total only belongs to the viewer when it is their turn.
    pub fn pig_state(&self) -> PigState {
        let opponent = (self.self_player + 1) % NUM_PLAYERS;
        let turn = if self.current_player == self.self_player {
            self.turn_total
        } else {
            0
        };
        PigState::new(self.scores[self.self_player], self.scores[opponent], turn)
    }
}
