use thiserror::Error;

use crate::action::PlayerId;

/// Errors produced by the solver, the query surface and the game engine.
#[derive(Debug, Error)]
pub enum PigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("not enough memory for a table of {0} states")]
    TableAllocation(usize),
    #[error("state ({own}, {opponent}, {turn}) is out of range")]
    StateOutOfRange { own: i64, opponent: i64, turn: i64 },
    #[error("no game has been solved yet, call new first")]
    Unsolved,
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("game is already over")]
    GameOver,
    #[error("scripted dice exhausted")]
    DiceExhausted,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode snapshot: {0}")]
    SnapshotEncode(#[from] bincode::error::EncodeError),
    #[error("failed to decode snapshot: {0}")]
    SnapshotDecode(#[from] bincode::error::DecodeError),
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(&'static str),
}
