//! Error types for schedule generation

use thiserror::Error;

use crate::entities::{PairKey, PlayerId};

/// Result type for scheduling operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Scheduling errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("need at least 2 players to schedule matches, have {0}")]
    NotEnoughPlayers(usize),

    #[error("player {0} appears more than once in the field")]
    DuplicatePlayer(PlayerId),

    #[error("player {0} is paired against themselves")]
    SelfPairing(PlayerId),

    #[error("player {player} appears twice in round {round}")]
    PlayerTwiceInRound { round: usize, player: PlayerId },

    #[error("pairing {0} is scheduled more than once")]
    RepeatedPairing(PairKey),

    #[error("no pairing for round {round} avoids a rematch")]
    NoValidPairing { round: usize },
}
