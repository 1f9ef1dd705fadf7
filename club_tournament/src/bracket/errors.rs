//! Error types for bracket seeding and bracket validation

use thiserror::Error;

use crate::entities::PlayerId;

/// Result type for seeding operations
pub type SeedResult<T> = Result<T, SeedError>;

/// A structural rule a bracket breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("bracket has {0} slots; size must be a power of two of at least 2")]
    InvalidSize(usize),

    #[error("match {match_number} holds two BYEs")]
    DoubleBye { match_number: usize },

    #[error("player {0} occupies more than one position")]
    DuplicatePlayer(PlayerId),

    #[error("player {0} is in the field but not placed")]
    MissingPlayer(PlayerId),

    #[error("player {0} is placed but not in the field")]
    UnknownPlayer(PlayerId),
}

/// Seeding request errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("need at least 2 players to build a bracket, have {0}")]
    NotEnoughPlayers(usize),

    #[error("player {0} appears more than once in the field")]
    DuplicatePlayer(PlayerId),

    #[error("{requested} seeds is not allowed for this field; valid counts are {valid:?}")]
    InvalidSeedCount { requested: usize, valid: Vec<usize> },

    #[error("seeded bracket is invalid: {0}")]
    InvalidBracket(#[from] InvariantViolation),
}
