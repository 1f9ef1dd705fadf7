//! Error types for group partitioning

use thiserror::Error;

use crate::entities::PlayerId;

/// Result type for group operations
pub type GroupResult<T> = Result<T, GroupError>;

/// Group partitioning errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("group size must be between 3 and 12, got {0}")]
    InvalidGroupSize(usize),

    #[error("need at least 2 players to form a group, have {0}")]
    NotEnoughPlayers(usize),

    #[error("group capacities hold {capacity} players but the field has {players}")]
    CapacityMismatch { capacity: usize, players: usize },

    #[error("group {group} would hold {size} players; every group needs at least 2")]
    GroupTooSmall { group: usize, size: usize },

    #[error("player {0} appears more than once in the field")]
    DuplicatePlayer(PlayerId),
}
