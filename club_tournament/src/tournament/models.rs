//! Tournament format and configuration models.

use serde::{Deserialize, Serialize};

use super::planner::{TournamentError, TournamentResult};
use crate::bracket::{BracketState, Slot};
use crate::groups::{DistributionPolicy, Group, MAX_GROUP_SIZE, MIN_GROUP_SIZE};
use crate::schedule::{Schedule, SwissRound};

/// Largest field a single event accepts
pub const MAX_FIELD_SIZE: usize = 256;

/// Supported tournament formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Knockout bracket straight away
    SingleElimination { seeds: usize },
    /// Everyone plays everyone
    RoundRobin,
    /// Fixed number of Swiss rounds, paired one at a time
    Swiss { rounds: usize },
    /// Round-robin groups, then a knockout of the best finishers
    GroupsThenKnockout {
        group_size: usize,
        policy: DistributionPolicy,
        qualifiers_per_group: usize,
        seeds: usize,
    },
}

impl Default for TournamentFormat {
    fn default() -> Self {
        TournamentFormat::SingleElimination { seeds: 0 }
    }
}

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Tournament name
    pub name: String,
    /// Structure of the event
    pub format: TournamentFormat,
    /// Minimum players required
    pub min_players: usize,
    /// Maximum players allowed
    pub max_players: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: "Club Championship".to_string(),
            format: TournamentFormat::default(),
            min_players: 2,
            max_players: 64,
        }
    }
}

impl TournamentConfig {
    /// Knockout event with `seeds` protected players
    pub fn knockout(name: impl Into<String>, seeds: usize) -> Self {
        Self {
            name: name.into(),
            format: TournamentFormat::SingleElimination { seeds },
            ..Self::default()
        }
    }

    /// League where everyone meets everyone
    pub fn league(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: TournamentFormat::RoundRobin,
            max_players: 24,
            ..Self::default()
        }
    }

    /// Snake-drafted groups of `group_size`, top two advance unseeded
    pub fn groups_then_knockout(name: impl Into<String>, group_size: usize) -> Self {
        Self {
            name: name.into(),
            format: TournamentFormat::GroupsThenKnockout {
                group_size,
                policy: DistributionPolicy::SnakeDraft,
                qualifiers_per_group: 2,
                seeds: 0,
            },
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> TournamentResult<()> {
        if self.name.trim().is_empty() {
            return invalid("Tournament name must not be empty");
        }

        if self.min_players < 2 {
            return invalid("Minimum players must be at least 2");
        }

        if self.max_players < self.min_players || self.max_players > MAX_FIELD_SIZE {
            return invalid("Maximum players must be between the minimum and 256");
        }

        match self.format {
            TournamentFormat::SingleElimination { .. } | TournamentFormat::RoundRobin => {}
            TournamentFormat::Swiss { rounds } => {
                if rounds == 0 {
                    return invalid("Swiss events need at least one round");
                }
            }
            TournamentFormat::GroupsThenKnockout {
                group_size,
                qualifiers_per_group,
                seeds,
                ..
            } => {
                if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&group_size) {
                    return invalid("Group size must be between 3 and 12");
                }
                // Groups can come out one player short of the requested size.
                if qualifiers_per_group == 0 || qualifiers_per_group >= group_size - 1 {
                    return invalid("Qualifiers per group must be at least 1 and leave a non-qualifier in every group");
                }
                if seeds != 0 && (seeds < 2 || !seeds.is_power_of_two()) {
                    return invalid("Knockout seeds must be 0 or a power of two from 2 up");
                }
            }
        }

        Ok(())
    }

    /// Field size check against `min_players` and `max_players`
    pub fn check_field_size(&self, players: usize) -> TournamentResult<()> {
        if (self.min_players..=self.max_players).contains(&players) {
            Ok(())
        } else {
            Err(TournamentError::FieldSize {
                players,
                min: self.min_players,
                max: self.max_players,
            })
        }
    }
}

fn invalid(reason: &str) -> TournamentResult<()> {
    Err(TournamentError::InvalidConfig(reason.to_string()))
}

/// A preliminary group with its league schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPlan {
    pub group: Group,
    pub schedule: Schedule,
}

/// Initial structure of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPlan {
    Bracket(BracketState),
    League(Schedule),
    /// First round only; later rounds depend on results
    Swiss(SwissRound),
    Groups(Vec<GroupPlan>),
}

/// A finished bracket ready for the submission flow.
///
/// Serializes as the flat slot array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Submission(BracketState);

impl Submission {
    pub(crate) fn new(bracket: BracketState) -> Self {
        Self(bracket)
    }

    pub fn bracket(&self) -> &BracketState {
        &self.0
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.0.into_slots()
    }
}
