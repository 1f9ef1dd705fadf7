//! Schedule and match result models.

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

use super::errors::{ScheduleError, ScheduleResult};
use crate::entities::{self, PairKey, PlayerId};

/// One scheduled match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub home: PlayerId,
    pub away: PlayerId,
}

impl Pairing {
    pub const fn new(home: PlayerId, away: PlayerId) -> Self {
        Self { home, away }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(self.home, self.away)
    }

    pub const fn involves(&self, id: PlayerId) -> bool {
        self.home == id || self.away == id
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.home, self.away)
    }
}

/// Matches that can be played at the same time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-indexed round number
    pub number: usize,
    pub pairings: Vec<Pairing>,
    /// Player sitting the round out, if the field is odd
    pub bye: Option<PlayerId>,
}

impl Round {
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.pairings
            .iter()
            .flat_map(|p| [p.home, p.away])
            .chain(self.bye)
    }

    /// No player appears twice in the round
    pub fn validate(&self) -> ScheduleResult<()> {
        if let Some(p) = self.pairings.iter().find(|p| p.home == p.away) {
            return Err(ScheduleError::SelfPairing(p.home));
        }
        let mut seen = HashSet::new();
        match self.players().find(|id| !seen.insert(*id)) {
            Some(player) => Err(ScheduleError::PlayerTwiceInRound {
                round: self.number,
                player,
            }),
            None => Ok(()),
        }
    }
}

/// Ordered rounds of a league or group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub rounds: Vec<Round>,
}

impl Schedule {
    pub fn pairing_count(&self) -> usize {
        self.rounds.iter().map(|r| r.pairings.len()).sum()
    }

    pub fn pairings(&self) -> impl Iterator<Item = &Pairing> + '_ {
        self.rounds.iter().flat_map(|r| r.pairings.iter())
    }

    /// Every round is valid and no pair meets twice
    pub fn validate(&self) -> ScheduleResult<()> {
        let mut seen = HashSet::new();
        for round in &self.rounds {
            round.validate()?;
            for pairing in &round.pairings {
                if !seen.insert(pairing.key()) {
                    return Err(ScheduleError::RepeatedPairing(pairing.key()));
                }
            }
        }
        Ok(())
    }
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Sets won by each side
    Sets { home: u8, away: u8 },
    /// Walkover; counted as a 1-0 set result
    Forfeit { winner: PlayerId },
}

/// A reported result, as recorded by the results collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home: PlayerId,
    pub away: PlayerId,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    pub const fn sets(home: PlayerId, away: PlayerId, home_sets: u8, away_sets: u8) -> Self {
        Self {
            home,
            away,
            outcome: MatchOutcome::Sets {
                home: home_sets,
                away: away_sets,
            },
        }
    }

    pub const fn forfeit(home: PlayerId, away: PlayerId, winner: PlayerId) -> Self {
        Self {
            home,
            away,
            outcome: MatchOutcome::Forfeit { winner },
        }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(self.home, self.away)
    }

    pub const fn involves(&self, id: PlayerId) -> bool {
        self.home == id || self.away == id
    }

    /// Two distinct players, and a forfeit winner who took part
    pub const fn is_well_formed(&self) -> bool {
        if self.home == self.away {
            return false;
        }
        match self.outcome {
            MatchOutcome::Sets { .. } => true,
            MatchOutcome::Forfeit { winner } => self.involves(winner),
        }
    }

    /// `None` for a level set count
    pub fn winner(&self) -> Option<PlayerId> {
        match self.outcome {
            MatchOutcome::Sets { home, away } if home > away => Some(self.home),
            MatchOutcome::Sets { home, away } if away > home => Some(self.away),
            MatchOutcome::Sets { .. } => None,
            MatchOutcome::Forfeit { winner } => Some(winner),
        }
    }

    /// `(sets won, sets lost)` from `id`'s side; a forfeit counts 1-0
    pub fn sets_for(&self, id: PlayerId) -> (u32, u32) {
        let (home, away) = match self.outcome {
            MatchOutcome::Sets { home, away } => (u32::from(home), u32::from(away)),
            MatchOutcome::Forfeit { winner } if winner == self.home => (1, 0),
            MatchOutcome::Forfeit { .. } => (0, 1),
        };
        if id == self.home { (home, away) } else { (away, home) }
    }
}

/// Pairs that have already met; malformed results are skipped
pub fn played_pairs(results: &[MatchResult]) -> HashSet<PairKey> {
    results
        .iter()
        .filter(|r| r.is_well_formed())
        .map(MatchResult::key)
        .collect()
}

/// At least two players, no id twice
pub(crate) fn check_field(ids: &[PlayerId]) -> ScheduleResult<()> {
    if ids.len() < 2 {
        return Err(ScheduleError::NotEnoughPlayers(ids.len()));
    }
    match entities::first_duplicate(ids.iter().copied()) {
        Some(id) => Err(ScheduleError::DuplicatePlayer(id)),
        None => Ok(()),
    }
}
