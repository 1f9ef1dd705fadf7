//! Swiss-system round pairing.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{
    errors::{ScheduleError, ScheduleResult},
    models::{MatchResult, Pairing, Round, check_field, played_pairs},
};
use crate::entities::{self, PairKey, Player, PlayerId};

/// Upper bound on pairing attempts per BYE candidate
const SEARCH_BUDGET: usize = 1_000_000;

/// Everything earlier rounds produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwissHistory {
    #[serde(default)]
    pub results: Vec<MatchResult>,
    /// Players who already sat a round out
    #[serde(default)]
    pub byes: Vec<PlayerId>,
}

impl SwissHistory {
    /// Wins plus byes received
    pub fn points(&self, id: PlayerId) -> u32 {
        let wins = self
            .results
            .iter()
            .filter(|r| r.is_well_formed() && r.winner() == Some(id))
            .count();
        let byes = self.byes.iter().filter(|&&b| b == id).count();
        u32::try_from(wins + byes).unwrap_or(u32::MAX)
    }

    pub fn had_bye(&self, id: PlayerId) -> bool {
        self.byes.contains(&id)
    }
}

/// A paired Swiss round plus the players paired outside their point group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwissRound {
    pub round: Round,
    /// Higher-scored side of every cross-group pairing
    pub floated: Vec<PlayerId>,
}

/// Pair round `round_number` of a Swiss event.
///
/// Players are ranked by points, then by rating and id. For an odd field the
/// lowest-ranked player without a previous BYE sits out (players who already
/// had one are tried only as a last resort). The rest are paired top down,
/// each taking the nearest-ranked opponent they have not met, backtracking
/// when a later player would be left without a legal opponent.
///
/// Results and byes that mention players outside `players` are ignored.
pub fn generate_swiss_round(
    players: &[Player],
    history: &SwissHistory,
    round_number: usize,
) -> ScheduleResult<SwissRound> {
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    check_field(&ids)?;

    let known: HashSet<PlayerId> = ids.iter().copied().collect();
    let results: Vec<MatchResult> = history
        .results
        .iter()
        .filter(|r| r.is_well_formed() && known.contains(&r.home) && known.contains(&r.away))
        .copied()
        .collect();
    let relevant = SwissHistory {
        results,
        byes: history
            .byes
            .iter()
            .copied()
            .filter(|id| known.contains(id))
            .collect(),
    };
    let played = played_pairs(&relevant.results);
    let points: HashMap<PlayerId, u32> = ids.iter().map(|&id| (id, relevant.points(id))).collect();

    let mut standing = players.to_vec();
    standing.sort_by(|a, b| {
        points[&b.id]
            .cmp(&points[&a.id])
            .then_with(|| entities::by_strength(a, b))
    });
    let ranked: Vec<PlayerId> = standing.iter().map(|p| p.id).collect();

    let bye_candidates: Vec<Option<PlayerId>> = if ranked.len() % 2 == 0 {
        vec![None]
    } else {
        let (fresh, repeat): (Vec<PlayerId>, Vec<PlayerId>) =
            ranked.iter().rev().partition(|&&id| !relevant.had_bye(id));
        fresh.into_iter().chain(repeat).map(Some).collect()
    };

    for bye in bye_candidates {
        let field: Vec<PlayerId> = ranked
            .iter()
            .copied()
            .filter(|&id| Some(id) != bye)
            .collect();
        let Some(pairs) = pair_ranked(&field, &played) else {
            continue;
        };

        let floated = pairs
            .iter()
            .filter(|(home, away)| points[home] != points[away])
            .map(|(home, away)| if points[home] > points[away] { *home } else { *away })
            .collect();
        let round = Round {
            number: round_number,
            pairings: pairs
                .into_iter()
                .map(|(home, away)| Pairing::new(home, away))
                .collect(),
            bye,
        };
        debug!(
            "Swiss round {round_number}: {} pairings, bye {:?}",
            round.pairings.len(),
            round.bye
        );
        return Ok(SwissRound { round, floated });
    }

    Err(ScheduleError::NoValidPairing {
        round: round_number,
    })
}

/// Rematch-free perfect pairing of `field`, preferring nearest ranks
fn pair_ranked(field: &[PlayerId], played: &HashSet<PairKey>) -> Option<Vec<(PlayerId, PlayerId)>> {
    let mut taken = vec![false; field.len()];
    let mut pairs = Vec::with_capacity(field.len() / 2);
    let mut budget = SEARCH_BUDGET;
    extend_pairing(field, played, &mut taken, &mut pairs, &mut budget).then_some(pairs)
}

fn extend_pairing(
    field: &[PlayerId],
    played: &HashSet<PairKey>,
    taken: &mut [bool],
    pairs: &mut Vec<(PlayerId, PlayerId)>,
    budget: &mut usize,
) -> bool {
    let Some(first) = taken.iter().position(|t| !t) else {
        return true;
    };
    taken[first] = true;

    for second in first + 1..field.len() {
        if taken[second] || played.contains(&PairKey::new(field[first], field[second])) {
            continue;
        }
        if *budget == 0 {
            break;
        }
        *budget -= 1;

        taken[second] = true;
        pairs.push((field[first], field[second]));
        if extend_pairing(field, played, taken, pairs, budget) {
            return true;
        }
        pairs.pop();
        taken[second] = false;
    }

    taken[first] = false;
    false
}
