//! Fair incremental pairing.
//!
//! Builds rounds greedily from the pairs that have not met yet, keeping the
//! number of matches per player as even as possible. Runs from scratch on
//! every call; the only input carried between calls is what has already been
//! played.

use log::debug;
use std::collections::HashSet;

use super::{
    errors::ScheduleResult,
    models::{Pairing, Round, Schedule, check_field},
};
use crate::entities::{PairKey, PlayerId};

/// Spread of match counts a pick may create without being penalized
const MAX_SPREAD: usize = 1;

/// Schedule every pair of `players` that is not in `played`.
///
/// Each round repeatedly takes the open pair whose players are both still free
/// in that round, ranked by:
/// 1. whether it would push a player more than one match ahead of the
///    least-scheduled player,
/// 2. whether either player is above that minimum,
/// 3. the two players' combined match count,
/// 4. field order.
///
/// A round closes when no free pair is left. Counters start at each player's
/// number of already played matches, so rescheduling after some results
/// favours the players who are behind.
pub fn generate_fair_schedule(
    players: &[PlayerId],
    played: &HashSet<PairKey>,
) -> ScheduleResult<Schedule> {
    check_field(players)?;
    let n = players.len();

    let mut counters = vec![0usize; n];
    let mut candidates = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            if played.contains(&PairKey::new(players[i], players[j])) {
                counters[i] += 1;
                counters[j] += 1;
            } else {
                candidates.push((i, j));
            }
        }
    }

    // Unscheduled pairs left per player.
    let mut open = vec![0usize; n];
    for &(i, j) in &candidates {
        open[i] += 1;
        open[j] += 1;
    }

    let mut used = vec![false; candidates.len()];
    let mut remaining = candidates.len();
    let mut rounds = Vec::new();

    while remaining > 0 {
        let mut placed = vec![false; n];
        let mut pairings = Vec::new();

        loop {
            let floor = (0..n)
                .filter(|&p| open[p] > 0)
                .map(|p| counters[p])
                .min()
                .unwrap_or(0);

            let best = candidates
                .iter()
                .enumerate()
                .filter(|&(k, &(i, j))| !used[k] && !placed[i] && !placed[j])
                .min_by_key(|&(k, &(i, j))| {
                    let (ci, cj) = (counters[i], counters[j]);
                    let over_spread = ci.max(cj) + 1 - floor > MAX_SPREAD + 1;
                    let above_floor = ci != floor || cj != floor;
                    (over_spread, above_floor, ci + cj, k)
                })
                .map(|(k, &pair)| (k, pair));

            let Some((k, (i, j))) = best else {
                break;
            };
            used[k] = true;
            remaining -= 1;
            placed[i] = true;
            placed[j] = true;
            counters[i] += 1;
            counters[j] += 1;
            open[i] -= 1;
            open[j] -= 1;
            pairings.push(Pairing::new(players[i], players[j]));
        }

        let idle: Vec<PlayerId> = (0..n).filter(|&p| !placed[p]).map(|p| players[p]).collect();
        rounds.push(Round {
            number: rounds.len() + 1,
            pairings,
            bye: match idle.as_slice() {
                [only] => Some(*only),
                _ => None,
            },
        });
    }

    let schedule = Schedule { rounds };
    debug!(
        "Fair schedule for {n} players ({} already played): {} rounds, {} pairings",
        played.len(),
        schedule.rounds.len(),
        schedule.pairing_count()
    );
    Ok(schedule)
}
