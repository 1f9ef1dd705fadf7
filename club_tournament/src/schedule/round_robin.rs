//! Complete round-robin schedules (circle method).

use log::debug;

use super::{
    errors::ScheduleResult,
    models::{Pairing, Round, Schedule, check_field},
};
use crate::entities::PlayerId;

/// Schedule every pair of `players` exactly once.
///
/// The first player stays fixed while the others rotate one position per
/// round; opposite positions meet. An odd field gets a synthetic BYE seat,
/// whose opponent sits the round out and is recorded as the round's `bye`.
///
/// Produces `n - 1` rounds for even `n` and `n` rounds for odd `n`, with
/// `n(n-1)/2` pairings in total.
pub fn generate_round_robin_schedule(players: &[PlayerId]) -> ScheduleResult<Schedule> {
    check_field(players)?;

    let mut circle: Vec<Option<PlayerId>> = players.iter().copied().map(Some).collect();
    if circle.len() % 2 == 1 {
        circle.push(None);
    }
    let seats = circle.len();

    let mut rounds = Vec::with_capacity(seats - 1);
    for r in 0..seats - 1 {
        let mut pairings = Vec::with_capacity(seats / 2);
        let mut bye = None;
        for i in 0..seats / 2 {
            match (circle[i], circle[seats - 1 - i]) {
                (Some(a), Some(b)) => {
                    // Alternate home and away for the fixed player.
                    let pairing = if i == 0 && r % 2 == 1 {
                        Pairing::new(b, a)
                    } else {
                        Pairing::new(a, b)
                    };
                    pairings.push(pairing);
                }
                (Some(id), None) | (None, Some(id)) => bye = Some(id),
                (None, None) => {}
            }
        }
        rounds.push(Round {
            number: r + 1,
            pairings,
            bye,
        });
        circle[1..].rotate_right(1);
    }

    let schedule = Schedule { rounds };
    debug!(
        "Round robin for {} players: {} rounds, {} pairings",
        players.len(),
        schedule.rounds.len(),
        schedule.pairing_count()
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PairKey;
    use crate::schedule::ScheduleError;
    use std::collections::HashSet;

    #[test]
    fn test_five_players() {
        let schedule = generate_round_robin_schedule(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(schedule.rounds.len(), 5);
        assert_eq!(schedule.pairing_count(), 10);
        assert!(schedule.rounds.iter().all(|r| r.bye.is_some()));
        assert!(schedule.validate().is_ok());

        let byes: HashSet<PlayerId> = schedule.rounds.iter().filter_map(|r| r.bye).collect();
        assert_eq!(byes.len(), 5);
    }

    #[test]
    fn test_even_field() {
        let schedule = generate_round_robin_schedule(&[10, 20, 30, 40, 50, 60]).unwrap();
        assert_eq!(schedule.rounds.len(), 5);
        assert_eq!(schedule.pairing_count(), 15);
        assert!(schedule.rounds.iter().all(|r| r.bye.is_none() && r.pairings.len() == 3));
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_every_pair_once() {
        let players: Vec<PlayerId> = (1..=9).collect();
        let schedule = generate_round_robin_schedule(&players).unwrap();
        let pairs: HashSet<PairKey> = schedule.pairings().map(Pairing::key).collect();
        assert_eq!(pairs.len(), 36);
    }

    #[test]
    fn test_two_players() {
        let schedule = generate_round_robin_schedule(&[7, 8]).unwrap();
        assert_eq!(schedule.rounds.len(), 1);
        assert_eq!(schedule.rounds[0].pairings, vec![Pairing::new(7, 8)]);
    }

    #[test]
    fn test_fixed_player_alternates_home_and_away() {
        let schedule = generate_round_robin_schedule(&[1, 2, 3, 4]).unwrap();
        let homes: Vec<bool> = schedule
            .rounds
            .iter()
            .map(|r| r.pairings.iter().any(|p| p.home == 1))
            .collect();
        assert_eq!(homes, vec![true, false, true]);
    }

    #[test]
    fn test_rejects_bad_fields() {
        assert_eq!(
            generate_round_robin_schedule(&[1]),
            Err(ScheduleError::NotEnoughPlayers(1))
        );
        assert_eq!(
            generate_round_robin_schedule(&[1, 2, 1]),
            Err(ScheduleError::DuplicatePlayer(1))
        );
    }
}
