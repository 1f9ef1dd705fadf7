//! Initial single-elimination slot assignment.

use log::debug;

use super::{
    errors::{SeedError, SeedResult},
    models::{BracketState, Slot, SlotIndex},
};
use crate::{
    draw::DrawRandomizer,
    entities::{self, Player, PlayerId},
};

/// Slot count for a field: the next power of two, at least 2
pub fn bracket_size(field_size: usize) -> usize {
    field_size.max(2).next_power_of_two()
}

/// Largest seed count a field allows (a quarter of the bracket)
pub fn max_seeds(field_size: usize) -> usize {
    bracket_size(field_size) / 4
}

/// Seed counts a field accepts: 0, then every power of two from 2 up to
/// [`max_seeds`].
pub fn valid_seed_counts(field_size: usize) -> Vec<usize> {
    let max = max_seeds(field_size);
    let mut counts = vec![0];
    let mut k = 2;
    while k <= max {
        counts.push(k);
        k *= 2;
    }
    counts
}

/// Standard seed order for a bracket: entry `i` is the seed number (1-based)
/// that belongs in slot `i`. For 8 slots this is `[1, 8, 4, 5, 2, 7, 3, 6]`,
/// so seeds 1 and 2 can only meet in the final.
pub fn seed_positions(bracket_size: usize) -> Vec<usize> {
    let mut order = vec![1];
    while order.len() < bracket_size {
        let n = order.len() * 2;
        order = order.iter().flat_map(|&s| [s, n + 1 - s]).collect();
    }
    order
}

/// Slots taken by seeds 1..=num_seeds, in seed order
fn seed_slots(bracket_size: usize, num_seeds: usize) -> Vec<SlotIndex> {
    let order = seed_positions(bracket_size);
    (1..=num_seeds)
        .filter_map(|seed| order.iter().position(|&s| s == seed))
        .collect()
}

/// Build a first-round bracket for `players`.
///
/// With `num_seeds == 0` BYEs land in random matches (never two in one match)
/// and players fill the rest at random. Otherwise the `num_seeds` strongest
/// players take the standard seed slots and receive the BYEs first; the
/// remaining BYEs and players are drawn at random.
///
/// # Arguments
///
/// * `players` - The field; order does not matter
/// * `num_seeds` - One of [`valid_seed_counts`]
/// * `draw` - Random source
///
/// # Returns
///
/// * `SeedResult<BracketState>` - A bracket holding every player once
pub fn seed_bracket(
    players: &[Player],
    num_seeds: usize,
    draw: &mut DrawRandomizer,
) -> SeedResult<BracketState> {
    if players.len() < 2 {
        return Err(SeedError::NotEnoughPlayers(players.len()));
    }
    if let Some(id) = entities::first_duplicate(players.iter().map(|p| p.id)) {
        return Err(SeedError::DuplicatePlayer(id));
    }
    let valid = valid_seed_counts(players.len());
    if !valid.contains(&num_seeds) {
        return Err(SeedError::InvalidSeedCount {
            requested: num_seeds,
            valid,
        });
    }

    let size = bracket_size(players.len());
    let mut slots: Vec<Slot> = vec![None; size];
    // Slots already decided, either a seed or a BYE.
    let mut reserved = vec![false; size];

    let ranked = entities::ranked(players);
    let (seeded, unseeded) = ranked.split_at(num_seeds);

    let protected = seed_slots(size, num_seeds);
    for (player, &slot) in seeded.iter().zip(&protected) {
        slots[slot] = Some(player.id);
        reserved[slot] = true;
    }

    let mut byes_left = size - players.len();
    for &slot in &protected {
        if byes_left == 0 {
            break;
        }
        reserved[BracketState::sibling(slot)] = true;
        byes_left -= 1;
    }

    // Fewer BYEs than half the slots remain, so one per open match suffices.
    let open_matches: Vec<usize> = (0..size / 2)
        .filter(|&m| !reserved[2 * m] && !reserved[2 * m + 1])
        .collect();
    for pick in draw.sample_indices(open_matches.len(), byes_left) {
        let side = usize::from(draw.coin_flip());
        reserved[2 * open_matches[pick] + side] = true;
    }

    let mut pool: Vec<PlayerId> = unseeded.iter().map(|p| p.id).collect();
    draw.shuffle(&mut pool);
    let free = (0..size).filter(|&idx| !reserved[idx]);
    for (idx, id) in free.zip(pool) {
        slots[idx] = Some(id);
    }

    let bracket = BracketState::from_slots(slots)?;
    debug!(
        "Seeded {} players into {size} slots with {num_seeds} seeds and {} BYEs",
        players.len(),
        bracket.bye_count()
    );
    Ok(bracket)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(n: i64) -> Vec<Player> {
        (1..=n).map(|i| Player::rated(i, 2000 - i as i32)).collect()
    }

    #[test]
    fn test_bracket_size() {
        assert_eq!(bracket_size(2), 2);
        assert_eq!(bracket_size(5), 8);
        assert_eq!(bracket_size(8), 8);
        assert_eq!(bracket_size(9), 16);
    }

    #[test]
    fn test_valid_seed_counts() {
        assert_eq!(valid_seed_counts(3), vec![0]);
        assert_eq!(valid_seed_counts(5), vec![0, 2]);
        assert_eq!(valid_seed_counts(16), vec![0, 2, 4]);
        assert_eq!(valid_seed_counts(20), vec![0, 2, 4, 8]);
        assert_eq!(valid_seed_counts(64), vec![0, 2, 4, 8, 16]);
    }

    #[test]
    fn test_seed_positions() {
        assert_eq!(seed_positions(2), vec![1, 2]);
        assert_eq!(seed_positions(4), vec![1, 4, 2, 3]);
        assert_eq!(seed_positions(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
    }

    #[test]
    fn test_five_players_unseeded() {
        let mut draw = DrawRandomizer::from_seed(5);
        let bracket = seed_bracket(&field(5), 0, &mut draw).unwrap();
        assert_eq!(bracket.size(), 8);
        assert_eq!(bracket.bye_count(), 3);
        assert!(bracket.check_invariants().is_ok());
        assert!(bracket.check_field(&[1, 2, 3, 4, 5]).is_ok());
    }

    #[test]
    fn test_seeds_take_standard_slots_and_byes() {
        let mut draw = DrawRandomizer::from_seed(9);
        // 12 players -> 16 slots, 4 BYEs, 4 seeds.
        let bracket = seed_bracket(&field(12), 4, &mut draw).unwrap();
        let order = seed_positions(16);
        for seed in 1..=4i64 {
            let slot = order.iter().position(|&s| s as i64 == seed).unwrap();
            assert_eq!(bracket.occupant(slot), Some(seed));
            assert!(bracket.is_bye(BracketState::sibling(slot)));
        }
        assert_eq!(bracket.bye_count(), 4);
    }

    #[test]
    fn test_top_two_seeds_in_opposite_halves() {
        let mut draw = DrawRandomizer::from_seed(2);
        let bracket = seed_bracket(&field(30), 8, &mut draw).unwrap();
        let half = bracket.size() / 2;
        let one = bracket.location_of(1).unwrap();
        let two = bracket.location_of(2).unwrap();
        assert!((one < half) != (two < half));
    }

    #[test]
    fn test_seeds_use_rating_not_input_order() {
        let mut players = field(8);
        players.reverse();
        let mut draw = DrawRandomizer::from_seed(4);
        let bracket = seed_bracket(&players, 2, &mut draw).unwrap();
        assert_eq!(bracket.occupant(0), Some(1));
        assert_eq!(bracket.occupant(4), Some(2));
    }

    #[test]
    fn test_more_seeds_than_byes() {
        // 15 players -> 16 slots, 1 BYE, 4 seeds: only seed 1 gets the BYE.
        let mut draw = DrawRandomizer::from_seed(8);
        let bracket = seed_bracket(&field(15), 4, &mut draw).unwrap();
        assert!(bracket.is_bye(1));
        assert_eq!(bracket.bye_count(), 1);
    }

    #[test]
    fn test_rejects_invalid_seed_count() {
        let mut draw = DrawRandomizer::from_seed(1);
        let err = seed_bracket(&field(8), 3, &mut draw).unwrap_err();
        assert_eq!(
            err,
            SeedError::InvalidSeedCount {
                requested: 3,
                valid: vec![0, 2]
            }
        );
        assert!(seed_bracket(&field(8), 4, &mut draw).is_err());
    }

    #[test]
    fn test_rejects_tiny_and_duplicate_fields() {
        let mut draw = DrawRandomizer::from_seed(1);
        assert_eq!(
            seed_bracket(&field(1), 0, &mut draw),
            Err(SeedError::NotEnoughPlayers(1))
        );
        let dup = vec![Player::unrated(1), Player::unrated(1)];
        assert_eq!(
            seed_bracket(&dup, 0, &mut draw),
            Err(SeedError::DuplicatePlayer(1))
        );
    }

    #[test]
    fn test_same_seed_same_bracket() {
        let a = seed_bracket(&field(11), 2, &mut DrawRandomizer::from_seed(77)).unwrap();
        let b = seed_bracket(&field(11), 2, &mut DrawRandomizer::from_seed(77)).unwrap();
        assert_eq!(a, b);
    }
}
