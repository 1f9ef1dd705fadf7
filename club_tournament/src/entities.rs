//! Field-level entities shared by every structuring component.

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::HashSet, fmt};

/// Stable, unique player identifier as issued by the club's registry.
pub type PlayerId = i64;

/// Club rating. Only used for ordering; this crate never changes it.
pub type Rating = i32;

/// A registered entrant.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Player {
    #[must_use]
    pub const fn new(id: PlayerId, rating: Option<Rating>) -> Self {
        Self { id, rating }
    }

    #[must_use]
    pub const fn rated(id: PlayerId, rating: Rating) -> Self {
        Self::new(id, Some(rating))
    }

    #[must_use]
    pub const fn unrated(id: PlayerId) -> Self {
        Self::new(id, None)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rating {
            Some(rating) => write!(f, "#{} ({rating})", self.id),
            None => write!(f, "#{} (unrated)", self.id),
        }
    }
}

/// Strongest-first ordering: rating descending, unrated last, ties broken by
/// ascending id so the order is total.
#[must_use]
pub fn by_strength(a: &Player, b: &Player) -> Ordering {
    match (a.rating, b.rating) {
        (Some(ra), Some(rb)) => rb.cmp(&ra),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.id.cmp(&b.id))
}

/// Returns a copy of `players` sorted with [`by_strength`].
#[must_use]
pub fn ranked(players: &[Player]) -> Vec<Player> {
    let mut sorted = players.to_vec();
    sorted.sort_by(by_strength);
    sorted
}

/// Returns the first id that occurs more than once, if any.
pub fn first_duplicate<I>(ids: I) -> Option<PlayerId>
where
    I: IntoIterator<Item = PlayerId>,
{
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

/// Unordered pair of players, normalized so `(a, b)` and `(b, a)` compare
/// equal. Used to track which pairs have already met.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PairKey(PlayerId, PlayerId);

impl PairKey {
    #[must_use]
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    #[must_use]
    pub const fn low(&self) -> PlayerId {
        self.0
    }

    #[must_use]
    pub const fn high(&self) -> PlayerId {
        self.1
    }

    #[must_use]
    pub const fn contains(&self, id: PlayerId) -> bool {
        self.0 == id || self.1 == id
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} vs #{}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_puts_unrated_last() {
        let players = vec![
            Player::unrated(1),
            Player::rated(2, 1200),
            Player::rated(3, 1800),
            Player::unrated(0),
        ];
        let ids: Vec<PlayerId> = ranked(&players).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 0, 1]);
    }

    #[test]
    fn test_ranked_breaks_rating_ties_by_id() {
        let players = vec![Player::rated(9, 1500), Player::rated(4, 1500)];
        let ids: Vec<PlayerId> = ranked(&players).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 9]);
    }

    #[test]
    fn test_pair_key_is_unordered() {
        assert_eq!(PairKey::new(5, 2), PairKey::new(2, 5));
        assert_eq!(PairKey::new(5, 2).low(), 2);
        assert!(PairKey::new(5, 2).contains(5));
        assert!(!PairKey::new(5, 2).contains(3));
    }

    #[test]
    fn test_first_duplicate() {
        assert_eq!(first_duplicate([1, 2, 3]), None);
        assert_eq!(first_duplicate([1, 2, 1, 2]), Some(1));
    }

    #[test]
    fn test_player_deserializes_without_rating() {
        let player: Player = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(player, Player::unrated(7));
    }
}
