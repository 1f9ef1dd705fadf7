//! Bracket data models.

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

use super::errors::InvariantViolation;
use crate::entities::{self, PlayerId};

/// Zero-based position in the first round. Slots `2m` and `2m + 1` form
/// match `m`.
pub type SlotIndex = usize;

/// Content of a slot; `None` is a BYE.
pub type Slot = Option<PlayerId>;

/// Where a player currently sits while a bracket is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Slot(SlotIndex),
    Holding,
    Unplaced,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Slot(idx) => write!(f, "slot {}", idx + 1),
            Location::Holding => write!(f, "holding"),
            Location::Unplaced => write!(f, "unplaced"),
        }
    }
}

/// One first-round match as seen from the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstRoundMatch {
    /// 1-indexed match number
    pub number: usize,
    pub home: Slot,
    pub away: Slot,
}

impl FirstRoundMatch {
    /// Player who advances without playing, if the opponent is a BYE
    pub fn walkover(&self) -> Option<PlayerId> {
        match (self.home, self.away) {
            (Some(id), None) | (None, Some(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_double_bye(&self) -> bool {
        self.home.is_none() && self.away.is_none()
    }
}

/// First-round slot assignment of a single-elimination bracket.
///
/// Always upholds:
/// - the slot count is a power of two, at least 2
/// - no match holds two BYEs
/// - no player occupies two slots
///
/// Serializes as a flat array of nullable player ids, which is the shape the
/// persistence layer stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Slot>", into = "Vec<Slot>")]
pub struct BracketState {
    slots: Vec<Slot>,
}

impl BracketState {
    /// Validate and wrap a flat slot array.
    pub fn from_slots(slots: Vec<Slot>) -> Result<Self, InvariantViolation> {
        let bracket = Self { slots };
        bracket.check_invariants()?;
        Ok(bracket)
    }

    /// Check the structural rules listed on [`BracketState`].
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let size = self.slots.len();
        if size < 2 || !size.is_power_of_two() {
            return Err(InvariantViolation::InvalidSize(size));
        }
        if let Some(m) = (0..self.num_matches()).find(|&m| self.is_double_bye(m)) {
            return Err(InvariantViolation::DoubleBye {
                match_number: m + 1,
            });
        }
        if let Some(id) = entities::first_duplicate(self.players()) {
            return Err(InvariantViolation::DuplicatePlayer(id));
        }
        Ok(())
    }

    /// Check that the bracket holds exactly the given field.
    pub fn check_field(&self, field: &[PlayerId]) -> Result<(), InvariantViolation> {
        check_placement(self.players(), field)
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn num_matches(&self) -> usize {
        self.slots.len() / 2
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn contains_slot(&self, idx: SlotIndex) -> bool {
        idx < self.slots.len()
    }

    /// Player in `idx`; `None` for a BYE or an index out of range
    pub fn occupant(&self, idx: SlotIndex) -> Option<PlayerId> {
        self.slots.get(idx).copied().flatten()
    }

    /// Whether `idx` is an in-range BYE slot
    pub fn is_bye(&self, idx: SlotIndex) -> bool {
        matches!(self.slots.get(idx), Some(None))
    }

    /// The other slot of the same match
    pub const fn sibling(idx: SlotIndex) -> SlotIndex {
        idx ^ 1
    }

    /// Zero-based match a slot belongs to
    pub const fn match_of(idx: SlotIndex) -> usize {
        idx / 2
    }

    pub fn is_double_bye(&self, match_idx: usize) -> bool {
        self.is_bye(2 * match_idx) && self.is_bye(2 * match_idx + 1)
    }

    pub fn location_of(&self, id: PlayerId) -> Option<SlotIndex> {
        self.slots.iter().position(|slot| *slot == Some(id))
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    pub fn player_count(&self) -> usize {
        self.players().count()
    }

    pub fn bye_count(&self) -> usize {
        self.size() - self.player_count()
    }

    pub fn first_round_matches(&self) -> Vec<FirstRoundMatch> {
        self.slots
            .chunks_exact(2)
            .enumerate()
            .map(|(m, pair)| FirstRoundMatch {
                number: m + 1,
                home: pair[0],
                away: pair[1],
            })
            .collect()
    }

    /// Players that reach round two through a BYE, in bracket order
    pub fn walkovers(&self) -> Vec<PlayerId> {
        self.first_round_matches()
            .iter()
            .filter_map(FirstRoundMatch::walkover)
            .collect()
    }

    pub(crate) fn set(&mut self, idx: SlotIndex, slot: Slot) {
        self.slots[idx] = slot;
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }
}

impl TryFrom<Vec<Slot>> for BracketState {
    type Error = InvariantViolation;

    fn try_from(value: Vec<Slot>) -> Result<Self, Self::Error> {
        Self::from_slots(value)
    }
}

impl From<BracketState> for Vec<Slot> {
    fn from(value: BracketState) -> Self {
        value.slots
    }
}

impl fmt::Display for BracketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr: Vec<String> = self
            .slots
            .iter()
            .map(|slot| match slot {
                Some(id) => id.to_string(),
                None => "BYE".to_string(),
            })
            .collect();
        write!(f, "[{}]", repr.join(", "))
    }
}

/// Check that `placed` holds every id of `field` exactly once and nothing else.
pub(crate) fn check_placement<I>(placed: I, field: &[PlayerId]) -> Result<(), InvariantViolation>
where
    I: IntoIterator<Item = PlayerId>,
{
    let expected: HashSet<PlayerId> = field.iter().copied().collect();
    let mut seen = HashSet::with_capacity(field.len());
    for id in placed {
        if !seen.insert(id) {
            return Err(InvariantViolation::DuplicatePlayer(id));
        }
        if !expected.contains(&id) {
            return Err(InvariantViolation::UnknownPlayer(id));
        }
    }
    match field.iter().find(|id| !seen.contains(id)) {
        Some(&id) => Err(InvariantViolation::MissingPlayer(id)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slots_rejects_double_bye() {
        let err = BracketState::from_slots(vec![Some(1), Some(2), None, None]).unwrap_err();
        assert_eq!(err, InvariantViolation::DoubleBye { match_number: 2 });
    }

    #[test]
    fn test_from_slots_rejects_bad_size() {
        let err = BracketState::from_slots(vec![Some(1), Some(2), Some(3)]).unwrap_err();
        assert_eq!(err, InvariantViolation::InvalidSize(3));
    }

    #[test]
    fn test_from_slots_rejects_duplicates() {
        let err = BracketState::from_slots(vec![Some(1), Some(1)]).unwrap_err();
        assert_eq!(err, InvariantViolation::DuplicatePlayer(1));
    }

    #[test]
    fn test_slot_queries() {
        let bracket = BracketState::from_slots(vec![Some(1), None, Some(3), Some(4)]).unwrap();
        assert!(bracket.is_bye(1));
        assert!(!bracket.is_bye(0));
        assert!(!bracket.is_bye(9));
        assert_eq!(bracket.occupant(2), Some(3));
        assert_eq!(bracket.occupant(9), None);
        assert_eq!(BracketState::sibling(2), 3);
        assert_eq!(BracketState::sibling(3), 2);
        assert_eq!(BracketState::match_of(3), 1);
        assert_eq!(bracket.location_of(4), Some(3));
        assert_eq!(bracket.bye_count(), 1);
        assert_eq!(bracket.walkovers(), vec![1]);
    }

    #[test]
    fn test_check_field() {
        let bracket = BracketState::from_slots(vec![Some(1), None, Some(3), Some(4)]).unwrap();
        assert!(bracket.check_field(&[1, 3, 4]).is_ok());
        assert_eq!(
            bracket.check_field(&[1, 3, 4, 5]),
            Err(InvariantViolation::MissingPlayer(5))
        );
        assert_eq!(
            bracket.check_field(&[1, 3]),
            Err(InvariantViolation::UnknownPlayer(4))
        );
    }

    #[test]
    fn test_serializes_as_flat_array() {
        let bracket = BracketState::from_slots(vec![Some(1), None, Some(3), Some(4)]).unwrap();
        let json = serde_json::to_string(&bracket).unwrap();
        assert_eq!(json, "[1,null,3,4]");

        let back: BracketState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bracket);

        assert!(serde_json::from_str::<BracketState>("[null,null,1,2]").is_err());
    }

    #[test]
    fn test_display() {
        let bracket = BracketState::from_slots(vec![Some(1), None]).unwrap();
        assert_eq!(bracket.to_string(), "[1, BYE]");
        assert_eq!(Location::Slot(0).to_string(), "slot 1");
    }
}
