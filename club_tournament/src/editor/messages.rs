//! Gestures coming in from the UI and what the editor reports back.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::bracket::{Location, SlotIndex};
use crate::entities::PlayerId;

/// Pointer gestures the UI forwards to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    /// Start dragging whoever sits at a location
    PickUp(Location),
    /// Dragged player is over a slot
    Hover(SlotIndex),
    /// Dragged player released over a slot
    DropOnSlot(SlotIndex),
    /// Dragged player released over the holding zone
    DropInHolding,
    /// Drag ended anywhere else
    Release,
}

/// Why a gesture was turned down. The bracket is untouched whenever one of
/// these is reported.
#[derive(Debug, Clone, Copy, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum Rejection {
    #[error("slot {} does not exist", .0 + 1)]
    SlotOutOfRange(SlotIndex),
    #[error("slot {} holds a BYE", .0 + 1)]
    EmptySlot(SlotIndex),
    #[error("nobody is in holding")]
    HoldingEmpty,
    #[error("nothing to pick up from {0}")]
    NothingToPickUp(Location),
    #[error("already dragging player {0}")]
    AlreadyDragging(PlayerId),
    #[error("not dragging anyone")]
    NotDragging,
    #[error("slot {} is taken", .0 + 1)]
    SlotOccupied(SlotIndex),
    #[error("player in slot {} faces a BYE and can only switch sides", .0 + 1)]
    ByePaired(SlotIndex),
    #[error("match {match_number} would hold two BYEs")]
    WouldCreateDoubleBye { match_number: usize },
}

/// Result of a single gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureOutcome {
    PickedUp {
        player: PlayerId,
        from: Location,
    },
    /// Drop preview for the hovered slot
    Hovering {
        slot: SlotIndex,
        droppable: bool,
    },
    /// Bracket player moved onto a BYE slot
    Moved {
        player: PlayerId,
        from: SlotIndex,
        to: SlotIndex,
    },
    /// Holding occupant placed onto a BYE slot
    Placed {
        player: PlayerId,
        slot: SlotIndex,
    },
    /// Bracket player parked in holding; `displaced` took the vacated slot
    Parked {
        player: PlayerId,
        from: SlotIndex,
        displaced: Option<PlayerId>,
    },
    /// Drag ended without a change
    Returned {
        player: PlayerId,
        to: Location,
    },
    /// Gesture meaningless in the current phase
    Ignored,
    /// Transient "not allowed" signal tied to `target`
    Rejected {
        reason: Rejection,
        target: Location,
    },
}

impl GestureOutcome {
    pub(crate) fn rejected(reason: Rejection, target: Location) -> Self {
        Self::Rejected { reason, target }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Whether the bracket or holding zone changed
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Moved { .. } | Self::Placed { .. } | Self::Parked { .. }
        )
    }
}

/// Journal of what happened during an editing session
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub enum EditorEvent {
    Moved(PlayerId, SlotIndex, SlotIndex),
    Parked(PlayerId, SlotIndex),
    Unparked(PlayerId, SlotIndex),
    Rejected(Rejection, Location),
    Reseeded { num_seeds: usize },
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Moved(player, from, to) => {
                format!("{player} moved from slot {} to slot {}", from + 1, to + 1)
            }
            Self::Parked(player, from) => {
                format!("{player} parked in holding from slot {}", from + 1)
            }
            Self::Unparked(player, slot) => {
                format!("{player} left holding for slot {}", slot + 1)
            }
            Self::Rejected(reason, target) => format!("not allowed at {target}: {reason}"),
            Self::Reseeded { num_seeds } => format!("bracket reseeded with {num_seeds} seeds"),
        };
        write!(f, "{repr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages_use_one_based_slots() {
        assert_eq!(Rejection::SlotOccupied(0).to_string(), "slot 1 is taken");
        assert_eq!(
            Rejection::WouldCreateDoubleBye { match_number: 2 }.to_string(),
            "match 2 would hold two BYEs"
        );
    }

    #[test]
    fn test_event_display() {
        assert_eq!(
            EditorEvent::Moved(7, 0, 1).to_string(),
            "7 moved from slot 1 to slot 2"
        );
        assert_eq!(
            EditorEvent::Rejected(Rejection::HoldingEmpty, Location::Holding).to_string(),
            "not allowed at holding: nobody is in holding"
        );
    }

    #[test]
    fn test_outcome_classification() {
        let moved = GestureOutcome::Moved {
            player: 1,
            from: 0,
            to: 1,
        };
        assert!(moved.is_structural());
        assert!(!moved.is_rejected());
        let rejected = GestureOutcome::rejected(Rejection::NotDragging, Location::Holding);
        assert!(rejected.is_rejected());
        assert!(!rejected.is_structural());
    }
}
