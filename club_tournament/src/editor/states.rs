//! Editor phases.

use crate::bracket::{Location, SlotIndex};
use crate::entities::PlayerId;

/// No drag in progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Idle;

/// A player is being dragged.
///
/// The player stays at `from` until a drop succeeds, so the bracket is
/// complete between gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dragging {
    pub player: PlayerId,
    pub from: Location,
    /// Slot under the pointer, for highlighting
    pub hover: Option<SlotIndex>,
}

impl Dragging {
    #[must_use]
    pub const fn new(player: PlayerId, from: Location) -> Self {
        Self {
            player,
            from,
            hover: None,
        }
    }
}
