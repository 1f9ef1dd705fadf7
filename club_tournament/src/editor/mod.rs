//! Interactive bracket editor.
//!
//! A session-scoped state machine over a seeded bracket plus a single holding
//! zone. The UI feeds pointer [`Gesture`]s into [`BracketEditor::handle`] and
//! gets a [`GestureOutcome`] back; illegal gestures are reported as rejections
//! and never change the bracket.
//!
//! Rules enforced on every drop:
//! - a player never lands on a slot taken by another player
//! - no first-round match ends up with two BYEs
//! - a player facing a BYE can only switch sides within their match
//! - parking in holding needs two real players in the match; an occupied
//!   holding zone trades its occupant into the vacated slot
//!
//! ## Example
//!
//! ```
//! use club_tournament::bracket::{BracketState, Location};
//! use club_tournament::editor::{BracketEditor, Gesture, GestureOutcome};
//!
//! let bracket = BracketState::from_slots(vec![Some(1), None, Some(3), Some(4)]).unwrap();
//! let mut editor = BracketEditor::new(bracket);
//!
//! editor.handle(Gesture::PickUp(Location::Slot(0)));
//! let outcome = editor.handle(Gesture::DropOnSlot(1));
//!
//! assert!(matches!(outcome, GestureOutcome::Moved { player: 1, from: 0, to: 1 }));
//! assert_eq!(editor.bracket().slots(), &[None, Some(1), Some(3), Some(4)]);
//! ```

pub mod messages;
pub mod state_machine;
pub mod states;

pub use messages::{EditorEvent, Gesture, GestureOutcome, Rejection};
pub use state_machine::{BracketEditor, EditorData, EditorPhase, GestureHandling};
pub use states::{Dragging, Idle};
