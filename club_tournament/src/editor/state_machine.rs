//! Bracket editor state machine.
//!
//! Gestures are dispatched to the current phase ([`Idle`] or [`Dragging`]),
//! which validates them against the bracket, applies the resulting slot
//! writes atomically and hands back the next phase.

use enum_dispatch::enum_dispatch;
use log::{debug, warn};
use std::collections::VecDeque;

use super::{
    messages::{EditorEvent, Gesture, GestureOutcome, Rejection},
    states::{Dragging, Idle},
};
use crate::{
    bracket::{
        BracketState, InvariantViolation, Location, SeedResult, Slot, SlotIndex,
        models::check_placement, seed_bracket,
    },
    draw::DrawRandomizer,
    entities::{Player, PlayerId},
};

/// Bracket plus holding zone, shared by every phase
#[derive(Debug, Clone)]
pub struct EditorData {
    pub(crate) bracket: BracketState,
    pub(crate) holding: Option<PlayerId>,
    /// Journal of accepted and rejected moves, drained by the UI.
    pub(crate) events: VecDeque<EditorEvent>,
}

/// Slot writes and holding content a drop would produce
#[derive(Debug)]
struct DropPlan {
    writes: Vec<(SlotIndex, Slot)>,
    holding: Option<PlayerId>,
    outcome: GestureOutcome,
    events: Vec<EditorEvent>,
}

impl EditorData {
    fn new(bracket: BracketState, holding: Option<PlayerId>) -> Self {
        Self {
            bracket,
            holding,
            events: VecDeque::new(),
        }
    }

    /// Plan for a drag that ends where it started
    fn unchanged(&self, player: PlayerId, to: Location) -> DropPlan {
        DropPlan {
            writes: Vec::new(),
            holding: self.holding,
            outcome: GestureOutcome::Returned { player, to },
            events: Vec::new(),
        }
    }

    fn pick_up(&self, from: Location) -> Result<PlayerId, Rejection> {
        match from {
            Location::Slot(idx) if !self.bracket.contains_slot(idx) => {
                Err(Rejection::SlotOutOfRange(idx))
            }
            Location::Slot(idx) => self.bracket.occupant(idx).ok_or(Rejection::EmptySlot(idx)),
            Location::Holding => self.holding.ok_or(Rejection::HoldingEmpty),
            Location::Unplaced => Err(Rejection::NothingToPickUp(from)),
        }
    }

    fn plan_drop_on_slot(&self, drag: &Dragging, target: SlotIndex) -> Result<DropPlan, Rejection> {
        let player = drag.player;
        if !self.bracket.contains_slot(target) {
            return Err(Rejection::SlotOutOfRange(target));
        }

        match drag.from {
            Location::Slot(origin) if origin == target => {
                Ok(self.unchanged(player, Location::Slot(origin)))
            }
            Location::Slot(origin) => {
                if self.bracket.occupant(target).is_some() {
                    return Err(Rejection::SlotOccupied(target));
                }
                let sibling = BracketState::sibling(origin);
                if self.bracket.is_bye(sibling) && target != sibling {
                    return Err(Rejection::ByePaired(origin));
                }
                // With holding empty the BYE trades places with the player;
                // with holding occupied the origin is simply vacated. Both
                // leave a BYE at the origin.
                Ok(DropPlan {
                    writes: vec![(target, Some(player)), (origin, None)],
                    holding: self.holding,
                    outcome: GestureOutcome::Moved {
                        player,
                        from: origin,
                        to: target,
                    },
                    events: vec![EditorEvent::Moved(player, origin, target)],
                })
            }
            Location::Holding => {
                if self.bracket.occupant(target).is_some() {
                    return Err(Rejection::SlotOccupied(target));
                }
                Ok(DropPlan {
                    writes: vec![(target, Some(player))],
                    holding: None,
                    outcome: GestureOutcome::Placed {
                        player,
                        slot: target,
                    },
                    events: vec![EditorEvent::Unparked(player, target)],
                })
            }
            Location::Unplaced => Err(Rejection::NothingToPickUp(Location::Unplaced)),
        }
    }

    fn plan_drop_in_holding(&self, drag: &Dragging) -> Result<DropPlan, Rejection> {
        let player = drag.player;
        match drag.from {
            Location::Slot(origin) => {
                // The match must keep a real player once this one leaves.
                if self.bracket.is_bye(BracketState::sibling(origin)) {
                    return Err(Rejection::ByePaired(origin));
                }
                let displaced = self.holding;
                let mut events = vec![EditorEvent::Parked(player, origin)];
                if let Some(previous) = displaced {
                    events.push(EditorEvent::Unparked(previous, origin));
                }
                Ok(DropPlan {
                    writes: vec![(origin, displaced)],
                    holding: Some(player),
                    outcome: GestureOutcome::Parked {
                        player,
                        from: origin,
                        displaced,
                    },
                    events,
                })
            }
            Location::Holding => Ok(self.unchanged(player, Location::Holding)),
            Location::Unplaced => Err(Rejection::NothingToPickUp(Location::Unplaced)),
        }
    }

    /// Apply `writes` to a copy of the bracket, refusing any result where a
    /// touched match holds two BYEs.
    fn stage(&self, writes: &[(SlotIndex, Slot)]) -> Result<BracketState, Rejection> {
        let mut candidate = self.bracket.clone();
        for &(slot, value) in writes {
            candidate.set(slot, value);
        }
        match writes
            .iter()
            .map(|&(slot, _)| BracketState::match_of(slot))
            .find(|&m| candidate.is_double_bye(m))
        {
            Some(m) => Err(Rejection::WouldCreateDoubleBye {
                match_number: m + 1,
            }),
            None => Ok(candidate),
        }
    }

    fn commit(&mut self, plan: DropPlan) -> Result<GestureOutcome, Rejection> {
        let bracket = self.stage(&plan.writes).inspect_err(|reason| {
            warn!("Rolled back move {:?}: {reason}", plan.outcome);
        })?;
        self.bracket = bracket;
        self.holding = plan.holding;
        self.events.extend(plan.events);
        debug!("Applied {:?}; bracket now {}", plan.outcome, self.bracket);
        Ok(plan.outcome)
    }

    fn reject(&mut self, reason: Rejection, target: Location) -> GestureOutcome {
        debug!("Rejected gesture at {target}: {reason}");
        self.events.push_back(EditorEvent::Rejected(reason, target));
        GestureOutcome::rejected(reason, target)
    }
}

/// Gesture handling that depends on the editor phase
#[enum_dispatch]
pub trait GestureHandling {
    /// Apply a gesture, returning the next phase and what to report.
    fn handle(&self, data: &mut EditorData, gesture: Gesture) -> (EditorPhase, GestureOutcome);
}

/// Phase of an editing session
#[enum_dispatch(GestureHandling)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    Dragging,
}

impl Default for EditorPhase {
    fn default() -> Self {
        Idle.into()
    }
}

impl GestureHandling for Idle {
    fn handle(&self, data: &mut EditorData, gesture: Gesture) -> (EditorPhase, GestureOutcome) {
        let outcome = match gesture {
            Gesture::PickUp(from) => match data.pick_up(from) {
                Ok(player) => {
                    debug!("Picked up {player} from {from}");
                    return (
                        Dragging::new(player, from).into(),
                        GestureOutcome::PickedUp { player, from },
                    );
                }
                Err(reason) => data.reject(reason, from),
            },
            Gesture::DropOnSlot(slot) => data.reject(Rejection::NotDragging, Location::Slot(slot)),
            Gesture::DropInHolding => data.reject(Rejection::NotDragging, Location::Holding),
            Gesture::Hover(_) | Gesture::Release => GestureOutcome::Ignored,
        };
        (Idle.into(), outcome)
    }
}

impl GestureHandling for Dragging {
    fn handle(&self, data: &mut EditorData, gesture: Gesture) -> (EditorPhase, GestureOutcome) {
        match gesture {
            Gesture::PickUp(from) => {
                let outcome = data.reject(Rejection::AlreadyDragging(self.player), from);
                ((*self).into(), outcome)
            }
            Gesture::Hover(slot) => {
                let droppable = data
                    .plan_drop_on_slot(self, slot)
                    .and_then(|plan| data.stage(&plan.writes))
                    .is_ok();
                let next = Dragging {
                    hover: Some(slot),
                    ..*self
                };
                (next.into(), GestureOutcome::Hovering { slot, droppable })
            }
            Gesture::DropOnSlot(slot) => {
                let outcome = data
                    .plan_drop_on_slot(self, slot)
                    .and_then(|plan| data.commit(plan))
                    .unwrap_or_else(|reason| data.reject(reason, Location::Slot(slot)));
                (Idle.into(), outcome)
            }
            Gesture::DropInHolding => {
                let outcome = data
                    .plan_drop_in_holding(self)
                    .and_then(|plan| data.commit(plan))
                    .unwrap_or_else(|reason| data.reject(reason, Location::Holding));
                (Idle.into(), outcome)
            }
            Gesture::Release => {
                debug!("Released {} back to {}", self.player, self.from);
                (
                    Idle.into(),
                    GestureOutcome::Returned {
                        player: self.player,
                        to: self.from,
                    },
                )
            }
        }
    }
}

/// Interactive editor for one seeded bracket.
///
/// Owned by a single editing session. Every gesture goes through
/// [`BracketEditor::handle`], which never fails: illegal gestures come back as
/// [`GestureOutcome::Rejected`] and leave the bracket as it was.
#[derive(Debug, Clone)]
pub struct BracketEditor {
    data: EditorData,
    phase: EditorPhase,
}

impl BracketEditor {
    pub fn new(bracket: BracketState) -> Self {
        Self {
            data: EditorData::new(bracket, None),
            phase: EditorPhase::default(),
        }
    }

    /// Start a session with a surplus player already parked in holding.
    pub fn with_holding(
        bracket: BracketState,
        player: PlayerId,
    ) -> Result<Self, InvariantViolation> {
        if bracket.location_of(player).is_some() {
            return Err(InvariantViolation::DuplicatePlayer(player));
        }
        Ok(Self {
            data: EditorData::new(bracket, Some(player)),
            phase: EditorPhase::default(),
        })
    }

    /// Apply one gesture
    pub fn handle(&mut self, gesture: Gesture) -> GestureOutcome {
        let (phase, outcome) = self.phase.handle(&mut self.data, gesture);
        self.phase = phase;
        outcome
    }

    /// By-value form of [`BracketEditor::handle`]
    #[must_use]
    pub fn apply(mut self, gesture: Gesture) -> (Self, GestureOutcome) {
        let outcome = self.handle(gesture);
        (self, outcome)
    }

    /// Throw away all manual edits and holding contents and seed afresh.
    ///
    /// On error nothing changes.
    pub fn reseed(
        &mut self,
        players: &[Player],
        num_seeds: usize,
        draw: &mut DrawRandomizer,
    ) -> SeedResult<()> {
        let bracket = seed_bracket(players, num_seeds, draw)?;
        if let Some(parked) = self.data.holding {
            debug!("Reseed discards {parked} from holding");
        }
        self.data.bracket = bracket;
        self.data.holding = None;
        self.phase = EditorPhase::default();
        self.data
            .events
            .push_back(EditorEvent::Reseeded { num_seeds });
        Ok(())
    }

    pub fn bracket(&self) -> &BracketState {
        &self.data.bracket
    }

    pub fn holding(&self) -> Option<PlayerId> {
        self.data.holding
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn dragging(&self) -> Option<Dragging> {
        match self.phase {
            EditorPhase::Dragging(drag) => Some(drag),
            EditorPhase::Idle(_) => None,
        }
    }

    /// Whether the player in `slot` can leave their match: both slots of the
    /// match must hold real players.
    pub fn is_draggable(&self, slot: SlotIndex) -> bool {
        let bracket = &self.data.bracket;
        bracket.occupant(slot).is_some()
            && bracket.occupant(BracketState::sibling(slot)).is_some()
    }

    pub fn location_of(&self, player: PlayerId) -> Location {
        if self.data.holding == Some(player) {
            return Location::Holding;
        }
        self.data
            .bracket
            .location_of(player)
            .map_or(Location::Unplaced, Location::Slot)
    }

    /// Ready to hand to the submission flow: no drag running, holding empty.
    pub fn is_finalizable(&self) -> bool {
        self.data.holding.is_none() && matches!(self.phase, EditorPhase::Idle(_))
    }

    /// Check bracket structure and that bracket plus holding hold `field`
    /// exactly once.
    pub fn verify(&self, field: &[PlayerId]) -> Result<(), InvariantViolation> {
        self.data.bracket.check_invariants()?;
        check_placement(self.data.bracket.players().chain(self.data.holding), field)
    }

    pub fn drain_events(&mut self) -> VecDeque<EditorEvent> {
        std::mem::take(&mut self.data.events)
    }

    pub fn into_bracket(self) -> BracketState {
        self.data.bracket
    }
}
