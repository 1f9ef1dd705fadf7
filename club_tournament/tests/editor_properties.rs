/// Property-based tests for the bracket editor
///
/// Random gesture sequences never break bracket structure or lose a player,
/// and a rejected gesture never changes the bracket.
use club_tournament::{
    bracket::{BracketState, Location, seed_bracket, valid_seed_counts},
    draw::DrawRandomizer,
    editor::{BracketEditor, Gesture, GestureOutcome},
    entities::{Player, PlayerId},
};
use proptest::prelude::*;

fn field(n: usize) -> Vec<Player> {
    (1..=n as i64).map(|id| Player::rated(id, 3000 - id as i32)).collect()
}

fn seeded_editor(n: usize, seed: u64) -> (BracketEditor, Vec<PlayerId>) {
    let players = field(n);
    let mut draw = DrawRandomizer::from_seed(seed);
    let seeds = valid_seed_counts(n).last().copied().unwrap_or(0);
    let bracket = seed_bracket(&players, seeds, &mut draw).unwrap();
    (
        BracketEditor::new(bracket),
        players.iter().map(|p| p.id).collect(),
    )
}

/// Same as `seeded_editor`, plus one surplus player parked in holding
fn editor_with_parked_player(n: usize, seed: u64) -> (BracketEditor, Vec<PlayerId>) {
    let (editor, mut ids) = seeded_editor(n, seed);
    let surplus = n as PlayerId + 1;
    ids.push(surplus);
    let editor = BracketEditor::with_holding(editor.into_bracket(), surplus).unwrap();
    (editor, ids)
}

// Slot indices run one past the largest bracket to exercise range checks
fn gesture_strategy() -> impl Strategy<Value = Gesture> {
    let slot = 0usize..33;
    prop_oneof![
        3 => slot.clone().prop_map(|s| Gesture::PickUp(Location::Slot(s))),
        1 => Just(Gesture::PickUp(Location::Holding)),
        1 => Just(Gesture::PickUp(Location::Unplaced)),
        1 => slot.clone().prop_map(Gesture::Hover),
        4 => slot.prop_map(Gesture::DropOnSlot),
        2 => Just(Gesture::DropInHolding),
        1 => Just(Gesture::Release),
    ]
}

proptest! {
    #[test]
    fn test_gestures_preserve_structure(
        n in 2usize..=32,
        seed in any::<u64>(),
        gestures in prop::collection::vec(gesture_strategy(), 1..80),
        start_parked in any::<bool>(),
    ) {
        let (mut editor, ids) = if start_parked {
            editor_with_parked_player(n, seed)
        } else {
            seeded_editor(n, seed)
        };

        for gesture in gestures {
            let before = editor.bracket().clone();
            let holding_before = editor.holding();
            let outcome = editor.handle(gesture);

            prop_assert!(editor.bracket().check_invariants().is_ok(), "{:?} broke the bracket", gesture);
            prop_assert!(editor.verify(&ids).is_ok(), "{:?} lost or duplicated a player", gesture);

            if matches!(outcome, GestureOutcome::Moved { .. }) {
                prop_assert_eq!(editor.holding(), holding_before, "{:?} disturbed holding", gesture);
            }

            if !outcome.is_structural() {
                prop_assert_eq!(editor.bracket(), &before);
                prop_assert_eq!(editor.holding(), holding_before);
            }
        }
    }

    #[test]
    fn test_drop_on_occupied_slot_changes_nothing(
        n in 2usize..=32,
        seed in any::<u64>(),
        from in 0usize..32,
        to in 0usize..32,
    ) {
        let (mut editor, _) = seeded_editor(n, seed);
        let size = editor.bracket().size();
        let (from, to) = (from % size, to % size);
        prop_assume!(from != to);
        prop_assume!(editor.bracket().occupant(from).is_some());
        prop_assume!(editor.bracket().occupant(to).is_some());

        let before: BracketState = editor.bracket().clone();
        editor.handle(Gesture::PickUp(Location::Slot(from)));
        let outcome = editor.handle(Gesture::DropOnSlot(to));

        prop_assert!(outcome.is_rejected());
        prop_assert!(matches!(outcome, GestureOutcome::Rejected { .. }), "expected GestureOutcome::Rejected");
        prop_assert_eq!(editor.bracket(), &before);
        prop_assert!(editor.is_finalizable());
    }
}
