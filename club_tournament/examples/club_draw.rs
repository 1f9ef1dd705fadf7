//! Club Draw Example
//!
//! Walks through a typical club night: groups, a seeded knockout, and a
//! manual correction in the bracket editor.

use club_tournament::bracket::{Location, valid_seed_counts};
use club_tournament::draw::DrawRandomizer;
use club_tournament::editor::{BracketEditor, Gesture};
use club_tournament::entities::Player;
use club_tournament::groups::{DistributionPolicy, partition_field};
use club_tournament::schedule::generate_round_robin_schedule;
use club_tournament::seed_bracket;

fn main() {
    println!("=== Club Draw Example ===\n");

    let players: Vec<Player> = (1..=11)
        .map(|id| {
            if id % 4 == 0 {
                Player::unrated(id)
            } else {
                Player::rated(id, 1900 - 25 * id as i32)
            }
        })
        .collect();
    let mut draw = DrawRandomizer::from_seed(2024);

    // Example 1: Preliminary groups
    println!("Example 1: Snake-drafted groups of 4");
    match partition_field(&players, 4, DistributionPolicy::SnakeDraft, &mut draw) {
        Ok(groups) => {
            for (i, group) in groups.iter().enumerate() {
                println!("Group {}: {:?}", i + 1, group.members());
                if let Ok(schedule) = generate_round_robin_schedule(group.members()) {
                    for round in &schedule.rounds {
                        let games: Vec<String> =
                            round.pairings.iter().map(ToString::to_string).collect();
                        println!("  Round {}: {}", round.number, games.join(", "));
                    }
                }
            }
        }
        Err(e) => println!("Could not form groups: {e}"),
    }
    println!();

    // Example 2: Seeded knockout
    println!("Example 2: Knockout bracket");
    let counts = valid_seed_counts(players.len());
    println!("Allowed seed counts: {counts:?}");
    let seeds = counts.last().copied().unwrap_or(0);
    let bracket = match seed_bracket(&players, seeds, &mut draw) {
        Ok(bracket) => bracket,
        Err(e) => {
            println!("Seeding failed: {e}");
            return;
        }
    };
    println!("{seeds} seeds: {bracket}");
    println!("Walkovers: {:?}\n", bracket.walkovers());

    // Example 3: Manual correction
    println!("Example 3: Editing the bracket");
    let mut editor = BracketEditor::new(bracket);
    let Some(slot) = (0..editor.bracket().size()).find(|&s| editor.is_draggable(s)) else {
        println!("Nobody can be moved");
        return;
    };
    for gesture in [
        Gesture::PickUp(Location::Slot(slot)),
        Gesture::DropInHolding,
        Gesture::PickUp(Location::Holding),
        Gesture::DropOnSlot(0),
        Gesture::Release,
        Gesture::PickUp(Location::Holding),
        Gesture::DropOnSlot(slot),
    ] {
        println!("{gesture:?} -> {:?}", editor.handle(gesture));
    }
    for event in editor.drain_events() {
        println!("  {event}");
    }
    println!("Final: {}", editor.bracket());
    println!("Ready to submit: {}", editor.is_finalizable());
}
