//! Integration tests for complete tournament flows.
//!
//! Tests planning each format, playing groups into a knockout, editing the
//! knockout by hand and handing it to submission.

use club_tournament::{
    bracket::Location,
    draw::DrawRandomizer,
    editor::{BracketEditor, EditorEvent, Gesture},
    entities::{Player, PlayerId},
    groups::{DistributionPolicy, Group},
    schedule::{
        MatchResult, Pairing, SwissHistory, compute_standings, generate_fair_schedule,
        generate_swiss_round, played_pairs,
    },
    tournament::{
        Submission, TournamentConfig, TournamentError, TournamentFormat, TournamentPlan,
        final_stage, plan_tournament,
    },
};

fn club(n: i64) -> Vec<Player> {
    (1..=n).map(|id| Player::rated(id, 2200 - 10 * id as i32)).collect()
}

/// Lower id wins 3-1, so strength order decides every match
fn play(pairings: &[Pairing]) -> Vec<MatchResult> {
    pairings
        .iter()
        .map(|p| {
            if p.home < p.away {
                MatchResult::sets(p.home, p.away, 3, 1)
            } else {
                MatchResult::sets(p.home, p.away, 1, 3)
            }
        })
        .collect()
}

#[test]
fn groups_feed_knockout_and_submission() {
    let players = club(16);
    let config = TournamentConfig {
        format: TournamentFormat::GroupsThenKnockout {
            group_size: 4,
            policy: DistributionPolicy::SnakeDraft,
            qualifiers_per_group: 2,
            seeds: 2,
        },
        ..TournamentConfig::default()
    };
    let mut draw = DrawRandomizer::from_seed(2024);

    let TournamentPlan::Groups(plans) = plan_tournament(&config, &players, &mut draw).unwrap() else {
        panic!("expected group plans");
    };
    assert_eq!(plans.len(), 4);

    let results: Vec<MatchResult> = plans
        .iter()
        .flat_map(|plan| {
            let pairings: Vec<Pairing> = plan.schedule.pairings().copied().collect();
            play(&pairings)
        })
        .collect();
    let groups: Vec<Group> = plans.iter().map(|plan| plan.group.clone()).collect();

    // Snake draft puts 1..4 in different groups; each wins its group.
    for group in &groups {
        let table = compute_standings(group.members(), &results);
        let best = group.members().iter().copied().min().unwrap();
        assert_eq!(table[0].player, best);
        assert_eq!(table[0].wins, 3);
    }

    let bracket = final_stage(&groups, &results, 2, 2, &players, &mut draw).unwrap();
    assert_eq!(bracket.size(), 8);
    assert_eq!(bracket.player_count(), 8);
    let mut qualifiers: Vec<PlayerId> = bracket.players().collect();
    qualifiers.sort_unstable();
    assert_eq!(qualifiers, (1..=8).collect::<Vec<_>>());
    assert_eq!(bracket.occupant(0), Some(1));
    assert_eq!(bracket.occupant(4), Some(2));

    // Organizer swaps two unseeded players through the holding zone.
    let mut editor = BracketEditor::new(bracket);
    let first = (0..8).find(|&s| s % 4 != 0 && editor.is_draggable(s)).unwrap();
    let moved = editor.bracket().occupant(first).unwrap();
    editor.handle(Gesture::PickUp(Location::Slot(first)));
    editor.handle(Gesture::DropInHolding);
    assert_eq!(editor.holding(), Some(moved));
    assert!(matches!(
        Submission::from_editor(&editor),
        Err(TournamentError::HoldingNotEmpty(id)) if id == moved
    ));

    editor.handle(Gesture::PickUp(Location::Holding));
    editor.handle(Gesture::DropOnSlot(first));
    let submission = Submission::from_editor(&editor).unwrap();
    assert!(submission.bracket().check_invariants().is_ok());

    let events = editor.drain_events();
    assert!(events.iter().any(|e| matches!(e, EditorEvent::Parked(id, _) if *id == moved)));
    assert!(events.iter().any(|e| matches!(e, EditorEvent::Unparked(id, _) if *id == moved)));
}

#[test]
fn swiss_event_runs_to_completion() {
    let players = club(9);
    let mut history = SwissHistory::default();

    for number in 1..=4 {
        let round = generate_swiss_round(&players, &history, number).unwrap();
        assert_eq!(round.round.pairings.len(), 4);
        let bye = round.round.bye.unwrap();
        assert!(!history.byes.contains(&bye));

        history.results.extend(play(&round.round.pairings));
        history.byes.push(bye);
    }

    let repeats = history.results.len() - played_pairs(&history.results).len();
    assert_eq!(repeats, 0);
    // Strongest player won every match it played.
    assert!(
        history
            .results
            .iter()
            .filter(|r| r.involves(1))
            .all(|r| r.winner() == Some(1))
    );
}

#[test]
fn league_reschedules_around_played_matches() {
    let ids: Vec<PlayerId> = (1..=6).collect();
    let first = generate_fair_schedule(&ids, &Default::default()).unwrap();
    assert_eq!(first.pairing_count(), 15);

    // Only the first round gets played before the club reshuffles.
    let results = play(&first.rounds[0].pairings);
    let played = played_pairs(&results);
    let rest = generate_fair_schedule(&ids, &played).unwrap();

    assert_eq!(rest.pairing_count(), 15 - results.len());
    assert!(rest.pairings().all(|p| !played.contains(&p.key())));
    assert!(rest.validate().is_ok());
}

#[test]
fn plan_rejects_bad_configs_and_fields() {
    let mut draw = DrawRandomizer::from_seed(1);

    let config = TournamentConfig {
        max_players: 8,
        ..TournamentConfig::default()
    };
    assert!(matches!(
        plan_tournament(&config, &club(9), &mut draw),
        Err(TournamentError::FieldSize { players: 9, .. })
    ));

    let mut duplicated = club(4);
    duplicated.push(Player::rated(2, 1000));
    assert!(matches!(
        plan_tournament(&TournamentConfig::default(), &duplicated, &mut draw),
        Err(TournamentError::Seed(_))
    ));

    let config = TournamentConfig::groups_then_knockout("Cup", 13);
    assert!(matches!(
        plan_tournament(&config, &club(20), &mut draw),
        Err(TournamentError::InvalidConfig(_))
    ));
}

#[test]
fn plan_serializes_for_storage() {
    let config = TournamentConfig::knockout("Open", 0);
    let plan = plan_tournament(&config, &club(3), &mut DrawRandomizer::from_seed(5)).unwrap();
    let json = serde_json::to_value(&plan).unwrap();
    let slots = json["bracket"].as_array().unwrap();
    assert_eq!(slots.len(), 4);
    assert_eq!(slots.iter().filter(|s| s.is_null()).count(), 1);
}
