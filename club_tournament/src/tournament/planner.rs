//! Turns a configuration and a field into the initial tournament structure.

use log::{debug, info};
use std::collections::HashMap;
use thiserror::Error;

use super::models::{GroupPlan, Submission, TournamentConfig, TournamentFormat, TournamentPlan};
use crate::bracket::{BracketState, SeedError, seed_bracket, valid_seed_counts};
use crate::draw::DrawRandomizer;
use crate::editor::BracketEditor;
use crate::entities::{Player, PlayerId};
use crate::groups::{Group, GroupError, partition_field};
use crate::schedule::{
    MatchResult, ScheduleError, SwissHistory, compute_standings, generate_round_robin_schedule,
    generate_swiss_round,
};

/// Tournament errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    #[error("Invalid tournament configuration: {0}")]
    InvalidConfig(String),

    #[error("Field of {players} players is outside the allowed {min}..={max}")]
    FieldSize {
        players: usize,
        min: usize,
        max: usize,
    },

    #[error("Player {0} is still parked in holding")]
    HoldingNotEmpty(PlayerId),

    #[error("A drag is still in progress")]
    DragInProgress,

    #[error("Group error: {0}")]
    Group(#[from] GroupError),

    #[error("Seeding error: {0}")]
    Seed(#[from] SeedError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

/// Build the opening structure for `players` under `config`.
///
/// Knockouts get a seeded bracket, leagues a full round robin, Swiss events
/// their first round, and group formats one round-robin schedule per group.
pub fn plan_tournament(
    config: &TournamentConfig,
    players: &[Player],
    draw: &mut DrawRandomizer,
) -> TournamentResult<TournamentPlan> {
    config.validate()?;
    config.check_field_size(players.len())?;

    let plan = match config.format {
        TournamentFormat::SingleElimination { seeds } => {
            TournamentPlan::Bracket(seed_bracket(players, seeds, draw)?)
        }
        TournamentFormat::RoundRobin => {
            let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
            TournamentPlan::League(generate_round_robin_schedule(&ids)?)
        }
        TournamentFormat::Swiss { rounds } => {
            if rounds >= players.len() {
                return Err(TournamentError::InvalidConfig(format!(
                    "{rounds} Swiss rounds need more than {} players",
                    players.len()
                )));
            }
            TournamentPlan::Swiss(generate_swiss_round(players, &SwissHistory::default(), 1)?)
        }
        TournamentFormat::GroupsThenKnockout {
            group_size,
            policy,
            qualifiers_per_group,
            seeds,
        } => {
            let groups = partition_field(players, group_size, policy, draw)?;
            check_knockout_stage(&groups, qualifiers_per_group, seeds)?;
            let plans = groups
                .into_iter()
                .map(|group| {
                    let schedule = generate_round_robin_schedule(group.members())?;
                    Ok(GroupPlan { group, schedule })
                })
                .collect::<TournamentResult<Vec<_>>>()?;
            TournamentPlan::Groups(plans)
        }
    };

    info!(
        "Planned '{}' ({:?}) for {} players",
        config.name,
        config.format,
        players.len()
    );
    Ok(plan)
}

/// Reject a final stage that could never be seeded, before any group match
/// is played.
fn check_knockout_stage(
    groups: &[Group],
    qualifiers_per_group: usize,
    seeds: usize,
) -> TournamentResult<()> {
    let qualifiers: usize = groups
        .iter()
        .map(|group| group.len().min(qualifiers_per_group))
        .sum();
    if qualifiers < 2 {
        return Err(SeedError::NotEnoughPlayers(qualifiers).into());
    }
    let valid = valid_seed_counts(qualifiers);
    if !valid.contains(&seeds) {
        return Err(SeedError::InvalidSeedCount {
            requested: seeds,
            valid,
        }
        .into());
    }
    Ok(())
}

/// Seed the knockout stage from finished groups.
///
/// The top `qualifiers_per_group` of each group by standings advance (all of
/// a group when it is smaller). Qualifiers keep their ratings from `players`,
/// so the `seeds` protected slots go to the strongest qualifiers; ids missing
/// from `players` enter unrated.
pub fn final_stage(
    groups: &[Group],
    results: &[MatchResult],
    qualifiers_per_group: usize,
    seeds: usize,
    players: &[Player],
    draw: &mut DrawRandomizer,
) -> TournamentResult<BracketState> {
    let ratings: HashMap<PlayerId, Player> = players.iter().map(|p| (p.id, *p)).collect();

    let qualifiers: Vec<Player> = groups
        .iter()
        .flat_map(|group| {
            compute_standings(group.members(), results)
                .into_iter()
                .take(qualifiers_per_group)
        })
        .map(|standing| {
            ratings
                .get(&standing.player)
                .copied()
                .unwrap_or_else(|| Player::unrated(standing.player))
        })
        .collect();

    debug!(
        "{} qualifiers from {} groups advance to the knockout",
        qualifiers.len(),
        groups.len()
    );
    Ok(seed_bracket(&qualifiers, seeds, draw)?)
}

impl Submission {
    /// Hand the edited bracket to the submission flow.
    ///
    /// Fails while a player is parked in holding or a drag is unfinished.
    pub fn from_editor(editor: &BracketEditor) -> TournamentResult<Self> {
        if let Some(parked) = editor.holding() {
            return Err(TournamentError::HoldingNotEmpty(parked));
        }
        if editor.dragging().is_some() {
            return Err(TournamentError::DragInProgress);
        }
        Ok(Self::new(editor.bracket().clone()))
    }
}
