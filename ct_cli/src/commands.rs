//! Command implementations. Each one reads its inputs, runs the engine and
//! returns the JSON document to print.

use std::{fs, path::Path};

use anyhow::{Context, Error};
use club_tournament::{
    bracket::{seed_bracket, valid_seed_counts},
    entities::{Player, PlayerId},
    groups::{DistributionPolicy, compute_group_capacities, partition_field},
    schedule::{
        MatchResult, SwissHistory, compute_standings, generate_fair_schedule,
        generate_round_robin_schedule, generate_swiss_round, played_pairs,
    },
    tournament::{TournamentConfig, plan_tournament},
};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::CliConfig;

/// Parse a JSON file into `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

/// Field file: `[{"id": 1, "rating": 1500}, {"id": 2}, ...]`
pub fn read_field(path: &Path) -> Result<Vec<Player>, Error> {
    let players: Vec<Player> = read_json(path)?;
    debug!("Loaded {} players from {}", players.len(), path.display());
    Ok(players)
}

fn ids(players: &[Player]) -> Vec<PlayerId> {
    players.iter().map(|p| p.id).collect()
}

pub fn capacities(players: usize, group_size: usize, config: &CliConfig) -> Result<Value, Error> {
    let mut draw = config.randomizer();
    let capacities = compute_group_capacities(players, group_size, &mut draw)?;
    Ok(json!(capacities))
}

pub fn groups(
    players: &[Player],
    group_size: usize,
    policy: DistributionPolicy,
    config: &CliConfig,
) -> Result<Value, Error> {
    let mut draw = config.randomizer();
    let groups = partition_field(players, group_size, policy, &mut draw)?;
    info!("Formed {} groups ({policy})", groups.len());
    Ok(serde_json::to_value(groups)?)
}

pub fn seed(players: &[Player], num_seeds: usize, config: &CliConfig) -> Result<Value, Error> {
    let mut draw = config.randomizer();
    let bracket = seed_bracket(players, num_seeds, &mut draw)?;
    info!(
        "Seeded {} players into {} slots with {num_seeds} seeds",
        players.len(),
        bracket.size()
    );
    Ok(serde_json::to_value(bracket)?)
}

pub fn seeds(players: usize) -> Value {
    json!(valid_seed_counts(players))
}

/// Full round robin, or only the open pairs when `played` results are given
pub fn round_robin(players: &[Player], played: Option<&[MatchResult]>) -> Result<Value, Error> {
    let ids = ids(players);
    let schedule = match played {
        Some(results) => generate_fair_schedule(&ids, &played_pairs(results))?,
        None => generate_round_robin_schedule(&ids)?,
    };
    Ok(serde_json::to_value(schedule)?)
}

pub fn swiss(players: &[Player], history: &SwissHistory, round: usize) -> Result<Value, Error> {
    let round = generate_swiss_round(players, history, round)?;
    Ok(serde_json::to_value(round)?)
}

pub fn standings(players: &[Player], results: &[MatchResult]) -> Result<Value, Error> {
    Ok(serde_json::to_value(compute_standings(&ids(players), results))?)
}

pub fn plan(
    tournament: &TournamentConfig,
    players: &[Player],
    config: &CliConfig,
) -> Result<Value, Error> {
    let mut draw = config.randomizer();
    let plan = plan_tournament(tournament, players, &mut draw)?;
    Ok(serde_json::to_value(plan)?)
}
