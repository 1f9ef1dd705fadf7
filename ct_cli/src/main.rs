//! Command-line driver for the club tournament engine.
//!
//! Reads fields, results and configurations as JSON files and prints the
//! resulting structures as JSON on stdout.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Error, bail};
use club_tournament::{
    groups::DistributionPolicy,
    schedule::{MatchResult, SwissHistory},
    tournament::TournamentConfig,
};
use log::{debug, warn};
use pico_args::Arguments;

use crate::config::CliConfig;

const HELP: &str = "\
Structure club racket-sport tournaments

USAGE:
  ct_cli <COMMAND> [OPTIONS]

COMMANDS:
  capacities   --players N [--group-size S]               Group sizes for a field of N
  groups       --field FILE [--group-size S] [--snake]    Split a field into groups
  seed         --field FILE [--seeds K]                   Seed a knockout bracket
  seeds        --players N                                Allowed seed counts for N players
  round-robin  --field FILE [--played FILE]               League schedule (open pairs only with --played)
  swiss        --field FILE [--history FILE] [--round R]  Pair one Swiss round
  standings    --field FILE --results FILE                League table
  plan         --field FILE --config FILE                 Opening structure of a tournament

OPTIONS:
  --rng-seed   U64         Make every draw reproducible  [default: env CT_RNG_SEED or OS entropy]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  CT_GROUP_SIZE            Default group size  [default: 4]
  CT_NUM_SEEDS             Default seed count  [default: 0]
  CT_RNG_SEED              Default RNG seed
  RUST_LOG                 Log level (e.g., debug)
  (A .env file in the working directory is honoured)
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::builder().format_target(false).init();

    let rng_seed: Option<u64> = pargs.opt_value_from_str("--rng-seed")?;
    let config = CliConfig::from_env(rng_seed)?;
    debug!("Loaded configuration: {config:?}");

    let Some(command) = pargs.subcommand()? else {
        print!("{HELP}");
        bail!("No command given");
    };

    let output = run(&command, &mut pargs, &config)?;

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("Ignoring unused arguments: {remaining:?}");
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(
    command: &str,
    pargs: &mut Arguments,
    config: &CliConfig,
) -> Result<serde_json::Value, Error> {
    match command {
        "capacities" => {
            let players: usize = pargs.value_from_str("--players")?;
            let group_size = pargs
                .opt_value_from_str("--group-size")?
                .unwrap_or(config.group_size);
            commands::capacities(players, group_size, config)
        }
        "groups" => {
            let field = commands::read_field(&pargs.value_from_str::<_, PathBuf>("--field")?)?;
            let group_size = pargs
                .opt_value_from_str("--group-size")?
                .unwrap_or(config.group_size);
            let policy = if pargs.contains("--snake") {
                DistributionPolicy::SnakeDraft
            } else {
                DistributionPolicy::RankBased
            };
            commands::groups(&field, group_size, policy, config)
        }
        "seed" => {
            let field = commands::read_field(&pargs.value_from_str::<_, PathBuf>("--field")?)?;
            let num_seeds = pargs
                .opt_value_from_str("--seeds")?
                .unwrap_or(config.num_seeds);
            commands::seed(&field, num_seeds, config)
        }
        "seeds" => {
            let players: usize = pargs.value_from_str("--players")?;
            Ok(commands::seeds(players))
        }
        "round-robin" => {
            let field = commands::read_field(&pargs.value_from_str::<_, PathBuf>("--field")?)?;
            let played: Option<PathBuf> = pargs.opt_value_from_str("--played")?;
            let results: Option<Vec<MatchResult>> = played
                .map(|path| commands::read_json(&path))
                .transpose()?;
            commands::round_robin(&field, results.as_deref())
        }
        "swiss" => {
            let field = commands::read_field(&pargs.value_from_str::<_, PathBuf>("--field")?)?;
            let history_path: Option<PathBuf> = pargs.opt_value_from_str("--history")?;
            let history: SwissHistory = match history_path {
                Some(path) => commands::read_json(&path)?,
                None => SwissHistory::default(),
            };
            let round: usize = pargs.opt_value_from_str("--round")?.unwrap_or(1);
            commands::swiss(&field, &history, round)
        }
        "standings" => {
            let field = commands::read_field(&pargs.value_from_str::<_, PathBuf>("--field")?)?;
            let results: Vec<MatchResult> =
                commands::read_json(&pargs.value_from_str::<_, PathBuf>("--results")?)?;
            commands::standings(&field, &results)
        }
        "plan" => {
            let field = commands::read_field(&pargs.value_from_str::<_, PathBuf>("--field")?)?;
            let tournament: TournamentConfig =
                commands::read_json(&pargs.value_from_str::<_, PathBuf>("--config")?)?;
            commands::plan(&tournament, &field, config)
        }
        other => bail!("Unknown command '{other}', see --help"),
    }
}
