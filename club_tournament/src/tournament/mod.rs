//! Tournament formats built from the structuring components.
//!
//! This module ties the partitioner, seeder and schedulers together:
//! - Format selection and configuration validation
//! - Opening structure for each format
//! - Knockout stage from finished groups
//! - The hand-off of an edited bracket to submission
//!
//! ## Example
//!
//! ```
//! use club_tournament::draw::DrawRandomizer;
//! use club_tournament::entities::Player;
//! use club_tournament::tournament::{TournamentConfig, TournamentPlan, plan_tournament};
//!
//! let players: Vec<Player> = (1..=12).map(|id| Player::rated(id, 1500)).collect();
//! let config = TournamentConfig::groups_then_knockout("Autumn Cup", 4);
//!
//! let plan = plan_tournament(&config, &players, &mut DrawRandomizer::from_seed(7)).unwrap();
//! let TournamentPlan::Groups(groups) = plan else { unreachable!() };
//! assert_eq!(groups.len(), 3);
//! ```

pub mod models;
pub mod planner;

pub use models::{
    GroupPlan, MAX_FIELD_SIZE, Submission, TournamentConfig, TournamentFormat, TournamentPlan,
};
pub use planner::{TournamentError, TournamentResult, final_stage, plan_tournament};
