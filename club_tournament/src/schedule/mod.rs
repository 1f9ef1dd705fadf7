//! Schedule generator for leagues, groups and Swiss events.
//!
//! - [`generate_round_robin_schedule`]: every pair exactly once, circle method
//! - [`generate_fair_schedule`]: the pairs not played yet, keeping match
//!   counts even between players
//! - [`generate_swiss_round`]: one Swiss round from the results so far
//! - [`compute_standings`]: league table from reported results
//!
//! ## Example
//!
//! ```
//! use club_tournament::schedule::generate_round_robin_schedule;
//!
//! let schedule = generate_round_robin_schedule(&[1, 2, 3, 4, 5]).unwrap();
//! assert_eq!(schedule.rounds.len(), 5);
//! assert_eq!(schedule.pairing_count(), 10);
//! assert!(schedule.validate().is_ok());
//! ```

pub mod errors;
pub mod fair;
pub mod models;
pub mod round_robin;
pub mod standings;
pub mod swiss;

pub use errors::{ScheduleError, ScheduleResult};
pub use fair::generate_fair_schedule;
pub use models::{MatchOutcome, MatchResult, Pairing, Round, Schedule, played_pairs};
pub use round_robin::generate_round_robin_schedule;
pub use standings::{Standing, compute_standings};
pub use swiss::{SwissHistory, SwissRound, generate_swiss_round};
