//! # Club Tournament
//!
//! Tournament structuring engine for club racket-sport events.
//!
//! The crate turns an unordered field of players into a valid structure and
//! keeps that structure consistent while an organizer edits it by hand. It
//! holds no persistence, networking or UI of its own: callers hand in players
//! and results and get plain serializable values back.
//!
//! ## Components
//!
//! - [`groups`]: split a field into balanced preliminary groups
//! - [`bracket`]: single-elimination brackets with BYEs and standard seeding
//! - [`editor`]: drag-and-drop bracket editing as a type-safe finite state
//!   machine (`enum_dispatch` over its phases)
//! - [`schedule`]: round robin, fair incremental pairing, Swiss rounds and
//!   standings
//! - [`tournament`]: formats that combine the above
//!
//! Every randomized step draws from a [`DrawRandomizer`], which can be seeded
//! to replay a draw exactly.
//!
//! ## Example
//!
//! ```
//! use club_tournament::{BracketEditor, DrawRandomizer, Gesture, Player, seed_bracket};
//! use club_tournament::bracket::Location;
//!
//! let players: Vec<Player> = (1..=6).map(|id| Player::rated(id, 2000 - id as i32)).collect();
//! let bracket = seed_bracket(&players, 2, &mut DrawRandomizer::from_seed(42)).unwrap();
//!
//! let mut editor = BracketEditor::new(bracket);
//! editor.handle(Gesture::PickUp(Location::Slot(0)));
//! editor.handle(Gesture::Release);
//! assert!(editor.is_finalizable());
//! ```

/// Bracket model and seeder.
pub mod bracket;
pub use bracket::{BracketState, Location, SeedError, seed_bracket, valid_seed_counts};

/// Seedable randomness for draws.
pub mod draw;
pub use draw::DrawRandomizer;

/// Drag-and-drop bracket editor.
pub mod editor;
pub use editor::{BracketEditor, Gesture, GestureOutcome, Rejection};

pub mod entities;
pub use entities::{PairKey, Player, PlayerId, Rating};

/// Preliminary group partitioner.
pub mod groups;
pub use groups::{DistributionPolicy, Group, GroupError, compute_group_capacities};

/// League, group and Swiss scheduling.
pub mod schedule;
pub use schedule::{
    MatchResult, Schedule, ScheduleError, generate_fair_schedule, generate_round_robin_schedule,
    generate_swiss_round,
};

/// Tournament formats.
pub mod tournament;
pub use tournament::{TournamentConfig, TournamentError, TournamentFormat, plan_tournament};
