//! Single-elimination brackets and the bracket seeder.
//!
//! A bracket is a flat array of slots whose length is the next power of two
//! at or above the field size. Slots pair up into first-round matches; empty
//! slots are BYEs and a match never holds two of them.
//!
//! ## Example
//!
//! ```
//! use club_tournament::bracket::{seed_bracket, valid_seed_counts};
//! use club_tournament::draw::DrawRandomizer;
//! use club_tournament::entities::Player;
//!
//! let players: Vec<Player> = (1..=5).map(|id| Player::rated(id, 1500)).collect();
//! assert_eq!(valid_seed_counts(players.len()), vec![0, 2]);
//!
//! let bracket = seed_bracket(&players, 0, &mut DrawRandomizer::from_seed(1)).unwrap();
//! assert_eq!(bracket.size(), 8);
//! assert_eq!(bracket.bye_count(), 3);
//! ```

pub mod errors;
pub mod models;
pub mod seeder;

pub use errors::{InvariantViolation, SeedError, SeedResult};
pub use models::{BracketState, FirstRoundMatch, Location, Slot, SlotIndex};
pub use seeder::{
    bracket_size, max_seeds, seed_bracket, seed_positions, valid_seed_counts,
};
