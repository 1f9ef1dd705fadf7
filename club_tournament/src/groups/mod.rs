//! Group partitioner for preliminary-group formats.
//!
//! Splits a field into `ceil(N/S)` groups whose sizes differ by at most one,
//! then deals ranked players into them either rank-based (strongest players
//! together) or by snake draft (strength spread evenly).
//!
//! ## Example
//!
//! ```
//! use club_tournament::draw::DrawRandomizer;
//! use club_tournament::entities::Player;
//! use club_tournament::groups::{DistributionPolicy, partition_field};
//!
//! let players: Vec<Player> = (1..=20).map(|id| Player::rated(id, 1000 + id as i32)).collect();
//! let mut draw = DrawRandomizer::from_seed(1);
//!
//! let groups = partition_field(&players, 6, DistributionPolicy::SnakeDraft, &mut draw).unwrap();
//! assert_eq!(groups.len(), 4);
//! assert!(groups.iter().all(|g| g.len() == 5));
//! ```

pub mod errors;
pub mod models;
pub mod partitioner;

pub use errors::{GroupError, GroupResult};
pub use models::{DistributionPolicy, Group};
pub use partitioner::{
    MAX_GROUP_SIZE, MIN_GROUP_SIZE, compute_group_capacities, distribute, partition_field,
};
