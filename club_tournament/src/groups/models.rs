//! Group data models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::PlayerId;

/// How ranked players are dealt into groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionPolicy {
    /// Fill group 1 with the strongest players, then group 2, and so on
    RankBased,
    /// Serpentine sweep 1..G, G..1 so every group gets a similar spread
    #[default]
    SnakeDraft,
}

impl fmt::Display for DistributionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionPolicy::RankBased => write!(f, "rank-based"),
            DistributionPolicy::SnakeDraft => write!(f, "snake draft"),
        }
    }
}

/// A preliminary group.
///
/// Serializes as the bare ordered id array, which is the shape the
/// persistence layer stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group {
    members: Vec<PlayerId>,
}

impl Group {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, id: PlayerId) {
        self.members.push(id);
    }

    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.members.contains(&id)
    }
}

impl From<Group> for Vec<PlayerId> {
    fn from(value: Group) -> Self {
        value.members
    }
}
