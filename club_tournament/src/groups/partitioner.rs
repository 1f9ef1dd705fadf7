//! Group sizing and player distribution.

use log::debug;
use std::iter;

use super::{
    errors::{GroupError, GroupResult},
    models::{DistributionPolicy, Group},
};
use crate::{
    draw::DrawRandomizer,
    entities::{self, Player},
};

/// Smallest group size a club may ask for
pub const MIN_GROUP_SIZE: usize = 3;

/// Largest group size a club may ask for
pub const MAX_GROUP_SIZE: usize = 12;

/// Smallest group that still produces a match
pub const MIN_MEMBERS: usize = 2;

/// Compute how many players each group holds.
///
/// Uses `ceil(N/S)` groups. `shortfall = groups * S - N` of them hold `S - 1`
/// players and the rest hold `S`; the draw decides which groups are the short
/// ones. If `S >= N` the whole field is one group.
///
/// When the shortfall exceeds the group count (N=7, S=6 for instance) no
/// {S-1, S} split exists, so the field is split as evenly as possible over the
/// same number of groups.
///
/// # Arguments
///
/// * `total_players` - Field size
/// * `desired_size` - Target group size, 3..=12
/// * `draw` - Random source for placing the undersized groups
///
/// # Returns
///
/// * `GroupResult<Vec<usize>>` - One capacity per group, summing to `total_players`
pub fn compute_group_capacities(
    total_players: usize,
    desired_size: usize,
    draw: &mut DrawRandomizer,
) -> GroupResult<Vec<usize>> {
    if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&desired_size) {
        return Err(GroupError::InvalidGroupSize(desired_size));
    }
    if total_players < MIN_MEMBERS {
        return Err(GroupError::NotEnoughPlayers(total_players));
    }
    if desired_size >= total_players {
        return Ok(vec![total_players]);
    }

    let num_groups = total_players.div_ceil(desired_size);
    let shortfall = num_groups * desired_size - total_players;

    let mut capacities: Vec<usize> = if shortfall <= num_groups {
        iter::repeat_n(desired_size, num_groups - shortfall)
            .chain(iter::repeat_n(desired_size - 1, shortfall))
            .collect()
    } else {
        let base = total_players / num_groups;
        let extra = total_players % num_groups;
        debug!(
            "No {{{}, {desired_size}}} split for {total_players} players, using even split of {base}/{}",
            desired_size - 1,
            base + 1
        );
        iter::repeat_n(base + 1, extra)
            .chain(iter::repeat_n(base, num_groups - extra))
            .collect()
    };

    if let Some((group, &size)) = capacities
        .iter()
        .enumerate()
        .find(|&(_, &size)| size < MIN_MEMBERS)
    {
        return Err(GroupError::GroupTooSmall { group, size });
    }

    draw.shuffle(&mut capacities);
    Ok(capacities)
}

/// Deal players into groups of the given capacities.
///
/// Players are ranked strongest first (unrated last) before dealing, so the
/// result only depends on the field and the capacities.
pub fn distribute(
    players: &[Player],
    capacities: &[usize],
    policy: DistributionPolicy,
) -> GroupResult<Vec<Group>> {
    let capacity: usize = capacities.iter().sum();
    if capacity != players.len() {
        return Err(GroupError::CapacityMismatch {
            capacity,
            players: players.len(),
        });
    }
    if let Some((group, &size)) = capacities
        .iter()
        .enumerate()
        .find(|&(_, &size)| size < MIN_MEMBERS)
    {
        return Err(GroupError::GroupTooSmall { group, size });
    }
    if let Some(id) = entities::first_duplicate(players.iter().map(|p| p.id)) {
        return Err(GroupError::DuplicatePlayer(id));
    }

    let ranked = entities::ranked(players);
    let mut groups: Vec<Group> = capacities
        .iter()
        .map(|&cap| Group::with_capacity(cap))
        .collect();

    match policy {
        DistributionPolicy::RankBased => {
            let mut remaining = ranked.iter();
            for (group, &cap) in groups.iter_mut().zip(capacities) {
                for player in remaining.by_ref().take(cap) {
                    group.push(player.id);
                }
            }
        }
        DistributionPolicy::SnakeDraft => {
            let num_groups = groups.len();
            let cycle = 2 * num_groups;
            let mut cursor = 0;
            for player in &ranked {
                // Total capacity equals the field size, so a non-full group
                // is always reachable within one cycle.
                loop {
                    let pos = cursor % cycle;
                    let idx = if pos < num_groups { pos } else { cycle - 1 - pos };
                    cursor += 1;
                    if groups[idx].len() < capacities[idx] {
                        groups[idx].push(player.id);
                        break;
                    }
                }
            }
        }
    }

    Ok(groups)
}

/// Size the groups for `players` and deal them in with `policy`.
pub fn partition_field(
    players: &[Player],
    desired_size: usize,
    policy: DistributionPolicy,
    draw: &mut DrawRandomizer,
) -> GroupResult<Vec<Group>> {
    let capacities = compute_group_capacities(players.len(), desired_size, draw)?;
    let groups = distribute(players, &capacities, policy)?;
    debug!(
        "Partitioned {} players into {} groups ({policy}), capacities {capacities:?}",
        players.len(),
        groups.len()
    );
    Ok(groups)
}
