//! Consensus ("master") resolution.
//!
//! The master of a group is its first member carrying the most frequent
//! residue at every tabulated position. Resolving moves it to the front of
//! the group so that it becomes `members[0]`.

use tracing::{debug, warn};

use crate::frequency::most_frequent;
use crate::model::{Group, SequenceRecord};

/// Outcome of [`rearrange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rearranged {
    /// The master was already the first member.
    AlreadyFirst,
    /// The master was found at `from` and moved to the front.
    MovedToFront { from: usize },
    /// No member matches every position; the first member stays master.
    NoExactMatch,
}

/// True when `member` has the most frequent residue at every tabulated position.
pub fn matches_consensus(group: &Group, member: &SequenceRecord) -> bool {
    group.frequencies.iter().all(|(position, _)| {
        most_frequent(group, position).is_ok_and(|entry| member.seq.at(position) == Some(entry.residue))
    })
}

/// Index of the first member matching the consensus, if any.
pub fn find_master(group: &Group) -> Option<usize> {
    group
        .members
        .iter()
        .position(|member| matches_consensus(group, member))
}

/// Moves the group's master to the front, keeping the others in order.
pub fn rearrange(group: &mut Group) -> Rearranged {
    match find_master(group) {
        Some(0) => Rearranged::AlreadyFirst,
        Some(index) => {
            let members = std::mem::take(&mut group.members);
            let (master, rest): (Vec<_>, Vec<_>) = members
                .into_iter()
                .enumerate()
                .partition(|(i, _)| *i == index);
            group.members = master.into_iter().chain(rest).map(|(_, m)| m).collect();
            debug!(
                "group {}: master {} moved from {} to the front",
                group.name, group.members[0].id, index
            );
            Rearranged::MovedToFront { from: index }
        }
        None => {
            warn!("group {}: master not found", group.name);
            Rearranged::NoExactMatch
        }
    }
}
