//! Per-group residue frequencies.
//!
//! Read access to a group's [`FrequencyTable`] plus construction of the
//! tables (and of the dataset-wide diversity positions) from raw groups of
//! aligned sequences.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::model::{
    CompareError, CompareResult, Dataset, FrequencyEntry, FrequencyTable, Group, Position, Residue, SequenceRecord,
};

/// Most frequent residue of `group` at `position`.
pub fn most_frequent(group: &Group, position: Position) -> CompareResult<&FrequencyEntry> {
    ranked(group, position)?
        .first()
        .ok_or_else(|| CompareError::EmptyFrequencies {
            group: group.name.clone(),
            position,
        })
}

/// All residues observed at `position`, most frequent first.
pub fn ranked(group: &Group, position: Position) -> CompareResult<&[FrequencyEntry]> {
    group
        .frequencies
        .get(position)
        .ok_or_else(|| CompareError::UntabulatedPosition {
            group: group.name.clone(),
            position,
        })
}

/// Number of distinct residues observed at `position`.
pub fn row_count(group: &Group, position: Position) -> CompareResult<usize> {
    ranked(group, position).map(<[FrequencyEntry]>::len)
}

/// Largest [`row_count`] over every tabulated position, 0 for an empty table.
pub fn max_row_count(group: &Group) -> usize {
    group
        .frequencies
        .iter()
        .map(|(_, entries)| entries.len())
        .max()
        .unwrap_or(0)
}

/// A named set of aligned sequences before any summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSource {
    pub name: String,
    pub members: Vec<SequenceRecord>,
}

impl GroupSource {
    pub fn new(name: impl Into<String>, members: Vec<SequenceRecord>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }
}

/// Residue counts for one position.
pub type Counter = BTreeMap<Residue, usize>;

/// Counts residues per 0-based column over all members.
pub fn count_residues(members: &[SequenceRecord]) -> Vec<Counter> {
    let width = members.iter().map(|m| m.seq.len()).max().unwrap_or(0);
    let mut counters = vec![Counter::new(); width];
    for member in members {
        for (counter, &residue) in counters.iter_mut().zip(member.seq.residues()) {
            *counter.entry(residue).or_insert(0) += 1;
        }
    }
    counters
}

/// Positions where the merged counters of all groups saw more than one residue.
pub fn diversity_positions<'a>(counters: impl IntoIterator<Item = &'a [Counter]>) -> Vec<Position> {
    let mut merged: Vec<Counter> = Vec::new();
    for group in counters {
        if merged.len() < group.len() {
            merged.resize(group.len(), Counter::new());
        }
        for (target, source) in merged.iter_mut().zip(group) {
            for (&residue, &count) in source {
                *target.entry(residue).or_insert(0) += count;
            }
        }
    }
    merged
        .iter()
        .enumerate()
        .filter(|(_, counter)| counter.len() > 1)
        .map(|(index, _)| Position::from_index0(index))
        .collect()
}

/// Ranks a counter: descending count, ties by residue.
pub fn rank(counter: &Counter) -> Vec<FrequencyEntry> {
    let mut entries: Vec<FrequencyEntry> = counter
        .iter()
        .map(|(&residue, &count)| FrequencyEntry::new(residue, count))
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Builds a dataset from raw groups.
///
/// Every group's table is keyed by exactly the diversity positions. Groups
/// without members cannot be tabulated and are dropped.
pub fn build_dataset(sources: Vec<GroupSource>) -> Dataset {
    let mut kept = Vec::with_capacity(sources.len());
    for source in sources {
        if source.members.is_empty() {
            warn!("group empty: {}", source.name);
        } else {
            let counters = count_residues(&source.members);
            kept.push((source, counters));
        }
    }

    let positions = diversity_positions(kept.iter().map(|(_, c)| c.as_slice()));
    debug!(
        "{} positions with diversity over {} groups",
        positions.len(),
        kept.len()
    );

    let groups = kept
        .into_iter()
        .map(|(source, counters)| {
            let table: FrequencyTable = positions
                .iter()
                .filter_map(|&p| {
                    let counter = counters.get(p.index0())?;
                    (!counter.is_empty()).then(|| (p, rank(counter)))
                })
                .collect();
            Group::new(source.name, source.members, table)
        })
        .collect();

    Dataset::new(positions, groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(p: usize) -> Position {
        Position::new(p).unwrap()
    }

    fn res(c: char) -> Residue {
        Residue::new(c).unwrap()
    }

    fn record(id: &str, seq: &str) -> SequenceRecord {
        SequenceRecord::new(id, seq).unwrap()
    }

    fn group_with_table() -> Group {
        let table = [
            (pos(1), vec![FrequencyEntry::new(res('A'), 3)]),
            (
                pos(2),
                vec![
                    FrequencyEntry::new(res('K'), 1),
                    FrequencyEntry::new(res('R'), 1),
                    FrequencyEntry::new(res('N'), 1),
                ],
            ),
        ]
        .into_iter()
        .collect();
        Group::new(
            "G",
            vec![record("a", "AK"), record("b", "AR"), record("c", "AN")],
            table,
        )
    }

    #[test]
    fn test_most_frequent() {
        let group = group_with_table();
        assert_eq!(most_frequent(&group, pos(1)).unwrap().residue, res('A'));
        assert_eq!(most_frequent(&group, pos(2)).unwrap().residue, res('K'));
        assert!(matches!(
            most_frequent(&group, pos(3)),
            Err(CompareError::UntabulatedPosition { .. })
        ));
    }

    #[test]
    fn test_row_counts() {
        let group = group_with_table();
        assert_eq!(row_count(&group, pos(1)).unwrap(), 1);
        assert_eq!(row_count(&group, pos(2)).unwrap(), 3);
        assert_eq!(max_row_count(&group), 3);

        let empty = Group::new("E", vec![], FrequencyTable::new());
        assert_eq!(max_row_count(&empty), 0);
    }

    #[test]
    fn test_count_residues_handles_ragged_members() {
        let counters = count_residues(&[record("a", "AC"), record("b", "ADE")]);
        assert_eq!(counters.len(), 3);
        assert_eq!(counters[0].get(&res('A')), Some(&2));
        assert_eq!(counters[1].len(), 2);
        assert_eq!(counters[2].get(&res('E')), Some(&1));
    }

    #[test]
    fn test_rank_orders_by_count_then_residue() {
        let counter: Counter = [(res('E'), 1), (res('D'), 1), (res('K'), 4)].into_iter().collect();
        let ranked = rank(&counter);
        let order: Vec<char> = ranked.iter().map(|e| e.residue.as_char()).collect();
        assert_eq!(order, vec!['K', 'D', 'E']);
    }

    #[test]
    fn test_diversity_is_computed_across_groups() {
        // Each group is uniform at position 2, but the groups disagree.
        let first = count_residues(&[record("a", "ACD"), record("b", "ACE")]);
        let second = count_residues(&[record("c", "AKD")]);
        let positions = diversity_positions([first.as_slice(), second.as_slice()]);
        assert_eq!(positions, vec![pos(2), pos(3)]);
    }

    #[test]
    fn test_build_dataset() {
        let dataset = build_dataset(vec![
            GroupSource::new("one", vec![record("a", "ACD"), record("b", "ACE")]),
            GroupSource::new("empty", vec![]),
            GroupSource::new("two", vec![record("c", "AKD")]),
        ]);
        assert_eq!(dataset.positions, vec![pos(2), pos(3)]);
        assert_eq!(dataset.groups.len(), 2);
        assert_eq!(dataset.groups[1].name, "two");

        let one = &dataset.groups[0];
        assert!(!one.frequencies.contains(pos(1)));
        assert_eq!(
            ranked(one, pos(3)).unwrap(),
            &[FrequencyEntry::new(res('D'), 1), FrequencyEntry::new(res('E'), 1)]
        );
        assert!(dataset.validate().is_ok());
    }
}
