//! Diff of a sequence against the master sequence.
//!
//! A cell is a master match when the reference has the same residue at the
//! same 0-based index. A reference too short to cover the index never
//! matches, and an empty reference matches nothing.

use crate::model::{CompareError, CompareResult, Position, Residue, SequenceRecord};

/// One projected residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffCell {
    pub residue: Residue,
    pub is_master_match: bool,
    /// 0-based alignment index of the residue.
    pub pos0: usize,
}

/// Whether `residue` at `pos0` is identical to the reference.
pub fn is_master_match(residue: Residue, reference: &[Residue], pos0: usize) -> bool {
    reference.get(pos0) == Some(&residue)
}

/// Projects every residue of `sequence` against `reference`.
pub fn project(sequence: &[Residue], reference: &[Residue]) -> Vec<DiffCell> {
    sequence
        .iter()
        .enumerate()
        .map(|(pos0, &residue)| DiffCell {
            residue,
            is_master_match: is_master_match(residue, reference, pos0),
            pos0,
        })
        .collect()
}

/// Projects `record` at the given positions only, in list order.
///
/// Fails when the record does not reach one of the positions.
pub fn project_positions(
    record: &SequenceRecord,
    reference: &[Residue],
    positions: &[Position],
) -> CompareResult<Vec<DiffCell>> {
    positions
        .iter()
        .map(|&position| {
            let residue = record.seq.at(position).ok_or_else(|| CompareError::SequenceTooShort {
                id: record.id.clone(),
                position,
                length: record.seq.len(),
            })?;
            let pos0 = position.index0();
            Ok(DiffCell {
                residue,
                is_master_match: is_master_match(residue, reference, pos0),
                pos0,
            })
        })
        .collect()
}
