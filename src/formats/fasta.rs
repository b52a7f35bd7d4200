//! FASTA parser for group members.
//!
//! Each FASTA file holds the aligned sequences of one group. It supports
//! both single-line and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! MKAILVVLLYTFATANA...
//! >another_sequence
//! MKAILVVLLYTFTTANA...
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::model::{Residue, SeqId, Sequence, SequenceRecord};

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("Invalid residue {residue:?} at line {line}")]
    InvalidResidue { line: usize, residue: char },
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses a FASTA file into group members.
///
/// # Examples
///
/// ```no_run
/// use seqcompare::formats::fasta::parse_fasta_file;
///
/// let members = parse_fasta_file("clade-3c.fasta").unwrap();
/// println!("Loaded {} sequences", members.len());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<Vec<SequenceRecord>> {
    let file = File::open(&path)?;
    let file_size = file.metadata()?.len() as usize;
    let mut reader = BufReader::new(file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;
    parse_fasta_str(&content)
}

/// Parses FASTA content from a string.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    let mut current_id: Option<&str> = None;
    let mut current_seq: Vec<Residue> = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                push_record(&mut records, id, std::mem::take(&mut current_seq));
            }

            // ID is everything before the first space
            let id = header.split_whitespace().next().unwrap_or(header);
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }
            current_id = Some(id);
        } else {
            if current_id.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }
            for c in line.chars().filter(|c| !c.is_whitespace()) {
                let residue = Residue::new(c).ok_or(FastaError::InvalidResidue {
                    line: line_number,
                    residue: c,
                })?;
                current_seq.push(residue);
            }
        }
    }

    if let Some(id) = current_id {
        push_record(&mut records, id, current_seq);
    }

    if records.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    let first_len = records[0].seq.len();
    if records.iter().any(|r| r.seq.len() != first_len) {
        let min_len = records.iter().map(|r| r.seq.len()).min().unwrap_or(0);
        let max_len = records.iter().map(|r| r.seq.len()).max().unwrap_or(0);
        warn!(
            "sequences have different lengths (min: {}, max: {}), not a padded alignment",
            min_len, max_len
        );
    }

    Ok(records)
}

fn push_record(records: &mut Vec<SequenceRecord>, id: &str, residues: Vec<Residue>) {
    if !residues.is_empty() {
        records.push(SequenceRecord {
            id: SeqId::new(id),
            seq: Sequence::new(residues),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_fasta() {
        let content = ">seq1\nACDE\n>seq2\nKLMN\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_str(), "seq1");
        assert_eq!(records[0].seq.to_string(), "ACDE");
        assert_eq!(records[1].id.as_str(), "seq2");
        assert_eq!(records[1].seq.to_string(), "KLMN");
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let content = ">seq1\nACDE\nKLMN\nAAAA\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq.to_string(), "ACDEKLMNAAAA");
    }

    #[test]
    fn test_parse_with_description() {
        let content = ">A/SWITZERLAND/9715293/2013 egg\nACDE\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records[0].id.as_str(), "A/SWITZERLAND/9715293/2013");
    }

    #[test]
    fn test_parse_with_empty_lines_and_gaps() {
        let content = ">seq1\nAC-E\n\n>seq2\n\nKL MN\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].seq.to_string(), "AC-E");
        assert_eq!(records[1].seq.to_string(), "KLMN");
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_fasta_str(""), Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_sequence_without_header() {
        let result = parse_fasta_str("ACDE\n>seq1\nKLMN\n");
        assert!(matches!(result, Err(FastaError::SequenceWithoutHeader(1))));
    }

    #[test]
    fn test_empty_identifier() {
        let result = parse_fasta_str(">\nACDE\n");
        assert!(matches!(result, Err(FastaError::InvalidFormat(_))));
    }

    #[test]
    fn test_invalid_residue() {
        let result = parse_fasta_str(">seq1\nAC\u{e9}E\n");
        assert!(matches!(
            result,
            Err(FastaError::InvalidResidue { line: 2, residue: '\u{e9}' })
        ));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("group.fasta");
        std::fs::write(&path, ">a\nACD\n>b\nACE\n").unwrap();
        let records = parse_fasta_file(&path).unwrap();
        assert_eq!(records.len(), 2);
    }
}
