//! Input loaders.
//!
//! Two kinds of input are accepted:
//! - a JSON dataset (.json), already summarized: diversity positions, tables
//!   and members for every group
//! - one FASTA file per group (.fasta, .fa, .fas, ...), summarized on load
//!
//! Format detection priority:
//! 1. Explicit format specification (-f option)
//! 2. File extension of the first input

pub mod fasta;
pub mod json;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use crate::frequency::{build_dataset, GroupSource};
use crate::model::Dataset;

/// Input file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Fasta,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Json => write!(f, "JSON"),
            FileFormat::Fasta => write!(f, "FASTA"),
        }
    }
}

/// Errors that can occur while loading inputs.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("FASTA error in {path}: {source}")]
    Fasta {
        path: PathBuf,
        #[source]
        source: fasta::FastaError,
    },

    #[error("No input files")]
    NoInputs,

    #[error("A JSON dataset is a single input, got {0} files")]
    MultipleJsonInputs(usize),

    #[error("Could not determine format of {0}.\n\
             Hint: Use -f/--format to specify the format explicitly:\n  \
             seqcompare -f json <dataset>          # summarized JSON dataset\n  \
             seqcompare -f fasta <group>...        # one FASTA file per group")]
    UnknownFormat(PathBuf),
}

/// Result type for loading operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Detects format from file extension.
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FileFormat> {
    let ext = path.as_ref().extension().and_then(OsStr::to_str)?;
    match ext.to_lowercase().as_str() {
        "json" => Some(FileFormat::Json),
        "fa" | "fas" | "fasta" | "fna" | "faa" | "ffn" | "frn" => Some(FileFormat::Fasta),
        _ => None,
    }
}

/// One input argument: `path` or `NAME=path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInput {
    pub name: Option<String>,
    pub path: PathBuf,
}

impl GroupInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            name: None,
            path: path.into(),
        }
    }

    /// Group name: the explicit one, else the file stem.
    pub fn group_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .and_then(OsStr::to_str)
                .map(str::to_string)
                .unwrap_or_else(|| self.path.display().to_string())
        })
    }
}

impl FromStr for GroupInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(Self {
                name: Some(name.to_string()),
                path: PathBuf::from(path),
            }),
            Some(_) => Err(format!("expected NAME=path, got {:?}", s)),
            None if s.is_empty() => Err("empty input path".to_string()),
            None => Ok(Self::new(s)),
        }
    }
}

/// Loads the dataset from the given inputs.
///
/// A JSON input is taken as is. FASTA inputs are read one group per file, in
/// argument order, and summarized with [`build_dataset`].
pub fn load_dataset(inputs: &[GroupInput], forced_format: Option<FileFormat>) -> FormatResult<Dataset> {
    let first = inputs.first().ok_or(FormatError::NoInputs)?;
    let format = match forced_format {
        Some(format) => format,
        None => detect_format_from_extension(&first.path)
            .ok_or_else(|| FormatError::UnknownFormat(first.path.clone()))?,
    };
    debug!("loading {} input(s) as {}", inputs.len(), format);

    match format {
        FileFormat::Json => {
            if inputs.len() > 1 {
                return Err(FormatError::MultipleJsonInputs(inputs.len()));
            }
            let dataset = json::load_dataset_json(&first.path)?;
            info!(
                "loaded {} groups, {} positions from {}",
                dataset.groups.len(),
                dataset.positions.len(),
                first.path.display()
            );
            Ok(dataset)
        }
        FileFormat::Fasta => {
            let mut sources = Vec::with_capacity(inputs.len());
            for input in inputs {
                let members = fasta::parse_fasta_file(&input.path).map_err(|source| FormatError::Fasta {
                    path: input.path.clone(),
                    source,
                })?;
                debug!("group {}: {} sequences", input.group_name(), members.len());
                sources.push(GroupSource::new(input.group_name(), members));
            }
            let dataset = build_dataset(sources);
            info!(
                "built {} groups, {} positions with diversity",
                dataset.groups.len(),
                dataset.positions.len()
            );
            Ok(dataset)
        }
    }
}
