//! JSON dataset files.
//!
//! ```text
//! {
//!   "pos1": [145, 156],
//!   "groups": [
//!     { "name": "3C.2a",
//!       "pos1": { "145": [{"a": "S", "c": 3}], "156": [{"a": "H", "c": 2}, {"a": "K", "c": 1}] },
//!       "seq": [{"id": "A/HONG KONG/4801/2014", "seq": "QKIPGND..."}] }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::model::Dataset;

use super::FormatResult;

/// Parses a dataset from JSON text.
pub fn parse_dataset_str(content: &str) -> FormatResult<Dataset> {
    let dataset = serde_json::from_str(content)?;
    warn_empty_groups(&dataset);
    Ok(dataset)
}

/// Loads a dataset from a JSON file.
pub fn load_dataset_json<P: AsRef<Path>>(path: P) -> FormatResult<Dataset> {
    let reader = BufReader::new(File::open(path)?);
    let dataset = serde_json::from_reader(reader)?;
    warn_empty_groups(&dataset);
    Ok(dataset)
}

/// Warns about groups without members, as the FASTA loader does when it
/// drops them. Returns how many there are.
fn warn_empty_groups(dataset: &Dataset) -> usize {
    let mut empty = 0;
    for group in dataset.groups.iter().filter(|g| g.members.is_empty()) {
        warn!("group empty: {}", group.name);
        empty += 1;
    }
    empty
}

pub fn to_json_string(dataset: &Dataset) -> FormatResult<String> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

/// Writes `dataset` as pretty-printed JSON.
pub fn save_dataset_json<P: AsRef<Path>>(path: P, dataset: &Dataset) -> FormatResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, dataset)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
