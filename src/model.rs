//! Data model for the sequence comparison.
//!
//! This module contains all data structures for representing:
//! - Residues, 1-based alignment positions and aligned sequences
//! - Groups with their per-position frequency tables
//! - The dataset handed over by the loaders
//! - Viewer state (viewport, mode) for the terminal front-end
//!
//! Sequences are 0-indexed while frequency tables and diversity positions
//! are keyed by 1-based [`Position`]s. The only conversion between the two is
//! [`Position::index0`] / [`Position::from_index0`].

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glyphs::Glyphs;
use crate::text::{layout, Grid};
use crate::views::{Rendered, ViewKind};

/// Errors raised when a dataset violates a rendering precondition.
///
/// Any of these aborts the whole render: no view is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Dataset has no groups")]
    NoGroups,

    #[error("Group {group:?} has no sequences")]
    EmptyGroup { group: String },

    #[error("Position {position} is not tabulated for group {group:?}")]
    UntabulatedPosition { group: String, position: Position },

    #[error("Group {group:?} has no frequency entries at position {position}")]
    EmptyFrequencies { group: String, position: Position },

    #[error("Group {group:?} has a zero count at position {position}")]
    ZeroCount { group: String, position: Position },

    #[error("Frequencies of group {group:?} at position {position} are not sorted by descending count")]
    UnsortedFrequencies { group: String, position: Position },

    #[error("Frequencies of group {group:?} at position {position} add up to {total}, group has {members} sequences")]
    OverCounted {
        group: String,
        position: Position,
        total: usize,
        members: usize,
    },

    #[error("Sequence {id} is {length} long, position {position} is out of range")]
    SequenceTooShort {
        id: SeqId,
        position: Position,
        length: usize,
    },
}

/// Result type for comparison operations.
pub type CompareResult<T> = Result<T, CompareError>;

/// Errors for malformed scalar values (residues, positions).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Invalid residue {0:?}: expected a single printable ASCII character")]
    Residue(String),

    #[error("Invalid position {0}: positions are 1-based")]
    Position(usize),
}

/// A single amino-acid (or gap) symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Residue(u8);

impl Residue {
    /// Creates a residue from a printable ASCII character.
    pub fn new(c: char) -> Option<Self> {
        if c.is_ascii_graphic() {
            Some(Self(c as u8))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Residue {
    type Error = ValueError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Residue::new(c).ok_or_else(|| ValueError::Residue(c.to_string()))
    }
}

impl TryFrom<String> for Residue {
    type Error = ValueError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Residue::try_from(c).map_err(|_| ValueError::Residue(s)),
            _ => Err(ValueError::Residue(s)),
        }
    }
}

impl From<Residue> for String {
    fn from(r: Residue) -> Self {
        r.as_char().to_string()
    }
}

/// A 1-based alignment position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Position(usize);

impl Position {
    /// Creates a position, rejecting 0.
    pub fn new(pos1: usize) -> Option<Self> {
        (pos1 > 0).then_some(Self(pos1))
    }

    /// Position of the sequence element at 0-based `index`.
    pub fn from_index0(index: usize) -> Self {
        Self(index + 1)
    }

    /// The 1-based value.
    pub fn get(self) -> usize {
        self.0
    }

    /// The 0-based sequence index of this position.
    pub fn index0(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for Position {
    type Error = ValueError;

    fn try_from(pos1: usize) -> Result<Self, Self::Error> {
        Position::new(pos1).ok_or(ValueError::Position(pos1))
    }
}

impl From<Position> for usize {
    fn from(p: Position) -> Self {
        p.0
    }
}

/// An aligned sequence of residues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sequence(Vec<Residue>);

impl Sequence {
    pub fn new(residues: Vec<Residue>) -> Self {
        Self(residues)
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Residue at a 1-based position, `None` past the end.
    pub fn at(&self, position: Position) -> Option<Residue> {
        self.0.get(position.index0()).copied()
    }

    pub fn residues(&self) -> &[Residue] {
        &self.0
    }
}

impl FromStr for Sequence {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(Residue::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Sequence)
    }
}

impl TryFrom<String> for Sequence {
    type Error = ValueError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Sequence> for String {
    fn from(seq: Sequence) -> Self {
        seq.to_string()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.0 {
            write!(f, "{}", r)?;
        }
        Ok(())
    }
}

/// Sequence identifier. Records are matched across groups by this value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeqId(String);

impl SeqId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A group member: identifier plus aligned sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: SeqId,
    pub seq: Sequence,
}

impl SequenceRecord {
    /// Creates a record, parsing the residues from `seq`.
    pub fn new(id: impl Into<String>, seq: &str) -> Result<Self, ValueError> {
        Ok(Self {
            id: SeqId::new(id),
            seq: seq.parse()?,
        })
    }
}

/// One ranked residue at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    #[serde(rename = "a")]
    pub residue: Residue,
    #[serde(rename = "c")]
    pub count: usize,
}

impl FrequencyEntry {
    pub fn new(residue: Residue, count: usize) -> Self {
        Self { residue, count }
    }
}

/// Position -> residues observed there, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable(BTreeMap<Position, Vec<FrequencyEntry>>);

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: Position, entries: Vec<FrequencyEntry>) {
        self.0.insert(position, entries);
    }

    pub fn get(&self, position: Position) -> Option<&[FrequencyEntry]> {
        self.0.get(&position).map(Vec::as_slice)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.0.contains_key(&position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &[FrequencyEntry])> {
        self.0.iter().map(|(p, e)| (*p, e.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Position, Vec<FrequencyEntry>)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Position, Vec<FrequencyEntry>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A named category of sequences.
///
/// Member order is display order. The consensus resolver may move one member
/// to the front, nothing else reorders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(rename = "pos1", default)]
    pub frequencies: FrequencyTable,
    #[serde(rename = "seq", default)]
    pub members: Vec<SequenceRecord>,
}

impl Group {
    pub fn new(name: impl Into<String>, members: Vec<SequenceRecord>, frequencies: FrequencyTable) -> Self {
        Self {
            name: name.into(),
            frequencies,
            members,
        }
    }

    fn validate_frequencies(&self) -> CompareResult<()> {
        for (position, entries) in self.frequencies.iter() {
            let group = || self.name.clone();
            if entries.is_empty() {
                return Err(CompareError::EmptyFrequencies { group: group(), position });
            }
            if entries.iter().any(|e| e.count == 0) {
                return Err(CompareError::ZeroCount { group: group(), position });
            }
            if entries.windows(2).any(|w| w[0].count < w[1].count) {
                return Err(CompareError::UnsortedFrequencies { group: group(), position });
            }
            let total: usize = entries.iter().map(|e| e.count).sum();
            if total > self.members.len() {
                return Err(CompareError::OverCounted {
                    group: group(),
                    position,
                    total,
                    members: self.members.len(),
                });
            }
        }
        Ok(())
    }
}

/// Everything the views are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Positions with diversity, in supplied order.
    #[serde(rename = "pos1", default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Dataset {
    pub fn new(positions: Vec<Position>, groups: Vec<Group>) -> Self {
        Self { positions, groups }
    }

    /// The dataset-wide reference: first member of the first group.
    pub fn master(&self) -> CompareResult<&SequenceRecord> {
        let first = self.groups.first().ok_or(CompareError::NoGroups)?;
        first.members.first().ok_or_else(|| CompareError::EmptyGroup {
            group: first.name.clone(),
        })
    }

    /// Length of the longest member sequence.
    pub fn longest_sequence(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.members.iter())
            .map(|m| m.seq.len())
            .max()
            .unwrap_or(0)
    }

    /// Checks every precondition the views rely on.
    ///
    /// Each diversity position must be tabulated by every group and covered
    /// by every member sequence.
    pub fn validate(&self) -> CompareResult<()> {
        self.master()?;
        for group in &self.groups {
            group.validate_frequencies()?;
            for &position in &self.positions {
                if !group.frequencies.contains(position) {
                    return Err(CompareError::UntabulatedPosition {
                        group: group.name.clone(),
                        position,
                    });
                }
                if let Some(short) = group.members.iter().find(|m| m.seq.at(position).is_none()) {
                    return Err(CompareError::SequenceTooShort {
                        id: short.id.clone(),
                        position,
                        length: short.seq.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The viewport defines what portion of the current view is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first visible row
    pub first_row: usize,
    /// Index of the first visible character column
    pub first_col: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Number of visible character columns
    pub visible_cols: usize,
}

impl Viewport {
    /// Creates a new viewport.
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            first_row: 0,
            first_col: 0,
            visible_rows,
            visible_cols,
        }
    }

    /// Updates the viewport dimensions.
    pub fn resize(&mut self, visible_rows: usize, visible_cols: usize) {
        self.visible_rows = visible_rows;
        self.visible_cols = visible_cols;
    }

    /// Returns the range of visible rows.
    pub fn row_range(&self) -> Range<usize> {
        self.first_row..self.first_row + self.visible_rows
    }

    /// Returns the range of visible columns.
    pub fn col_range(&self) -> Range<usize> {
        self.first_col..self.first_col + self.visible_cols
    }
}

/// Input mode of the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Command input mode (after pressing ':')
    Command(String),
}

/// The complete viewer state.
#[derive(Debug)]
pub struct ViewerState {
    /// The rendered views
    pub rendered: Rendered,
    /// Precomputed layout, one per view
    pub grids: Vec<Grid>,
    pub glyphs: Glyphs,
    /// Index of the view on screen
    pub current: usize,
    /// Current viewport
    pub viewport: Viewport,
    /// Current application mode
    pub mode: AppMode,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
}

impl ViewerState {
    /// Creates the viewer state, laying out every view once.
    pub fn new(rendered: Rendered, glyphs: Glyphs, status_message: Option<String>) -> Self {
        let grids = rendered.views.iter().map(layout).collect();
        Self {
            rendered,
            grids,
            glyphs,
            current: 0,
            viewport: Viewport::new(0, 0),
            mode: AppMode::Normal,
            should_quit: false,
            status_message,
        }
    }

    pub fn current_kind(&self) -> Option<ViewKind> {
        self.rendered.views.get(self.current).map(|v| v.kind)
    }

    pub fn current_grid(&self) -> Option<&Grid> {
        self.grids.get(self.current)
    }

    fn content_rows(&self) -> usize {
        self.current_grid().map_or(0, |g| g.rows.len())
    }

    fn content_width(&self) -> usize {
        self.current_grid().map_or(0, Grid::width)
    }

    /// Updates the viewport size based on terminal dimensions.
    pub fn update_viewport_size(&mut self, rows: usize, cols: usize) {
        self.viewport.resize(rows, cols);
        self.clamp_viewport();
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.viewport.first_row = self.viewport.first_row.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.viewport.first_row += n;
        self.clamp_viewport();
    }

    pub fn scroll_left(&mut self, n: usize) {
        self.viewport.first_col = self.viewport.first_col.saturating_sub(n);
    }

    pub fn scroll_right(&mut self, n: usize) {
        self.viewport.first_col += n;
        self.clamp_viewport();
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport.visible_rows.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport.visible_rows.max(1));
    }

    pub fn goto_first_column(&mut self) {
        self.viewport.first_col = 0;
    }

    pub fn goto_last_column(&mut self) {
        self.viewport.first_col = self.content_width();
        self.clamp_viewport();
    }

    /// Switches to the next view, wrapping around.
    pub fn next_view(&mut self) {
        let n = self.rendered.views.len();
        if n > 0 {
            self.select_view((self.current + 1) % n);
        }
    }

    /// Switches to the previous view, wrapping around.
    pub fn previous_view(&mut self) {
        let n = self.rendered.views.len();
        if n > 0 {
            self.select_view((self.current + n - 1) % n);
        }
    }

    fn select_view(&mut self, index: usize) {
        self.current = index;
        self.viewport.first_row = 0;
        self.viewport.first_col = 0;
        self.status_message = None;
    }

    /// Clamps the viewport to the bounds of the current view.
    fn clamp_viewport(&mut self) {
        let rows = self.content_rows();
        let width = self.content_width();
        if self.viewport.first_row + self.viewport.visible_rows > rows {
            self.viewport.first_row = rows.saturating_sub(self.viewport.visible_rows);
        }
        if self.viewport.first_col + self.viewport.visible_cols > width {
            self.viewport.first_col = width.saturating_sub(self.viewport.visible_cols);
        }
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.pop();
            if cmd.is_empty() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Executes the current command.
    ///
    /// `:q` quits, `:<n>` selects view `n` (1-based).
    pub fn execute_command(&mut self) {
        if let AppMode::Command(ref cmd) = self.mode.clone() {
            match cmd.as_str() {
                "q" | "quit" => self.should_quit = true,
                _ => match cmd.parse::<usize>() {
                    Ok(n) if n > 0 && n <= self.rendered.views.len() => self.select_view(n - 1),
                    Ok(n) => self.status_message = Some(format!("Invalid view: {}", n)),
                    Err(_) => self.status_message = Some(format!("Unknown command: {}", cmd)),
                },
            }
        }
        self.mode = AppMode::Normal;
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }
}
