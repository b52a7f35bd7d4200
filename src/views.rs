//! View builders.
//!
//! Each builder turns a resolved [`Dataset`] into a [`View`]: rows of cells
//! carrying display text and symbolic tags. Nothing here knows about colors
//! or widgets, the renderers map tags to styles.
//!
//! Every view starts with a ruler and then emits one block of rows per group,
//! in dataset order. The full-sequences and positions-with-diversity views
//! repeat the ruler at the bottom.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::consensus::{self, Rearranged};
use crate::diff::{self, DiffCell};
use crate::frequency::{max_row_count, most_frequent, ranked};
use crate::glyphs::Glyphs;
use crate::model::{CompareResult, Dataset, Group, Position, Residue, SequenceRecord};
use crate::ruler::{self, Boundary, Ruler, TickConvention};

/// Symbolic styling hint attached to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    TickBoundary,
    MidBoundary,
    /// Residue identical to the master, shown as a placeholder.
    DiffMatch,
    GroupName,
    SeqId,
    Residue,
    /// Residue with its count (frequency view).
    ResidueCount,
    Ruler,
    GroupSpace,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::TickBoundary => "tick-boundary",
            Tag::MidBoundary => "mid-boundary",
            Tag::DiffMatch => "diff-match",
            Tag::GroupName => "group-name",
            Tag::SeqId => "seq-id",
            Tag::Residue => "aa",
            Tag::ResidueCount => "aa-and-count",
            Tag::Ruler => "ruler",
            Tag::GroupSpace => "group-space",
        }
    }

    fn for_boundary(boundary: Boundary) -> Option<Tag> {
        match boundary {
            Boundary::Tick => Some(Tag::TickBoundary),
            Boundary::Mid => Some(Tag::MidBoundary),
            Boundary::None => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tags: BTreeSet<Tag>,
    /// Columns covered.
    pub span: usize,
    /// Rows covered, counting this one.
    pub row_span: usize,
    /// Residue behind the cell, also when `text` is a placeholder.
    pub residue: Option<Residue>,
    pub count: Option<usize>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: BTreeSet::new(),
            span: 1,
            row_span: 1,
            residue: None,
            count: None,
        }
    }

    pub fn blank(span: usize) -> Self {
        Self::new("").with_span(span)
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    fn with_optional_tag(mut self, tag: Option<Tag>) -> Self {
        self.tags.extend(tag);
        self
    }

    pub fn with_span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    pub fn with_row_span(mut self, row_span: usize) -> Self {
        self.row_span = row_span;
        self
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Text as shown on screen, count appended for frequency cells.
    pub fn rendered(&self) -> String {
        match self.count {
            Some(count) => format!("{}{}", self.text, count),
            None => self.text.clone(),
        }
    }

    fn for_residue(diff: &DiffCell, boundary: Boundary, glyphs: &Glyphs) -> Self {
        let text = if diff.is_master_match {
            glyphs.master_match.to_string()
        } else {
            diff.residue.to_string()
        };
        let mut cell = Cell::new(text)
            .with_tag(Tag::Residue)
            .with_optional_tag(Tag::for_boundary(boundary));
        if diff.is_master_match {
            cell.tags.insert(Tag::DiffMatch);
        }
        cell.residue = Some(diff.residue);
        cell
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Ruler,
    /// One group member (full sequences, positions with diversity).
    Member,
    /// Group summary (most frequent, frequency).
    Summary,
    /// Blank separator before a group.
    GroupSpace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

impl Row {
    fn new(kind: RowKind) -> Self {
        Self { kind, cells: Vec::new() }
    }

    fn spacer(span: usize) -> Self {
        Self {
            kind: RowKind::GroupSpace,
            cells: vec![Cell::blank(span).with_tag(Tag::GroupSpace)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    MostFrequentPerGroup,
    FrequencyPerGroup,
    PositionsWithDiversity,
    FullSequences,
}

impl ViewKind {
    /// Build order of [`render`].
    pub const ALL: [ViewKind; 4] = [
        ViewKind::MostFrequentPerGroup,
        ViewKind::FrequencyPerGroup,
        ViewKind::PositionsWithDiversity,
        ViewKind::FullSequences,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::MostFrequentPerGroup => "Most frequent per group",
            ViewKind::FrequencyPerGroup => "Frequency per group",
            ViewKind::PositionsWithDiversity => "Positions with diversity",
            ViewKind::FullSequences => "Full sequences",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub kind: ViewKind,
    /// Identifier columns before the residue columns.
    pub leading_columns: usize,
    pub rows: Vec<Row>,
}

impl View {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    fn new(kind: ViewKind, leading_columns: usize) -> Self {
        Self {
            kind,
            leading_columns,
            rows: Vec::new(),
        }
    }
}

/// All four views plus the dataset in its resolved order.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub dataset: Dataset,
    pub consensus: Rearranged,
    pub views: Vec<View>,
}

impl Rendered {
    pub fn view(&self, kind: ViewKind) -> Option<&View> {
        self.views.iter().find(|v| v.kind == kind)
    }
}

/// Validates the dataset, resolves the master of the first group and builds
/// every view.
///
/// Any precondition failure aborts before a single view is produced.
pub fn render(mut dataset: Dataset, config: &RenderConfig) -> CompareResult<Rendered> {
    dataset.validate()?;

    let longest = dataset.longest_sequence();
    if longest > config.max_position {
        warn!(
            "ruler covers {} positions, longest sequence has {}",
            config.max_position, longest
        );
    }

    let consensus = consensus::rearrange(&mut dataset.groups[0]);
    let master = dataset.master()?;
    info!(
        "{} groups, {} positions with diversity, master {}",
        dataset.groups.len(),
        dataset.positions.len(),
        master.id
    );

    let views = vec![
        most_frequent_per_group(&dataset, config)?,
        frequency_per_group(&dataset, config)?,
        positions_with_diversity(&dataset, master, config)?,
        full_sequences(&dataset, master, config)?,
    ];
    for view in &views {
        debug!("{}: {} rows", view.title(), view.rows.len());
    }

    Ok(Rendered {
        dataset,
        consensus,
        views,
    })
}

fn ruler_row(ruler: &Ruler, config: &RenderConfig) -> Row {
    let glyphs = config.glyphs();
    let mut row = Row::new(RowKind::Ruler);
    if ruler.initial_columns > 0 {
        row.cells.push(Cell::blank(ruler.initial_columns).with_tag(Tag::Ruler));
    }
    for column in &ruler.columns {
        let text = match &column.label {
            Some(label) => label.clone(),
            None if config.ruler_filler => glyphs.ruler_filler.to_string(),
            None => String::new(),
        };
        let mut cell = Cell::new(text).with_span(column.span).with_tag(Tag::Ruler);
        if column.is_tick_boundary {
            cell.tags.insert(Tag::TickBoundary);
        }
        if column.is_mid_boundary {
            cell.tags.insert(Tag::MidBoundary);
        }
        row.cells.push(cell);
    }
    row
}

/// Leading cells of a member row: group name on the first member only.
fn member_row(group: &Group, index: usize, record: &SequenceRecord) -> Row {
    let mut row = Row::new(RowKind::Member);
    if index == 0 {
        row.cells.push(
            Cell::new(group.name.clone())
                .with_tag(Tag::GroupName)
                .with_row_span(group.members.len()),
        );
    }
    row.cells.push(Cell::new(record.id.to_string()).with_tag(Tag::SeqId));
    row
}

/// Rows of every group member, each diffed against `master`.
///
/// The master itself (matched by id) is shown in full. A spacer precedes
/// every group whose first member is not the master.
fn member_rows<F, C>(
    view: &mut View,
    dataset: &Dataset,
    master: &SequenceRecord,
    spacer_width: F,
    mut cells: C,
) -> CompareResult<()>
where
    F: Fn(&SequenceRecord) -> usize,
    C: FnMut(&SequenceRecord, &[Residue]) -> CompareResult<Vec<Cell>>,
{
    for group in &dataset.groups {
        for (index, record) in group.members.iter().enumerate() {
            let is_master = record.id == master.id;
            if index == 0 && !is_master {
                view.rows.push(Row::spacer(spacer_width(record) + view.leading_columns));
            }
            let reference: &[Residue] = if is_master { &[] } else { master.seq.residues() };
            let mut row = member_row(group, index, record);
            row.cells.extend(cells(record, reference)?);
            view.rows.push(row);
        }
    }
    Ok(())
}

/// Every residue of every member against the master, under a dense ruler.
pub fn full_sequences(dataset: &Dataset, master: &SequenceRecord, config: &RenderConfig) -> CompareResult<View> {
    let mut view = View::new(ViewKind::FullSequences, 2);
    let ruler = ruler_row(
        &ruler::dense(config.max_position, config.ticks, view.leading_columns),
        config,
    );
    let glyphs = config.glyphs();
    let ticks: TickConvention = config.ticks;

    view.rows.push(ruler.clone());
    member_rows(
        &mut view,
        dataset,
        master,
        |record| record.seq.len(),
        |record, reference| {
            Ok(diff::project(record.seq.residues(), reference)
                .iter()
                .map(|d| Cell::for_residue(d, ticks.classify(Position::from_index0(d.pos0)), &glyphs))
                .collect())
        },
    )?;
    view.rows.push(ruler);
    Ok(view)
}

/// Members restricted to the diversity positions, under a sparse ruler.
pub fn positions_with_diversity(
    dataset: &Dataset,
    master: &SequenceRecord,
    config: &RenderConfig,
) -> CompareResult<View> {
    let mut view = View::new(ViewKind::PositionsWithDiversity, 2);
    let ruler = ruler_row(&ruler::sparse(&dataset.positions, view.leading_columns), config);
    let glyphs = config.glyphs();
    let positions = &dataset.positions;

    view.rows.push(ruler.clone());
    member_rows(
        &mut view,
        dataset,
        master,
        |_| positions.len(),
        |record, reference| {
            Ok(diff::project_positions(record, reference, positions)?
                .iter()
                .enumerate()
                .map(|(index, d)| Cell::for_residue(d, ruler::sparse_boundary(index), &glyphs))
                .collect())
        },
    )?;
    view.rows.push(ruler);
    Ok(view)
}

/// One row per group with its most frequent residue at each diversity
/// position, diffed against the first group's row.
pub fn most_frequent_per_group(dataset: &Dataset, config: &RenderConfig) -> CompareResult<View> {
    let mut view = View::new(ViewKind::MostFrequentPerGroup, 1);
    view.rows
        .push(ruler_row(&ruler::sparse(&dataset.positions, view.leading_columns), config));
    let glyphs = config.glyphs();

    let consensus_row = |group: &Group| -> CompareResult<Vec<Residue>> {
        dataset
            .positions
            .iter()
            .map(|&p| most_frequent(group, p).map(|e| e.residue))
            .collect()
    };
    let reference = match dataset.groups.first() {
        Some(first) => consensus_row(first)?,
        None => Vec::new(),
    };

    for (index, group) in dataset.groups.iter().enumerate() {
        let residues = consensus_row(group)?;
        let mut row = Row::new(RowKind::Summary);
        row.cells.push(Cell::new(group.name.clone()).with_tag(Tag::GroupName));
        for (column, (&residue, &position)) in residues.iter().zip(&dataset.positions).enumerate() {
            let diff = DiffCell {
                residue,
                is_master_match: index > 0 && reference.get(column) == Some(&residue),
                pos0: position.index0(),
            };
            row.cells
                .push(Cell::for_residue(&diff, ruler::sparse_boundary(column), &glyphs));
        }
        view.rows.push(row);
    }
    Ok(view)
}

/// Ranked residues with counts, one stacked row per rank.
///
/// A group gets as many rows as its most diverse position has residues;
/// positions with fewer residues leave the lower cells empty.
pub fn frequency_per_group(dataset: &Dataset, config: &RenderConfig) -> CompareResult<View> {
    let mut view = View::new(ViewKind::FrequencyPerGroup, 1);
    view.rows
        .push(ruler_row(&ruler::sparse(&dataset.positions, view.leading_columns), config));

    for (index, group) in dataset.groups.iter().enumerate() {
        if index > 0 {
            view.rows
                .push(Row::spacer(dataset.positions.len() + view.leading_columns));
        }
        let columns = dataset
            .positions
            .iter()
            .map(|&p| ranked(group, p))
            .collect::<CompareResult<Vec<_>>>()?;
        let rows = max_row_count(group);
        for rank in 0..rows {
            let mut row = Row::new(RowKind::Summary);
            if rank == 0 {
                row.cells.push(
                    Cell::new(group.name.clone())
                        .with_tag(Tag::GroupName)
                        .with_row_span(rows),
                );
            }
            for (column, entries) in columns.iter().enumerate() {
                let boundary = Tag::for_boundary(ruler::sparse_boundary(column));
                let cell = match entries.get(rank) {
                    Some(entry) => {
                        let mut cell = Cell::new(entry.residue.to_string())
                            .with_tag(Tag::ResidueCount)
                            .with_optional_tag(boundary);
                        cell.residue = Some(entry.residue);
                        cell.count = Some(entry.count);
                        cell
                    }
                    None => Cell::new("").with_optional_tag(boundary),
                };
                row.cells.push(cell);
            }
            view.rows.push(row);
        }
    }
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompareError, FrequencyEntry, FrequencyTable};

    fn pos(p: usize) -> Position {
        Position::new(p).unwrap()
    }

    fn entry(c: char, count: usize) -> FrequencyEntry {
        FrequencyEntry::new(Residue::new(c).unwrap(), count)
    }

    fn record(id: &str, seq: &str) -> SequenceRecord {
        SequenceRecord::new(id, seq).unwrap()
    }

    fn table(entries: Vec<(usize, Vec<FrequencyEntry>)>) -> FrequencyTable {
        entries.into_iter().map(|(p, e)| (pos(p), e)).collect()
    }

    fn ascii_config() -> RenderConfig {
        RenderConfig {
            max_position: 10,
            fancy_glyphs: false,
            ..RenderConfig::default()
        }
    }

    /// Group A from the reference example: s1=ACD, s2=ACE.
    fn example_dataset() -> Dataset {
        let a = Group::new(
            "A",
            vec![record("s1", "ACD"), record("s2", "ACE")],
            table(vec![
                (1, vec![entry('A', 2)]),
                (2, vec![entry('C', 2)]),
                (3, vec![entry('D', 1), entry('E', 1)]),
            ]),
        );
        Dataset::new(vec![pos(3)], vec![a])
    }

    /// Two groups; the master of the first group is its second member.
    fn two_group_dataset() -> Dataset {
        let first = Group::new(
            "first",
            vec![record("x", "KCDA"), record("m", "ACDA"), record("y", "ACEA")],
            table(vec![
                (1, vec![entry('A', 2), entry('K', 1)]),
                (3, vec![entry('D', 2), entry('E', 1)]),
            ]),
        );
        let second = Group::new(
            "second",
            vec![record("z", "ACEW"), record("w", "KCEA")],
            table(vec![
                (1, vec![entry('A', 1), entry('K', 1)]),
                (3, vec![entry('E', 2)]),
            ]),
        );
        Dataset::new(vec![pos(1), pos(3)], vec![first, second])
    }

    fn texts(row: &Row) -> Vec<String> {
        row.cells.iter().map(Cell::rendered).collect()
    }

    #[test]
    fn test_render_end_to_end_example() {
        let rendered = render(example_dataset(), &ascii_config()).unwrap();
        assert_eq!(rendered.consensus, Rearranged::AlreadyFirst);
        assert_eq!(rendered.dataset.groups[0].members[0].id.as_str(), "s1");

        let full = rendered.view(ViewKind::FullSequences).unwrap();
        let kinds: Vec<RowKind> = full.rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![RowKind::Ruler, RowKind::Member, RowKind::Member, RowKind::Ruler]
        );
        assert_eq!(texts(&full.rows[1]), vec!["A", "s1", "A", "C", "D"]);
        assert_eq!(texts(&full.rows[2]), vec!["s2", ".", ".", "E"]);
        assert_eq!(full.rows[1].cells[0].row_span, 2);
        assert!(full.rows[2].cells[1].has_tag(Tag::DiffMatch));
        assert!(!full.rows[2].cells[3].has_tag(Tag::DiffMatch));
        assert_eq!(full.rows[2].cells[1].residue, Residue::new('A'));
    }

    #[test]
    fn test_render_view_order() {
        let rendered = render(example_dataset(), &ascii_config()).unwrap();
        let kinds: Vec<ViewKind> = rendered.views.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, ViewKind::ALL.to_vec());
    }

    #[test]
    fn test_render_fails_without_partial_output() {
        let mut dataset = two_group_dataset();
        dataset.positions.push(pos(2));
        assert!(matches!(
            render(dataset, &ascii_config()),
            Err(CompareError::UntabulatedPosition { .. })
        ));
        assert_eq!(
            render(Dataset::new(vec![], vec![]), &ascii_config()).unwrap_err(),
            CompareError::NoGroups
        );
    }

    #[test]
    fn test_full_sequences_spacers_and_master() {
        let rendered = render(two_group_dataset(), &ascii_config()).unwrap();
        assert_eq!(rendered.consensus, Rearranged::MovedToFront { from: 1 });

        let full = rendered.view(ViewKind::FullSequences).unwrap();
        let kinds: Vec<RowKind> = full.rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RowKind::Ruler,
                RowKind::Member,
                RowKind::Member,
                RowKind::Member,
                RowKind::GroupSpace,
                RowKind::Member,
                RowKind::Member,
                RowKind::Ruler,
            ]
        );
        // master "m" in full, others of its own group diffed
        assert_eq!(texts(&full.rows[1]), vec!["first", "m", "A", "C", "D", "A"]);
        assert_eq!(texts(&full.rows[2]), vec!["x", "K", ".", ".", "."]);
        assert_eq!(texts(&full.rows[3]), vec!["y", ".", ".", "E", "."]);
        assert_eq!(full.rows[4].cells[0].span, 4 + 2);
        assert_eq!(texts(&full.rows[5]), vec!["second", "z", ".", ".", "E", "W"]);
        assert_eq!(full.rows[5].cells[0].row_span, 2);
    }

    #[test]
    fn test_master_matched_by_id_across_groups() {
        let mut dataset = two_group_dataset();
        // A record in another group sharing the master's id is shown as master.
        dataset.groups[1].members[0] = record("m", "KKKK");
        dataset.groups[1].frequencies = table(vec![
            (1, vec![entry('K', 1), entry('A', 1)]),
            (3, vec![entry('K', 1), entry('E', 1)]),
        ]);
        let rendered = render(dataset, &ascii_config()).unwrap();
        let full = rendered.view(ViewKind::FullSequences).unwrap();
        let spacers = full.rows.iter().filter(|r| r.kind == RowKind::GroupSpace).count();
        assert_eq!(spacers, 0);
        let row = full
            .rows
            .iter()
            .find(|r| r.cells.first().map(Cell::rendered).as_deref() == Some("second"))
            .unwrap();
        assert_eq!(texts(row), vec!["second", "m", "K", "K", "K", "K"]);
    }

    #[test]
    fn test_full_sequences_ruler_and_boundaries() {
        let config = RenderConfig {
            max_position: 12,
            ..ascii_config()
        };
        let dataset = Dataset::new(
            vec![],
            vec![Group::new("g", vec![record("a", "ACDEFGHIKLMN")], FrequencyTable::new())],
        );
        let rendered = render(dataset, &config).unwrap();
        let full = rendered.view(ViewKind::FullSequences).unwrap();

        let ruler = &full.rows[0];
        assert_eq!(ruler.cells[0].span, 2);
        let labelled: Vec<(String, usize)> = ruler
            .cells
            .iter()
            .filter(|c| !c.text.is_empty())
            .map(|c| (c.text.clone(), c.span))
            .collect();
        assert_eq!(labelled, vec![("10".to_string(), 2)]);

        let member = &full.rows[1];
        // cells: group, id, then residues at positions 1..=12
        assert!(member.cells[2 + 4].has_tag(Tag::MidBoundary));
        assert!(member.cells[2 + 9].has_tag(Tag::TickBoundary));
        assert_eq!(full.rows.last(), Some(ruler));
    }

    #[test]
    fn test_ruler_filler() {
        let config = RenderConfig {
            ruler_filler: true,
            ..ascii_config()
        };
        let rendered = render(example_dataset(), &config).unwrap();
        let ruler = &rendered.view(ViewKind::FullSequences).unwrap().rows[0];
        assert_eq!(ruler.cells[1].text, ".");
    }

    #[test]
    fn test_positions_with_diversity() {
        let rendered = render(two_group_dataset(), &ascii_config()).unwrap();
        let view = rendered.view(ViewKind::PositionsWithDiversity).unwrap();
        assert_eq!(texts(&view.rows[0]), vec!["", "1", "3"]);
        assert_eq!(texts(&view.rows[1]), vec!["first", "m", "A", "D"]);
        assert_eq!(texts(&view.rows[2]), vec!["x", "K", "."]);
        assert_eq!(view.rows[4].kind, RowKind::GroupSpace);
        assert_eq!(view.rows[4].cells[0].span, 2 + 2);
        assert_eq!(texts(&view.rows[6]), vec!["w", "K", "E"]);
        assert_eq!(view.rows.last().unwrap().kind, RowKind::Ruler);
    }

    #[test]
    fn test_most_frequent_per_group() {
        let rendered = render(two_group_dataset(), &ascii_config()).unwrap();
        let view = rendered.view(ViewKind::MostFrequentPerGroup).unwrap();
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[0].cells[0].span, 1);
        assert_eq!(texts(&view.rows[1]), vec!["first", "A", "D"]);
        assert_eq!(texts(&view.rows[2]), vec!["second", ".", "E"]);
        assert!(view.rows.iter().all(|r| r.kind != RowKind::GroupSpace));
    }

    #[test]
    fn test_frequency_per_group() {
        let rendered = render(two_group_dataset(), &ascii_config()).unwrap();
        let view = rendered.view(ViewKind::FrequencyPerGroup).unwrap();
        let kinds: Vec<RowKind> = view.rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RowKind::Ruler,
                RowKind::Summary,
                RowKind::Summary,
                RowKind::GroupSpace,
                RowKind::Summary,
                RowKind::Summary,
            ]
        );
        assert_eq!(texts(&view.rows[1]), vec!["first", "A2", "D2"]);
        assert_eq!(view.rows[1].cells[0].row_span, 2);
        assert_eq!(texts(&view.rows[2]), vec!["K1", "E1"]);
        // second group: position 3 has a single residue, rank 1 cell is empty
        assert_eq!(texts(&view.rows[5]), vec!["K1", ""]);
        assert!(view.rows[5].cells[1].residue.is_none());
        assert!(view.rows[4].cells[1].has_tag(Tag::ResidueCount));
    }

    #[test]
    fn test_sparse_boundaries_in_data_cells() {
        let positions: Vec<usize> = (1..=12).collect();
        let members = vec![record("a", "ACDEFGHIKLMN"), record("b", "KCDEFGHIKLMA")];
        let group = Group::new(
            "g",
            members,
            table(
                positions
                    .iter()
                    .map(|&p| (p, vec![entry('A', 1)]))
                    .collect(),
            ),
        );
        let dataset = Dataset::new(positions.iter().map(|&p| pos(p)).collect(), vec![group]);
        let view = positions_with_diversity(&dataset, &dataset.groups[0].members[0], &ascii_config()).unwrap();
        let member = &view.rows[1];
        let tagged: Vec<usize> = member.cells[2..]
            .iter()
            .enumerate()
            .filter(|(_, c)| c.has_tag(Tag::TickBoundary) || c.has_tag(Tag::MidBoundary))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(tagged, vec![5, 10]);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(Tag::TickBoundary.as_str(), "tick-boundary");
        assert_eq!(Tag::MidBoundary.to_string(), "mid-boundary");
        assert_eq!(Tag::DiffMatch.as_str(), "diff-match");
    }
}
