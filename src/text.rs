//! Plain-text rendering of views.
//!
//! Views are laid out on a character grid the way an HTML table would be:
//! cells span columns, group names span rows, and every column is as wide as
//! its widest single-column cell. The terminal viewer draws from the same
//! [`Grid`] so both front-ends line up identically.

use crate::views::{Cell, Rendered, Row, Tag, View, ViewKind};

/// A cell placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub column: usize,
    pub span: usize,
    /// Index into the row's cells.
    pub cell: usize,
}

/// A run of characters on one line, optionally belonging to a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub cell: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: Vec<Vec<Placed>>,
    pub widths: Vec<usize>,
    leading: usize,
    gap: usize,
}

impl Grid {
    pub fn columns(&self) -> usize {
        self.widths.len()
    }

    /// Spaces after `column`.
    fn separator(&self, column: usize) -> usize {
        if column + 1 >= self.widths.len() {
            0
        } else if column < self.leading {
            1
        } else {
            self.gap
        }
    }

    /// Characters covered by `span` columns starting at `column`.
    pub fn span_width(&self, column: usize, span: usize) -> usize {
        let end = (column + span).min(self.widths.len());
        (column..end)
            .map(|c| self.widths[c] + if c + 1 < end { self.separator(c) } else { 0 })
            .sum()
    }

    /// Width of the leading columns and their separator.
    pub fn leading_width(&self) -> usize {
        match self.leading.min(self.columns()) {
            0 => 0,
            n => self.span_width(0, n) + self.separator(n - 1),
        }
    }

    /// Total line width.
    pub fn width(&self) -> usize {
        self.span_width(0, self.columns())
    }

    /// Splits one row into padded segments, left to right.
    pub fn segments(&self, row: &Row, placed: &[Placed]) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut column = 0;
        for p in placed {
            if p.column > column {
                let blank = self.span_width(column, p.column - column) + self.separator(p.column - 1);
                segments.push(Segment {
                    text: " ".repeat(blank),
                    cell: None,
                });
            }
            let cell = &row.cells[p.cell];
            let width = self.span_width(p.column, p.span);
            segments.push(Segment {
                text: pad(cell, width),
                cell: Some(p.cell),
            });
            let last = p.column + p.span - 1;
            let sep = self.separator(last);
            if sep > 0 {
                segments.push(Segment {
                    text: " ".repeat(sep),
                    cell: None,
                });
            }
            column = p.column + p.span;
        }
        segments
    }
}

fn text_width(s: &str) -> usize {
    s.chars().count()
}

fn pad(cell: &Cell, width: usize) -> String {
    let text = cell.rendered();
    if cell.has_tag(Tag::GroupName) || cell.has_tag(Tag::SeqId) {
        format!("{:<width$}", text, width = width)
    } else {
        format!("{:^width$}", text, width = width)
    }
}

/// Places every cell of `view` and sizes the columns.
pub fn layout(view: &View) -> Grid {
    let mut rows = Vec::with_capacity(view.rows.len());
    // rows still covered below, per column
    let mut carry: Vec<usize> = Vec::new();

    for row in &view.rows {
        let blocked: Vec<bool> = carry.iter().map(|&c| c > 0).collect();
        let mut column = 0;
        let mut placed = Vec::with_capacity(row.cells.len());
        for (index, cell) in row.cells.iter().enumerate() {
            while blocked.get(column).copied().unwrap_or(false) {
                column += 1;
            }
            let span = cell.span.max(1);
            placed.push(Placed {
                column,
                span,
                cell: index,
            });
            column += span;
        }

        for (c, was_blocked) in carry.iter_mut().zip(&blocked) {
            if *was_blocked {
                *c -= 1;
            }
        }
        for p in &placed {
            let row_span = row.cells[p.cell].row_span;
            if row_span > 1 {
                if carry.len() < p.column + p.span {
                    carry.resize(p.column + p.span, 0);
                }
                for c in &mut carry[p.column..p.column + p.span] {
                    *c = row_span - 1;
                }
            }
        }
        rows.push(placed);
    }

    let columns = rows
        .iter()
        .flat_map(|r| r.iter().map(|p| p.column + p.span))
        .max()
        .unwrap_or(0);
    let mut grid = Grid {
        rows,
        widths: vec![0; columns],
        leading: view.leading_columns,
        gap: if view.kind == ViewKind::FullSequences { 0 } else { 1 },
    };

    for (row, placed) in view.rows.iter().zip(&grid.rows) {
        for p in placed.iter().filter(|p| p.span == 1) {
            let w = text_width(&row.cells[p.cell].rendered());
            grid.widths[p.column] = grid.widths[p.column].max(w);
        }
    }
    // widen the last covered column when a spanning cell does not fit
    let mut deficits = Vec::new();
    for (row, placed) in view.rows.iter().zip(&grid.rows) {
        for p in placed.iter().filter(|p| p.span > 1) {
            let needed = text_width(&row.cells[p.cell].rendered());
            let available = grid.span_width(p.column, p.span);
            if needed > available {
                deficits.push((p.column + p.span - 1, needed - available));
            }
        }
    }
    for (column, deficit) in deficits {
        grid.widths[column] += deficit;
    }

    grid
}

/// Renders one view, title first.
pub fn render_view(view: &View) -> String {
    let grid = layout(view);
    let mut lines = vec![view.title().to_string(), "-".repeat(view.title().len())];
    for (row, placed) in view.rows.iter().zip(&grid.rows) {
        let line: String = grid.segments(row, placed).into_iter().map(|s| s.text).collect();
        lines.push(line.trim_end().to_string());
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Renders every view, separated by a blank line.
pub fn render_all(rendered: &Rendered) -> String {
    rendered
        .views
        .iter()
        .map(render_view)
        .collect::<Vec<_>>()
        .join("\n")
}
