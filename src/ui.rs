//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Tab bar listing the four views
//! - The current view, laid out on the same grid as the text output, with
//!   the name columns kept in place while the residues scroll
//! - Status bar with mode, messages and position info

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::glyphs::Glyphs;
use crate::model::{AppMode, ViewerState};
use crate::text::Grid;
use crate::views::{Cell, Row, RowKind, Tag};

/// Height of the tab bar.
const TAB_BAR_HEIGHT: u16 = 1;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Color scheme for residues.
pub trait ColorScheme {
    fn get_color(&self, c: char) -> Color;
}

/// Amino acids grouped by physicochemical properties.
pub struct AminoAcidColorScheme;

impl ColorScheme for AminoAcidColorScheme {
    fn get_color(&self, c: char) -> Color {
        match c.to_ascii_uppercase() {
            // Hydrophobic
            'A' | 'V' | 'I' | 'L' | 'M' | 'F' | 'W' | 'P' => Color::Yellow,
            // Polar
            'S' | 'T' | 'N' | 'Q' | 'C' | 'G' | 'Y' => Color::Green,
            // Charged positive
            'K' | 'R' | 'H' => Color::Blue,
            // Charged negative
            'D' | 'E' => Color::Red,
            // Gap or unknown
            '-' | 'X' | '*' => Color::DarkGray,
            _ => Color::Gray,
        }
    }
}

/// Style of one cell, from its tags.
pub fn cell_style(cell: &Cell, scheme: &dyn ColorScheme) -> Style {
    let mut style = if cell.has_tag(Tag::DiffMatch) {
        Style::default().fg(Color::DarkGray)
    } else if let Some(residue) = cell.residue {
        Style::default().fg(scheme.get_color(residue.as_char()))
    } else if cell.has_tag(Tag::Ruler) {
        Style::default().fg(Color::Cyan)
    } else if cell.has_tag(Tag::GroupName) {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    if cell.has_tag(Tag::TickBoundary) {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    } else if cell.has_tag(Tag::MidBoundary) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Builds the visible part of one row.
///
/// The leading columns always show; the rest is cut to
/// `first_col..first_col + visible_cols - leading`.
pub fn visible_line(
    grid: &Grid,
    row: &Row,
    row_index: usize,
    first_col: usize,
    visible_cols: usize,
    glyphs: &Glyphs,
) -> Line<'static> {
    if row.kind == RowKind::GroupSpace {
        let rule = glyphs.h_separator.repeat(visible_cols.min(grid.width()));
        return Line::from(Span::styled(rule, Style::default().fg(Color::DarkGray)));
    }

    let scheme = AminoAcidColorScheme;
    let mut chars: Vec<(char, Style)> = Vec::with_capacity(grid.width());
    for segment in grid.segments(row, &grid.rows[row_index]) {
        let style = segment
            .cell
            .map(|i| cell_style(&row.cells[i], &scheme))
            .unwrap_or_default();
        chars.extend(segment.text.chars().map(|c| (c, style)));
    }

    let lead = grid.leading_width().min(visible_cols).min(chars.len());
    let scroll_start = (lead + first_col).min(chars.len());
    let scroll_end = (scroll_start + visible_cols - lead).min(chars.len());

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut current_style = Style::default();
    for &(c, style) in chars[..lead].iter().chain(&chars[scroll_start..scroll_end]) {
        if style != current_style && !current.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut current), current_style));
        }
        current_style = style;
        current.push(c);
    }
    if !current.is_empty() {
        spans.push(Span::styled(current, current_style));
    }
    Line::from(spans)
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &ViewerState) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    render_tab_bar(frame, state, main_layout[0]);
    render_view_panel(frame, state, main_layout[1]);
    render_status_bar(frame, state, main_layout[2]);
}

fn render_tab_bar(frame: &mut Frame, state: &ViewerState, area: Rect) {
    let titles: Vec<String> = state
        .rendered
        .views
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{} {}", i + 1, v.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.current)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_view_panel(frame: &mut Frame, state: &ViewerState, area: Rect) {
    let (Some(view), Some(grid)) = (state.rendered.views.get(state.current), state.current_grid()) else {
        frame.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };

    let visible_rows = area.height.saturating_sub(2) as usize;
    let visible_cols = area.width.saturating_sub(2) as usize;
    let first_row = state.viewport.first_row;
    let end_row = (first_row + visible_rows).min(view.rows.len());

    let lines: Vec<Line> = (first_row..end_row)
        .map(|i| {
            visible_line(
                grid,
                &view.rows[i],
                i,
                state.viewport.first_col,
                visible_cols,
                &state.glyphs,
            )
        })
        .collect();

    let more_left = if state.viewport.first_col > 0 { state.glyphs.arrow_left } else { " " };
    let more_right = if state.viewport.first_col + visible_cols < grid.width() {
        state.glyphs.arrow_right
    } else {
        " "
    };
    let title = format!("{} {} {}", more_left, view.title(), more_right);

    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &ViewerState, area: Rect) {
    let (mode_str, command_str) = match &state.mode {
        AppMode::Normal => ("NORMAL", String::new()),
        AppMode::Command(cmd) => ("COMMAND", format!(":{}", cmd)),
    };

    let rows = state.current_grid().map_or(0, |g| g.rows.len());
    let width = state.current_grid().map_or(0, Grid::width);
    let position_info = format!(
        "View {}/{} | Row {}/{} | Col {}/{} ",
        state.current + 1,
        state.rendered.views.len(),
        (state.viewport.first_row + 1).min(rows),
        rows,
        (state.viewport.first_col + 1).min(width),
        width
    );

    let message = state.status_message.as_deref().unwrap_or("");
    let left_content = if command_str.is_empty() {
        format!(" {} | {} ", mode_str, message)
    } else {
        format!(" {} | {} ", mode_str, command_str)
    };

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(left_content, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Calculates the visible dimensions of the view panel.
pub fn calculate_visible_dimensions(terminal_width: u16, terminal_height: u16) -> (usize, usize) {
    // Account for borders, tab bar and status bar
    let visible_cols = terminal_width.saturating_sub(2) as usize;
    let visible_rows = terminal_height.saturating_sub(TAB_BAR_HEIGHT + STATUS_BAR_HEIGHT + 2) as usize;
    (visible_rows, visible_cols)
}
