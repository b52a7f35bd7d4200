//! Coordinate rulers shown above and below the tabular views.
//!
//! Two forms exist:
//! - a dense ruler over positions `1..=max_position`, labelling every tick
//!   boundary with its position number (the label spans one column per digit)
//! - a sparse ruler over an explicit list of positions, one labelled column
//!   per entry, in list order

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Position;

/// Rejected tick pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid ticks ({boundary}, {mid}): both must be below 10 and 5 apart modulo 10")]
pub struct InvalidTicks {
    pub boundary: u8,
    pub mid: u8,
}

/// Which `position mod 10` values mark a tick and a mid boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TickPair", into = "TickPair")]
pub struct TickConvention {
    boundary: u8,
    mid: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct TickPair {
    boundary: u8,
    mid: u8,
}

impl TickConvention {
    pub fn new(boundary: u8, mid: u8) -> Result<Self, InvalidTicks> {
        if boundary < 10 && mid < 10 && (boundary + 5) % 10 == mid {
            Ok(Self { boundary, mid })
        } else {
            Err(InvalidTicks { boundary, mid })
        }
    }

    pub fn boundary(self) -> u8 {
        self.boundary
    }

    pub fn mid(self) -> u8 {
        self.mid
    }

    /// Boundary kind of a 1-based position.
    pub fn classify(self, position: Position) -> Boundary {
        let digit = (position.get() % 10) as u8;
        if digit == self.boundary {
            Boundary::Tick
        } else if digit == self.mid {
            Boundary::Mid
        } else {
            Boundary::None
        }
    }
}

impl Default for TickConvention {
    /// Ticks at multiples of ten, mid ticks at fives.
    fn default() -> Self {
        Self { boundary: 0, mid: 5 }
    }
}

impl TryFrom<TickPair> for TickConvention {
    type Error = InvalidTicks;

    fn try_from(pair: TickPair) -> Result<Self, Self::Error> {
        TickConvention::new(pair.boundary, pair.mid)
    }
}

impl From<TickConvention> for TickPair {
    fn from(t: TickConvention) -> Self {
        TickPair {
            boundary: t.boundary,
            mid: t.mid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    None,
    Tick,
    Mid,
}

/// Boundary kind of entry `index` of a sparse position list.
///
/// Every fifth entry is a boundary, the first entry never is.
pub fn sparse_boundary(index: usize) -> Boundary {
    if index == 0 {
        Boundary::None
    } else if index % 10 == 0 {
        Boundary::Tick
    } else if index % 10 == 5 {
        Boundary::Mid
    } else {
        Boundary::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulerColumn {
    /// First position covered by the column.
    pub position: Position,
    pub label: Option<String>,
    pub is_tick_boundary: bool,
    pub is_mid_boundary: bool,
    /// Number of alignment columns the cell covers.
    pub span: usize,
}

impl RulerColumn {
    fn new(position: Position, boundary: Boundary, label: Option<String>) -> Self {
        let span = label.as_ref().map_or(1, String::len);
        Self {
            position,
            label,
            is_tick_boundary: boundary == Boundary::Tick,
            is_mid_boundary: boundary == Boundary::Mid,
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruler {
    /// Blank columns preceding the ruler (group name, sequence id).
    pub initial_columns: usize,
    pub columns: Vec<RulerColumn>,
}

impl Ruler {
    /// Total number of alignment columns covered, leading blanks excluded.
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.span).sum()
    }
}

/// Dense ruler over `1..=max_position`.
///
/// A labelled tick column spans as many alignment columns as its label has
/// digits; the positions it covers get no column of their own.
pub fn dense(max_position: usize, ticks: TickConvention, initial_columns: usize) -> Ruler {
    let mut columns = Vec::new();
    let mut pos1 = 1;
    while pos1 <= max_position {
        let position = Position::from_index0(pos1 - 1);
        let boundary = ticks.classify(position);
        let label = (boundary == Boundary::Tick).then(|| pos1.to_string());
        let column = RulerColumn::new(position, boundary, label);
        pos1 += column.span;
        columns.push(column);
    }
    Ruler {
        initial_columns,
        columns,
    }
}

/// Sparse ruler, one labelled column per position, in list order.
pub fn sparse(positions: &[Position], initial_columns: usize) -> Ruler {
    let columns = positions
        .iter()
        .enumerate()
        .map(|(index, &position)| {
            let mut column = RulerColumn::new(position, sparse_boundary(index), Some(position.to_string()));
            column.span = 1;
            column
        })
        .collect();
    Ruler {
        initial_columns,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(list: &[usize]) -> Vec<Position> {
        list.iter().map(|&p| Position::new(p).unwrap()).collect()
    }

    #[test]
    fn test_tick_convention_validation() {
        assert!(TickConvention::new(1, 6).is_ok());
        assert!(TickConvention::new(0, 5).is_ok());
        assert!(TickConvention::new(7, 2).is_ok());
        assert_eq!(TickConvention::new(1, 5), Err(InvalidTicks { boundary: 1, mid: 5 }));
        assert!(TickConvention::new(10, 5).is_err());
    }

    #[test]
    fn test_dense_ruler_labels() {
        let ruler = dense(21, TickConvention::new(1, 6).unwrap(), 2);
        assert_eq!(ruler.initial_columns, 2);

        let ticks: Vec<(usize, &str, usize)> = ruler
            .columns
            .iter()
            .filter(|c| c.is_tick_boundary)
            .map(|c| (c.position.get(), c.label.as_deref().unwrap(), c.span))
            .collect();
        assert_eq!(ticks, vec![(1, "1", 1), (11, "11", 2), (21, "21", 2)]);

        let mids: Vec<usize> = ruler
            .columns
            .iter()
            .filter(|c| c.is_mid_boundary)
            .map(|c| c.position.get())
            .collect();
        assert_eq!(mids, vec![6, 16]);
        assert!(ruler.columns.iter().filter(|c| c.is_mid_boundary).all(|c| c.label.is_none()));
    }

    #[test]
    fn test_dense_ruler_skips_label_digits() {
        let ruler = dense(21, TickConvention::new(1, 6).unwrap(), 0);
        let covered: Vec<usize> = ruler.columns.iter().map(|c| c.position.get()).collect();
        assert!(covered.contains(&11));
        assert!(!covered.contains(&12));
        assert!(!covered.contains(&22));
        // 1..=21 plus the second digit of "21"
        assert_eq!(ruler.width(), 22);
    }

    #[test]
    fn test_dense_ruler_default_ticks() {
        let ruler = dense(120, TickConvention::default(), 2);
        let labels: Vec<&str> = ruler.columns.iter().filter_map(|c| c.label.as_deref()).collect();
        assert_eq!(labels, vec!["10", "20", "30", "40", "50", "60", "70", "80", "90", "100", "110", "120"]);
        let hundred = ruler.columns.iter().find(|c| c.label.as_deref() == Some("100")).unwrap();
        assert_eq!(hundred.span, 3);
        assert!(ruler.columns.iter().any(|c| c.is_mid_boundary && c.position.get() == 105));
    }

    #[test]
    fn test_dense_ruler_empty() {
        assert!(dense(0, TickConvention::default(), 2).columns.is_empty());
    }

    #[test]
    fn test_sparse_ruler_keeps_order() {
        let ruler = sparse(&positions(&[145, 156, 190]), 1);
        let labels: Vec<&str> = ruler.columns.iter().map(|c| c.label.as_deref().unwrap()).collect();
        assert_eq!(labels, vec!["145", "156", "190"]);
        assert!(ruler.columns.iter().all(|c| c.span == 1));
        assert!(!ruler.columns[0].is_tick_boundary && !ruler.columns[0].is_mid_boundary);
    }

    #[test]
    fn test_sparse_ruler_boundaries() {
        let list: Vec<usize> = (1..=12).map(|i| i * 7).collect();
        let ruler = sparse(&positions(&list), 2);
        let boundaries: Vec<usize> = ruler
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_tick_boundary || c.is_mid_boundary)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(boundaries, vec![5, 10]);
        assert!(ruler.columns[10].is_tick_boundary);
        assert!(ruler.columns[5].is_mid_boundary);
    }
}
