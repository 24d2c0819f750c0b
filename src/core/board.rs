use super::types::PlayerSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 標準盤面サイズ
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// マス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Owner(PlayerSlot),
}

/// 盤面
///
/// Always an authoritative snapshot from the engine. Row 0 is the top row,
/// so pieces settle at `rows() - 1` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    #[serde(with = "crate::core::serialization")]
    cells: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Board::empty(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Board {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Board {
            cells: vec![vec![Cell::Empty; cols]; rows],
        }
    }

    /// Builds a board from engine rows. Returns `None` for an empty or
    /// ragged grid.
    pub fn from_rows(cells: Vec<Vec<Cell>>) -> Option<Self> {
        let width = cells.first().map(|r| r.len()).unwrap_or(0);
        if width == 0 || cells.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Board { cells })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(Cell::Empty)
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn same_dimensions(&self, other: &Board) -> bool {
        self.rows() == other.rows() && self.cols() == other.cols()
    }

    /// 範囲外の列は満杯として扱う
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols() {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    pub fn is_full(&self) -> bool {
        (0..self.cols()).all(|col| self.is_column_full(col))
    }

    pub fn capacity(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn mark_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c != Cell::Empty)
            .count()
    }

    pub fn playable_columns(&self) -> BTreeSet<usize> {
        (0..self.cols())
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Test and fixture helper: the row a piece dropped into `col` would land on.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols() {
            return None;
        }
        (0..self.rows())
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Returns a copy with `slot`'s piece at the landing row of `col`.
    ///
    /// Only fixtures and fake engines use this; sessions never edit boards.
    pub fn with_drop(&self, col: usize, slot: PlayerSlot) -> Option<(Board, usize)> {
        let row = self.landing_row(col)?;
        let mut next = self.clone();
        next.cells[row][col] = Cell::Owner(slot);
        Some((next, row))
    }
}
