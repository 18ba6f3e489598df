// ═══════════════════════════════════════════════════════════════════════
// Board: ownership flags, rows × ability columns
//
// Row 0 is the King. Every other row is one (player, area) pair; the
// mapping lives in `Table::find_row` / `Table::row_info`.
// Flags are only ever set, never cleared, so scores can be recomputed
// from scratch on demand.
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

use crate::types::KING_ROW;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns, cells: vec![false; rows * columns] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(row < self.rows && col < self.columns, "cell ({row}, {col}) is off the board");
        row * self.columns + col
    }

    /// Mark `(row, col)` as owned. Setting an owned cell again is a no-op.
    ///
    /// Panics if the cell is off the board.
    pub fn set(&mut self, row: usize, col: usize) {
        let i = self.index(row, col);
        self.cells[i] = true;
    }

    /// Panics if the cell is off the board.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn row(&self, row: usize) -> &[bool] {
        let start = self.index(row, 0);
        &self.cells[start..start + self.columns]
    }

    /// Owners per column, with the King counted twice.
    pub fn column_frequency(&self) -> Vec<u32> {
        (0..self.columns)
            .map(|col| {
                let owners = (0..self.rows).filter(|&row| self.get(row, col)).count() as u32;
                let king = self.get(KING_ROW, col) as u32;
                owners + king
            })
            .collect()
    }

    /// Sum of the column frequencies of every ability the row owns.
    pub fn row_weight(&self, row: usize) -> u32 {
        let freq = self.column_frequency();
        self.weight_with(row, &freq)
    }

    pub fn row_weights(&self) -> Vec<u32> {
        let freq = self.column_frequency();
        (0..self.rows).map(|row| self.weight_with(row, &freq)).collect()
    }

    fn weight_with(&self, row: usize, freq: &[u32]) -> u32 {
        self.row(row)
            .iter()
            .zip(freq)
            .filter(|(owned, _)| **owned)
            .map(|(_, f)| *f)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 player × 3 areas + the King = 4 rows.
    fn board_1p_5c() -> Board {
        let mut board = Board::new(4, 5);
        board.set(2, 3);
        board.set(1, 3);
        board.set(1, 1);
        board
    }

    #[test]
    fn test_frequencies_and_weights() {
        let mut board = board_1p_5c();
        assert!(board.get(2, 3));
        assert_eq!(board.column_frequency(), vec![0, 1, 0, 2, 0]);
        assert_eq!(board.row_weights(), vec![0, 3, 2, 0]);

        board.set(KING_ROW, 0);
        assert_eq!(board.column_frequency(), vec![2, 1, 0, 2, 0]);
        assert_eq!(board.row_weights(), vec![2, 3, 2, 0]);
        assert_eq!(board.row_weight(1), 3);
    }

    #[test]
    fn test_king_only_column_counts_twice() {
        let mut board = Board::new(3, 4);
        board.set(KING_ROW, 2);
        assert_eq!(board.column_frequency()[2], 2);
        assert_eq!(board.row_weight(KING_ROW), 2);
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut board = board_1p_5c();
        let before = board.clone();
        board.set(2, 3);
        assert_eq!(board, before);
        assert!(board.get(2, 3));
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn test_off_board_panics() {
        Board::new(2, 2).set(2, 0);
    }
}
