use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::MoveError;
use crate::types::*;

/// Occupancy of the 64 cells, indexed `rank * 8 + file`.
///
/// The only way to change a live board is [`Board::apply_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// Standard chess starting position, the state the robot is set up in.
    pub fn startpos() -> Self {
        // Infallible for the constant placement.
        Self::from_fen_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
            .unwrap_or_default()
    }

    /// Build a board from an 8x8 grid of single-symbol strings.
    ///
    /// Row 0 is rank 8 and column 0 is the a-file, which is how the perception
    /// layer reports the board. `"."`, `" "` and `""` are empty cells.
    pub fn from_grid<R, S>(rows: &[R]) -> Result<Self, MoveError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        if rows.len() != 8 {
            return Err(MoveError::InvalidBoard(format!(
                "expected 8 rows, got {}",
                rows.len()
            )));
        }
        let mut board = Board::empty();
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != 8 {
                return Err(MoveError::InvalidBoard(format!(
                    "row {} has {} cells, expected 8",
                    row_idx,
                    row.len()
                )));
            }
            let rank = 7 - row_idx as u8;
            for (file, cell) in row.iter().enumerate() {
                let text = cell.as_ref();
                let mut chars = text.chars();
                let occupant = match (chars.next(), chars.next()) {
                    (None, _) => None,
                    (Some(c), None) => Piece::new(c),
                    _ => {
                        return Err(MoveError::InvalidBoard(format!(
                            "cell {:?} at row {}, column {} is not a single symbol",
                            text, row_idx, file
                        )));
                    }
                };
                if let Some(c) = Coord::new(file as u8, rank) {
                    board.cells[c.index()] = occupant;
                }
            }
        }
        Ok(board)
    }

    /// Inverse of [`Board::from_grid`], using `.` for empty cells.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        (0..8u8)
            .rev()
            .map(|rank| {
                (0..8u8)
                    .filter_map(|file| Coord::new(file, rank))
                    .map(|c| match self.occupant_at(c) {
                        Some(pc) => pc.symbol().to_string(),
                        None => EMPTY_SYMBOL.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    /// Parse the placement field of a FEN string. Further fields are ignored.
    pub fn from_fen_placement(fen: &str) -> Result<Self, MoveError> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or_else(|| MoveError::InvalidBoard("empty FEN".to_string()))?;
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(MoveError::InvalidBoard(format!(
                "FEN placement has {} ranks, expected 8",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as u8;
                } else {
                    let piece = Piece::new(ch).ok_or_else(|| {
                        MoveError::InvalidBoard(format!("invalid piece char in FEN: {ch:?}"))
                    })?;
                    let sq = Coord::new(file, rank).ok_or_else(|| {
                        MoveError::InvalidBoard(format!("too many files in FEN rank {rank_str:?}"))
                    })?;
                    board.cells[sq.index()] = Some(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(MoveError::InvalidBoard(format!(
                        "too many files in FEN rank {rank_str:?}"
                    )));
                }
            }
            if file != 8 {
                return Err(MoveError::InvalidBoard(format!(
                    "not enough files in FEN rank {rank_str:?}"
                )));
            }
        }
        Ok(board)
    }

    /// Copy of this board with `piece` placed on `at`. Setup helper, not a move.
    pub fn with_piece(mut self, at: Coord, piece: Piece) -> Self {
        self.cells[at.index()] = Some(piece);
        self
    }

    #[inline]
    pub fn occupant_at(&self, c: Coord) -> Option<Piece> {
        self.cells[c.index()]
    }

    #[inline]
    pub fn is_empty(&self, c: Coord) -> bool {
        self.cells[c.index()].is_none()
    }

    pub fn occupied(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(|&c| !self.is_empty(c))
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Overwrite `to` with the content of `from` and clear `from`.
    ///
    /// Performs no legality or capture bookkeeping. Moving a cell onto itself
    /// leaves the board unchanged.
    pub fn apply_move(&mut self, from: Coord, to: Coord) {
        if from == to {
            return;
        }
        self.cells[to.index()] = self.cells[from.index()];
        self.cells[from.index()] = None;
    }

    /// Start a speculative edit. The board is restored to its current state
    /// when the returned guard is dropped, whatever happened in between.
    pub fn speculate(&mut self) -> Speculation<'_> {
        let snapshot = *self;
        Speculation {
            board: self,
            snapshot,
        }
    }
}

/// Guard returned by [`Board::speculate`]. Derefs to the board under edit.
pub struct Speculation<'a> {
    board: &'a mut Board,
    snapshot: Board,
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Speculation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        *self.board = self.snapshot;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let symbol = Coord::new(file, rank)
                    .and_then(|c| self.occupant_at(c))
                    .map(|p| p.symbol())
                    .unwrap_or(EMPTY_SYMBOL);
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
