//! Orthogonal paths and their translation into actuator commands.

use serde::{Deserialize, Serialize};

use crate::error::MoveError;
use crate::types::{Coord, Direction};

/// Non-empty walk over the board where consecutive cells differ by one unit
/// along one axis. The first cell is the origin.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coord>", into = "Vec<Coord>")]
pub struct Path {
    cells: Vec<Coord>,
}

impl Path {
    pub fn new(cells: Vec<Coord>) -> Result<Self, MoveError> {
        if cells.is_empty() {
            return Err(MoveError::InvalidPath("path has no cells".to_string()));
        }
        to_commands(&cells)?;
        Ok(Path { cells })
    }

    /// Zero-step path standing on `at`.
    pub fn single(at: Coord) -> Self {
        Path { cells: vec![at] }
    }

    /// Built by the searches, which only ever link orthogonal neighbours.
    pub(crate) fn from_search(cells: Vec<Coord>) -> Self {
        debug_assert!(!cells.is_empty());
        debug_assert!(to_commands(&cells).is_ok());
        Path { cells }
    }

    /// Rank-first, file-second route between two cells, ignoring occupancy.
    ///
    /// Used for the legs where the robot travels without a piece.
    pub fn straight(from: Coord, to: Coord) -> Self {
        let mut cells = vec![from];
        let mut cur = from;
        let vertical = if to.rank() > from.rank() { Direction::Up } else { Direction::Down };
        while cur.rank() != to.rank() {
            match vertical.apply(cur) {
                Some(next) => {
                    cells.push(next);
                    cur = next;
                }
                None => break,
            }
        }
        let horizontal = if to.file() > from.file() { Direction::Right } else { Direction::Left };
        while cur.file() != to.file() {
            match horizontal.apply(cur) {
                Some(next) => {
                    cells.push(next);
                    cur = next;
                }
                None => break,
            }
        }
        Path { cells }
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn start(&self) -> Coord {
        self.cells[0]
    }

    pub fn end(&self) -> Coord {
        self.cells[self.cells.len() - 1]
    }

    /// Number of unit steps, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(&c)
    }

    pub fn reversed(&self) -> Path {
        let mut cells = self.cells.clone();
        cells.reverse();
        Path { cells }
    }

    pub fn notation(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.notation()).collect()
    }
}

impl TryFrom<Vec<Coord>> for Path {
    type Error = MoveError;

    fn try_from(cells: Vec<Coord>) -> Result<Self, Self::Error> {
        Path::new(cells)
    }
}

impl From<Path> for Vec<Coord> {
    fn from(p: Path) -> Self {
        p.cells
    }
}

/// One command per consecutive pair of cells.
///
/// Fails with [`MoveError::InvalidPath`] on the first pair that is not a
/// single unit step along one axis.
pub fn to_commands(cells: &[Coord]) -> Result<Vec<Direction>, MoveError> {
    cells
        .windows(2)
        .map(|w| {
            Direction::between(w[0], w[1]).ok_or_else(|| {
                MoveError::InvalidPath(format!("{} -> {} is not a unit orthogonal step", w[0], w[1]))
            })
        })
        .collect()
}

/// Walk `commands` from `start`. `None` if a step would leave the board.
pub fn replay(start: Coord, commands: &[Direction]) -> Option<Coord> {
    commands.iter().try_fold(start, |cur, d| d.apply(cur))
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod path_tests;
