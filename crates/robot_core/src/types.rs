use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MoveError;

pub const BOARD_SIZE: u8 = 8;

/// Symbol used for an empty cell in grid input and output.
pub const EMPTY_SYMBOL: char = '.';

/// A cell of the 8x8 board. File 0 is `a`, rank 0 is `1`.
///
/// The fields are private so a `Coord` is always on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coord {
    file: u8,
    rank: u8,
}

impl Coord {
    /// Centre square the robot rests on between maneuvers by default.
    pub const E4: Coord = Coord { file: 4, rank: 3 };

    pub const fn new(file: u8, rank: u8) -> Option<Coord> {
        if file < BOARD_SIZE && rank < BOARD_SIZE {
            Some(Coord { file, rank })
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Option<Coord> {
        if idx < 64 {
            Coord::new((idx % 8) as u8, (idx / 8) as u8)
        } else {
            None
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Square index `rank * 8 + file`, 0..63.
    #[inline]
    pub fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    /// The cell `df` files and `dr` ranks away, if it is still on the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Coord> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..BOARD_SIZE as i8).contains(&file) && (0..BOARD_SIZE as i8).contains(&rank) {
            Coord::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    pub fn manhattan(self, other: Coord) -> u32 {
        (self.file.abs_diff(other.file) + self.rank.abs_diff(other.rank)) as u32
    }

    /// Orthogonal neighbours in the fixed order left, right, up, down.
    ///
    /// Every breadth-first search in the planner expands cells in this order,
    /// so it decides which of several equally short routes is returned.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        NEIGHBOR_ORDER.into_iter().filter_map(move |d| d.apply(self))
    }

    pub fn notation(self) -> String {
        let f = (b'a' + self.file) as char;
        let r = (b'1' + self.rank) as char;
        format!("{f}{r}")
    }

    /// All 64 cells, a1 first, h8 last.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..64).filter_map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

impl FromStr for Coord {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_square(s)
    }
}

impl TryFrom<String> for Coord {
    type Error = MoveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_square(&value)
    }
}

impl From<Coord> for String {
    fn from(c: Coord) -> Self {
        c.notation()
    }
}

/// Parse a square in algebraic notation (`a1`..`h8`).
pub fn parse_square(text: &str) -> Result<Coord, MoveError> {
    let b = text.as_bytes();
    if b.len() != 2 {
        return Err(MoveError::InvalidNotation(text.to_string()));
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return Err(MoveError::InvalidNotation(text.to_string()));
    }
    Coord::new(f - b'a', r - b'1').ok_or_else(|| MoveError::InvalidNotation(text.to_string()))
}

/// Split a long-algebraic move such as `e2e4` into its two squares.
///
/// A trailing promotion letter (`e7e8q`) is accepted and ignored: the robot
/// only relocates the piece that is already on the board.
pub fn parse_move(text: &str) -> Result<(Coord, Coord), MoveError> {
    let txt = text.trim();
    let invalid = || MoveError::InvalidNotation(text.to_string());
    match txt.len() {
        4 => {}
        5 if matches!(txt.as_bytes()[4], b'q' | b'r' | b'b' | b'n' | b'Q' | b'R' | b'B' | b'N') => {}
        _ => return Err(invalid()),
    }
    let from = parse_square(txt.get(0..2).ok_or_else(invalid)?)?;
    let to = parse_square(txt.get(2..4).ok_or_else(invalid)?)?;
    Ok((from, to))
}

/// Opaque occupant of a cell, identified by its single-character symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece(char);

impl Piece {
    /// Returns `None` for the empty symbol and for whitespace.
    pub fn new(symbol: char) -> Option<Piece> {
        if symbol == EMPTY_SYMBOL || symbol.is_whitespace() || symbol.is_control() {
            None
        } else {
            Some(Piece(symbol))
        }
    }

    pub fn symbol(self) -> char {
        self.0
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board-space direction of one actuator step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards rank 8.
    Up,
    /// Towards rank 1.
    Down,
    /// Towards the a-file.
    Left,
    /// Towards the h-file.
    Right,
}

pub const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

impl Direction {
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn apply(self, from: Coord) -> Option<Coord> {
        let (df, dr) = self.delta();
        from.offset(df, dr)
    }

    /// The direction of a single unit step, or `None` for anything else
    /// (diagonal, longer jump, standing still).
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let df = to.file() as i8 - from.file() as i8;
        let dr = to.rank() as i8 - from.rank() as i8;
        match (df, dr) {
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Wire symbol understood by the actuator driver.
    pub fn symbol(self) -> char {
        match self {
            Direction::Up => 'w',
            Direction::Down => 's',
            Direction::Left => 'a',
            Direction::Right => 'd',
        }
    }

    pub fn from_symbol(c: char) -> Option<Direction> {
        match c.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Render a command sequence as its symbol string, e.g. `"wwd"`.
pub fn commands_to_string(commands: &[Direction]) -> String {
    commands.iter().map(|d| d.symbol()).collect()
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
