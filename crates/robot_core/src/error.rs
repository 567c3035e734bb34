//! Error types for move planning and execution

use thiserror::Error;

use crate::motion::LegKind;
use crate::types::Coord;

/// Failure reported by an [`ActuatorSink`](crate::ActuatorSink).
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("actuator I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("actuator rejected command: {0}")]
    Rejected(String),
}

/// Everything that can stop a move request.
#[derive(Debug, Error)]
pub enum MoveError {
    /// Malformed square or move text. Raised before the board is touched.
    #[error("invalid notation: {0:?}")]
    InvalidNotation(String),

    /// Malformed occupancy grid or FEN placement.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("no piece on origin square {0}")]
    EmptyOrigin(Coord),

    /// No single blocker could be parked within the depth bound to open a corridor.
    #[error("no corridor from {origin} to {destination} can be opened by parking one blocker")]
    Unresolvable { origin: Coord, destination: Coord },

    /// A path step that is not one unit along one axis. Indicates a planning defect.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("actuator failed during {leg} leg: {source}")]
    Actuator {
        leg: LegKind,
        #[source]
        source: SinkError,
    },

    #[error("maneuver cancelled before {leg} leg")]
    Cancelled { leg: LegKind },
}

impl MoveError {
    /// Stable snake_case tag used on the wire and in the journal.
    pub fn kind(&self) -> &'static str {
        match self {
            MoveError::InvalidNotation(_) => "invalid_notation",
            MoveError::InvalidBoard(_) => "invalid_board",
            MoveError::EmptyOrigin(_) => "empty_origin",
            MoveError::Unresolvable { .. } => "unresolvable",
            MoveError::InvalidPath(_) => "invalid_path",
            MoveError::Actuator { .. } => "actuator",
            MoveError::Cancelled { .. } => "cancelled",
        }
    }

    /// True when the request failed before any command reached the actuator,
    /// in which case the board is guaranteed unchanged.
    pub fn is_planning_failure(&self) -> bool {
        !matches!(self, MoveError::Actuator { .. } | MoveError::Cancelled { .. })
    }
}
