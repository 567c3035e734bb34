//! JSON wire types for move requests and their responses.
//!
//! ```json
//! {"move": "e2e4", "board": [["r","n","b","q","k","b","n","r"], ...]}
//! ```
//!
//! Row 0 of the board is rank 8. The response carries the command string,
//! the legs that were driven and the board after the request.

use serde::{Deserialize, Serialize};

use robot_core::{
    Coord, ExecutionLog, LegKind, Maneuver, MoveError, MoveReport, commands_to_string, to_commands,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Long algebraic move, e.g. `e2e4`.
    #[serde(rename = "move", alias = "movimiento")]
    pub mv: String,
    /// 8 rows of 8 symbols, row 0 = rank 8.
    #[serde(alias = "estado_tablero")]
    pub board: Vec<Vec<String>>,
}

impl MoveRequest {
    pub fn new(mv: &str, board: Vec<Vec<String>>) -> Self {
        Self {
            mv: mv.to_string(),
            board,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegSummary {
    pub kind: LegKind,
    pub from: Coord,
    pub to: Coord,
    pub commands: String,
    /// The leg moved a piece and the board reflects it.
    #[serde(default)]
    pub committed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstructionSummary {
    pub blocker: Coord,
    pub parking: Coord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    /// Stable tag, e.g. `unresolvable`.
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub status: Status,
    pub commands: String,
    pub legs: Vec<LegSummary>,
    pub board: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstruction: Option<ObstructionSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

impl MoveResponse {
    /// A request that was carried out completely.
    pub fn completed(report: &MoveReport, board: Vec<Vec<String>>) -> Self {
        Self {
            status: Status::Ok,
            commands: report.command_string(),
            legs: driven_legs(&report.journal),
            board,
            obstruction: obstruction_of(&report.maneuver),
            error: None,
        }
    }

    /// A plan that has not been sent anywhere. No leg is committed and the
    /// board is the request's.
    pub fn planned(
        maneuver: &Maneuver,
        home: Coord,
        board: Vec<Vec<String>>,
    ) -> Result<Self, MoveError> {
        let mut commands = String::new();
        let mut legs = Vec::new();
        for leg in maneuver.legs(home) {
            let leg_commands = commands_to_string(&to_commands(leg.path.cells())?);
            commands.push_str(&leg_commands);
            legs.push(LegSummary {
                kind: leg.kind,
                from: leg.path.start(),
                to: leg.path.end(),
                commands: leg_commands,
                committed: false,
            });
        }
        Ok(Self {
            status: Status::Ok,
            commands,
            legs,
            board,
            obstruction: obstruction_of(maneuver),
            error: None,
        })
    }

    /// A failed request. `journal`, when present, lists the legs that were
    /// driven before the failure, and `commands` everything the actuator
    /// acknowledged. `board` is the board as it stands now.
    pub fn failed(error: &MoveError, journal: Option<&ExecutionLog>, board: Vec<Vec<String>>) -> Self {
        let legs = journal.map(driven_legs).unwrap_or_default();
        let mut commands: String = legs.iter().map(|l| l.commands.as_str()).collect();
        if let Some(cut) = journal.and_then(|j| j.interrupted.as_ref()) {
            commands.push_str(&commands_to_string(&cut.commands_sent));
        }
        Self {
            status: Status::Error,
            commands,
            legs,
            board,
            obstruction: None,
            error: Some(ResponseError {
                kind: error.kind().to_string(),
                message: error.to_string(),
            }),
        }
    }

    /// The request line itself could not be understood.
    pub fn rejected(kind: &str, message: String) -> Self {
        Self {
            status: Status::Error,
            commands: String::new(),
            legs: Vec::new(),
            board: Vec::new(),
            obstruction: None,
            error: Some(ResponseError {
                kind: kind.to_string(),
                message,
            }),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

fn obstruction_of(maneuver: &Maneuver) -> Option<ObstructionSummary> {
    maneuver.obstruction().map(|plan| ObstructionSummary {
        blocker: plan.blocker,
        parking: plan.parking(),
    })
}

fn driven_legs(journal: &ExecutionLog) -> Vec<LegSummary> {
    journal
        .completed
        .iter()
        .zip(&journal.planned)
        .map(|(record, leg)| LegSummary {
            kind: record.kind,
            from: leg.path.start(),
            to: leg.path.end(),
            commands: commands_to_string(&record.commands),
            committed: record.committed.is_some(),
        })
        .collect()
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod request_tests;
