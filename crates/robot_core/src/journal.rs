//! Execution log of one move request.
//!
//! The journal lists every planned leg and every leg the robot actually
//! finished, with the commands sent and the board moves committed. When a
//! maneuver is aborted half way it tells an operator (or a recovery routine)
//! where the robot and the displaced piece are, and which legs remain.

use serde::{Deserialize, Serialize};

use crate::motion::{Leg, LegKind};
use crate::path::replay;
use crate::types::{Coord, Direction, commands_to_string};

/// A piece relocation applied to the board model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMove {
    pub from: Coord,
    pub to: Coord,
}

/// A leg that was driven to its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegRecord {
    pub kind: LegKind,
    pub commands: Vec<Direction>,
    pub committed: Option<BoardMove>,
}

/// A leg cut short by an actuator failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptedLeg {
    pub kind: LegKind,
    pub commands_sent: Vec<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JournalOutcome {
    #[default]
    Pending,
    Completed,
    Failed { kind: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionLog {
    pub origin: Coord,
    pub destination: Coord,
    pub home: Coord,
    pub planned: Vec<Leg>,
    pub completed: Vec<LegRecord>,
    pub interrupted: Option<InterruptedLeg>,
    pub outcome: JournalOutcome,
}

impl ExecutionLog {
    pub fn new(origin: Coord, destination: Coord, home: Coord) -> Self {
        Self {
            origin,
            destination,
            home,
            planned: Vec::new(),
            completed: Vec::new(),
            interrupted: None,
            outcome: JournalOutcome::Pending,
        }
    }

    pub fn set_plan(&mut self, legs: Vec<Leg>) {
        self.planned = legs;
    }

    pub fn complete_leg(
        &mut self,
        kind: LegKind,
        commands: Vec<Direction>,
        committed: Option<BoardMove>,
    ) {
        self.completed.push(LegRecord {
            kind,
            commands,
            committed,
        });
    }

    pub fn interrupt(&mut self, kind: LegKind, commands_sent: Vec<Direction>) {
        self.interrupted = Some(InterruptedLeg {
            kind,
            commands_sent,
        });
    }

    pub fn finish(&mut self) {
        self.outcome = JournalOutcome::Completed;
    }

    pub fn fail(&mut self, kind: &str, message: String) {
        self.outcome = JournalOutcome::Failed {
            kind: kind.to_string(),
            message,
        };
    }

    pub fn is_complete(&self) -> bool {
        self.outcome == JournalOutcome::Completed
    }

    /// Planned legs that were not driven to their end, in order.
    pub fn remaining_legs(&self) -> &[Leg] {
        let done = self.completed.len().min(self.planned.len());
        &self.planned[done..]
    }

    /// Board moves already applied, in the order they happened.
    pub fn committed_moves(&self) -> Vec<BoardMove> {
        self.completed.iter().filter_map(|r| r.committed).collect()
    }

    /// Where the robot stands according to the commands acknowledged so far.
    pub fn robot_position(&self) -> Option<Coord> {
        let mut pos = self.home;
        for record in &self.completed {
            pos = replay(pos, &record.commands)?;
        }
        if let Some(cut) = &self.interrupted {
            pos = replay(pos, &cut.commands_sent)?;
        }
        Some(pos)
    }

    /// Human-readable summary for operators.
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Maneuver {}{} (home {}) ===\n",
            self.origin, self.destination, self.home
        ));
        report.push_str(&format!(
            "{:<26} {:<6} {:<6} {:>5}  {}\n",
            "Leg", "From", "To", "Steps", "Status"
        ));
        report.push_str(&"-".repeat(60));
        report.push('\n');

        for (i, leg) in self.planned.iter().enumerate() {
            let status = if let Some(record) = self.completed.get(i) {
                format!("done {}", commands_to_string(&record.commands))
            } else if i == self.completed.len() && self.interrupted.is_some() {
                let sent = self
                    .interrupted
                    .as_ref()
                    .map(|cut| commands_to_string(&cut.commands_sent))
                    .unwrap_or_default();
                format!("interrupted after {sent:?}")
            } else {
                "pending".to_string()
            };
            report.push_str(&format!(
                "{:<26} {:<6} {:<6} {:>5}  {}\n",
                leg.kind.label(),
                leg.path.start().notation(),
                leg.path.end().notation(),
                leg.path.steps(),
                status
            ));
        }

        match &self.outcome {
            JournalOutcome::Pending => report.push_str("Outcome: pending\n"),
            JournalOutcome::Completed => report.push_str("Outcome: completed\n"),
            JournalOutcome::Failed { kind, message } => {
                report.push_str(&format!("Outcome: failed ({kind}): {message}\n"))
            }
        }
        report
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod journal_tests;
