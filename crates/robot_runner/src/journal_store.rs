//! Journal persistence as pretty JSON.

use std::path::Path;

use robot_core::ExecutionLog;

use crate::error::RunnerError;

/// Save a journal, replacing any previous file.
pub fn save_journal(journal: &ExecutionLog, path: &Path) -> Result<(), RunnerError> {
    let json = serde_json::to_string_pretty(journal)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_journal(path: &Path) -> Result<ExecutionLog, RunnerError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Operator summary: the leg table plus where the robot was left.
pub fn recovery_report(journal: &ExecutionLog) -> String {
    let mut report = journal.generate_report();
    match journal.robot_position() {
        Some(pos) => report.push_str(&format!("Robot position: {pos}\n")),
        None => report.push_str("Robot position: unknown\n"),
    }
    for mv in journal.committed_moves() {
        report.push_str(&format!("Committed: {}{}\n", mv.from, mv.to));
    }
    let remaining = journal.remaining_legs();
    if !journal.is_complete() && !remaining.is_empty() {
        let names: Vec<&str> = remaining.iter().map(|leg| leg.kind.label()).collect();
        report.push_str(&format!("Remaining legs: {}\n", names.join(", ")));
    }
    report
}
