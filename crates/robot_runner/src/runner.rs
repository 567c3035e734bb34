//! Request handling shared by the CLI subcommands and the stdio loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use robot_core::{ActuatorSink, Board, ControllerConfig, MoveController, parse_move};

use crate::config::RobotConfig;
use crate::error::RunnerError;
use crate::journal_store::save_journal;
use crate::request::{MoveRequest, MoveResponse};
use crate::sink::{RecordingSink, WriterSink};

/// Turns requests into responses, driving the configured actuator.
///
/// Each request carries its own board, so the runner keeps no board state
/// between requests.
pub struct Runner {
    controller_config: ControllerConfig,
    device: Option<Box<dyn ActuatorSink>>,
    journal_path: Option<PathBuf>,
}

impl Runner {
    /// Build a runner from configuration. With `dry_run`, or when no device
    /// is configured, commands are only reported and nothing waits to settle.
    pub fn from_config(config: &RobotConfig, dry_run: bool) -> Result<Self, RunnerError> {
        let device: Option<Box<dyn ActuatorSink>> = match &config.device {
            Some(path) if !dry_run => Some(Box::new(WriterSink::open(path)?)),
            _ => None,
        };
        let mut runner = Self::new(config.controller_config(), device);
        runner.journal_path = config.journal_path.clone();
        Ok(runner)
    }

    pub fn new(mut controller_config: ControllerConfig, device: Option<Box<dyn ActuatorSink>>) -> Self {
        if device.is_none() {
            controller_config.settle = Duration::ZERO;
        }
        Self {
            controller_config,
            device,
            journal_path: None,
        }
    }

    pub fn set_journal_path(&mut self, path: Option<PathBuf>) {
        self.journal_path = path;
    }

    pub fn controller_config(&self) -> &ControllerConfig {
        &self.controller_config
    }

    /// Plan and carry out one request.
    pub fn execute(&mut self, request: &MoveRequest) -> MoveResponse {
        let board = match Board::from_grid(&request.board) {
            Ok(b) => b,
            Err(e) => return MoveResponse::failed(&e, None, request.board.clone()),
        };
        let mut controller = MoveController::new(board, self.controller_config.clone());
        let cancel = controller.cancel_token();

        let mut recorder = RecordingSink::new();
        let sink: &mut dyn ActuatorSink = match self.device.as_mut() {
            Some(device) => &mut **device,
            None => &mut recorder,
        };
        let result = controller.execute_uci(&request.mv, sink, &cancel);

        if let Some(journal) = controller.last_journal() {
            if let Some(path) = &self.journal_path {
                if let Err(e) = save_journal(journal, path) {
                    warn!(path = %path.display(), error = %e, "could not save journal");
                }
            }
        }

        let board_after = controller.board().to_grid();
        match result {
            Ok(report) => MoveResponse::completed(&report, board_after),
            Err(e) => MoveResponse::failed(&e, controller.last_journal(), board_after),
        }
    }

    /// Plan one request without sending anything.
    pub fn plan(&self, request: &MoveRequest) -> MoveResponse {
        let planned = Board::from_grid(&request.board).and_then(|board| {
            let (origin, destination) = parse_move(&request.mv)?;
            let mut controller = MoveController::new(board, self.controller_config.clone());
            let maneuver = controller.plan(origin, destination)?;
            MoveResponse::planned(&maneuver, self.controller_config.home, request.board.clone())
        });
        planned.unwrap_or_else(|e| MoveResponse::failed(&e, None, request.board.clone()))
    }
}

/// Line protocol: one JSON [`MoveRequest`] per input line, one JSON
/// [`MoveResponse`] per output line. `quit` or end of input stops the loop.
///
/// Returns the number of requests answered.
pub fn run_stdio<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    runner: &mut Runner,
    plan_only: bool,
) -> Result<usize, RunnerError> {
    let mut answered = 0;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        let response = match serde_json::from_str::<MoveRequest>(line) {
            Ok(request) if plan_only => runner.plan(&request),
            Ok(request) => runner.execute(&request),
            Err(e) => {
                warn!(error = %e, "malformed request");
                MoveResponse::rejected("invalid_request", e.to_string())
            }
        };
        if !response.is_ok() {
            info!(error = ?response.error, "request failed");
        }

        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;
        answered += 1;
    }
    Ok(answered)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
