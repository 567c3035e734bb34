//! Move controller: one request in, one maneuver out.
//!
//! Owns the board for the lifetime of the controller. A request is planned
//! (direct corridor, or obstruction resolution when there is none), turned
//! into legs and dispatched to the actuator, committing the board leg by leg.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::cancel::CancelToken;
use crate::error::MoveError;
use crate::journal::ExecutionLog;
use crate::motion::{Maneuver, MotionSequencer};
use crate::obstruction::{DEFAULT_PARKING_DEPTH, ObstructionResolver, ResolverStats};
use crate::pathfind::find_path;
use crate::types::{Coord, Direction, commands_to_string, parse_move};
use crate::ActuatorSink;

/// Controller settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Rest square of the robot
    pub home: Coord,
    /// Pause after every command so the actuator can settle
    pub settle: Duration,
    /// How many steps a blocker may be pushed away
    pub parking_depth: usize,
    /// Wall-clock budget for one maneuver (None = unlimited)
    pub maneuver_budget: Option<Duration>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            home: Coord::E4,
            settle: Duration::from_millis(500),
            parking_depth: DEFAULT_PARKING_DEPTH,
            maneuver_budget: None,
        }
    }
}

/// Where a request currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveState {
    Idle,
    Planning,
    DirectMove,
    Resolving,
    Obstructed,
    Committed,
    /// Carries [`MoveError::kind`].
    Failed(&'static str),
}

/// Result of a successful request.
#[derive(Debug, Clone)]
pub struct MoveReport {
    pub maneuver: Maneuver,
    /// Every command sent, in order.
    pub commands: Vec<Direction>,
    pub journal: ExecutionLog,
}

impl MoveReport {
    pub fn command_string(&self) -> String {
        commands_to_string(&self.commands)
    }

    pub fn was_obstructed(&self) -> bool {
        self.maneuver.obstruction().is_some()
    }
}

pub struct MoveController {
    board: Board,
    config: ControllerConfig,
    resolver: ObstructionResolver,
    sequencer: MotionSequencer,
    state: MoveState,
    journal: Option<ExecutionLog>,
}

impl MoveController {
    pub fn new(board: Board, config: ControllerConfig) -> Self {
        Self {
            board,
            resolver: ObstructionResolver::new(config.parking_depth),
            sequencer: MotionSequencer::new(config.settle),
            config,
            state: MoveState::Idle,
            journal: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> MoveState {
        self.state
    }

    /// Journal of the most recent request, successful or not.
    pub fn last_journal(&self) -> Option<&ExecutionLog> {
        self.journal.as_ref()
    }

    pub fn resolver_stats(&self) -> ResolverStats {
        self.resolver.stats()
    }

    /// A fresh cancellation token carrying the configured maneuver budget.
    pub fn cancel_token(&self) -> CancelToken {
        CancelToken::with_budget(self.config.maneuver_budget)
    }

    fn transition(&mut self, next: MoveState) {
        debug!(from = ?self.state, to = ?next, "move state");
        self.state = next;
    }

    /// Plan a move without touching the actuator. The board is unchanged on
    /// return, whether planning succeeds or not.
    pub fn plan(&mut self, origin: Coord, destination: Coord) -> Result<Maneuver, MoveError> {
        self.transition(MoveState::Planning);
        let planned = self.plan_inner(origin, destination);
        if let Err(e) = &planned {
            warn!(origin = %origin, destination = %destination, error = %e, "planning failed");
            self.transition(MoveState::Failed(e.kind()));
        }
        planned
    }

    fn plan_inner(&mut self, origin: Coord, destination: Coord) -> Result<Maneuver, MoveError> {
        if self.board.is_empty(origin) {
            return Err(MoveError::EmptyOrigin(origin));
        }

        if let Some(path) = find_path(&self.board, origin, destination) {
            self.transition(MoveState::DirectMove);
            info!(origin = %origin, destination = %destination, steps = path.steps(), "direct corridor");
            return Ok(Maneuver::Direct { path });
        }

        self.transition(MoveState::Resolving);
        let plan = self.resolver.resolve(&mut self.board, origin, destination)?;
        info!(
            blocker = %plan.blocker,
            parking = %plan.parking(),
            relocation_steps = plan.relocation_steps(),
            principal_steps = plan.principal_path.steps(),
            "obstruction resolved"
        );
        self.transition(MoveState::Obstructed);
        Ok(Maneuver::Obstructed { plan })
    }

    /// Plan and carry out a move, dispatching commands through `sink`.
    ///
    /// Planning failures leave the board as it was. Actuator failures and
    /// cancellation leave it reflecting exactly the legs that were completed;
    /// [`last_journal`](Self::last_journal) says which.
    pub fn execute_move(
        &mut self,
        origin: Coord,
        destination: Coord,
        sink: &mut dyn ActuatorSink,
        cancel: &CancelToken,
    ) -> Result<MoveReport, MoveError> {
        let mut journal = ExecutionLog::new(origin, destination, self.config.home);

        let maneuver = match self.plan(origin, destination) {
            Ok(m) => m,
            Err(e) => {
                journal.fail(e.kind(), e.to_string());
                self.journal = Some(journal);
                return Err(e);
            }
        };

        let legs = maneuver.legs(self.config.home);
        journal.set_plan(legs.clone());
        cancel.start();
        info!(sink = sink.name(), legs = legs.len(), "executing maneuver");

        match self
            .sequencer
            .execute(&mut self.board, &legs, sink, cancel, &mut journal)
        {
            Ok(commands) => {
                journal.finish();
                self.transition(MoveState::Committed);
                info!(commands = %commands_to_string(&commands), "maneuver committed");
                self.journal = Some(journal.clone());
                Ok(MoveReport {
                    maneuver,
                    commands,
                    journal,
                })
            }
            Err(e) => {
                journal.fail(e.kind(), e.to_string());
                self.transition(MoveState::Failed(e.kind()));
                self.journal = Some(journal);
                Err(e)
            }
        }
    }

    /// [`execute_move`](Self::execute_move) for a long-algebraic move such as `e2e4`.
    pub fn execute_uci(
        &mut self,
        text: &str,
        sink: &mut dyn ActuatorSink,
        cancel: &CancelToken,
    ) -> Result<MoveReport, MoveError> {
        let (origin, destination) = parse_move(text).inspect_err(|e| {
            self.state = MoveState::Failed(e.kind());
        })?;
        self.execute_move(origin, destination, sink, cancel)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
