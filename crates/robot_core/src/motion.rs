//! Turning a planned maneuver into legs and dispatching them to the actuator.

use std::fmt;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::cancel::CancelToken;
use crate::error::MoveError;
use crate::journal::{BoardMove, ExecutionLog};
use crate::obstruction::ObstructionPlan;
use crate::path::{Path, to_commands};
use crate::types::{Coord, Direction};
use crate::ActuatorSink;

/// Role of one contiguous stretch of robot motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    ApproachBlocker,
    RelocateBlocker,
    ApproachPrincipal,
    Principal,
    ApproachParked,
    RestoreBlocker,
    ReturnHome,
}

impl LegKind {
    /// Whether the robot drags a piece along this leg.
    pub fn carries_piece(self) -> bool {
        matches!(
            self,
            LegKind::RelocateBlocker | LegKind::Principal | LegKind::RestoreBlocker
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            LegKind::ApproachBlocker => "approach blocker",
            LegKind::RelocateBlocker => "relocate blocker",
            LegKind::ApproachPrincipal => "approach principal",
            LegKind::Principal => "principal",
            LegKind::ApproachParked => "approach parked blocker",
            LegKind::RestoreBlocker => "restore blocker",
            LegKind::ReturnHome => "return home",
        }
    }
}

impl fmt::Display for LegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub kind: LegKind,
    pub path: Path,
}

impl Leg {
    pub fn new(kind: LegKind, path: Path) -> Self {
        Self { kind, path }
    }

    /// Board move recorded once this leg has been driven, if it carries a piece.
    pub fn commit(&self) -> Option<BoardMove> {
        if self.kind.carries_piece() && self.path.steps() > 0 {
            Some(BoardMove {
                from: self.path.start(),
                to: self.path.end(),
            })
        } else {
            None
        }
    }
}

/// What the sequencer is asked to carry out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Maneuver {
    Direct { path: Path },
    Obstructed { plan: ObstructionPlan },
}

impl Maneuver {
    pub fn principal_path(&self) -> &Path {
        match self {
            Maneuver::Direct { path } => path,
            Maneuver::Obstructed { plan } => &plan.principal_path,
        }
    }

    pub fn obstruction(&self) -> Option<&ObstructionPlan> {
        match self {
            Maneuver::Direct { .. } => None,
            Maneuver::Obstructed { plan } => Some(plan),
        }
    }

    /// Legs in execution order, starting and ending at `home`.
    ///
    /// Legs without a piece use the straight rank-then-file route; the robot
    /// travels under the pieces there, so occupancy does not matter.
    pub fn legs(&self, home: Coord) -> Vec<Leg> {
        match self {
            Maneuver::Direct { path } => vec![
                Leg::new(LegKind::ApproachPrincipal, Path::straight(home, path.start())),
                Leg::new(LegKind::Principal, path.clone()),
                Leg::new(LegKind::ReturnHome, Path::straight(path.end(), home)),
            ],
            Maneuver::Obstructed { plan } => {
                let parking = plan.parking();
                let principal = &plan.principal_path;
                vec![
                    Leg::new(LegKind::ApproachBlocker, Path::straight(home, plan.blocker)),
                    Leg::new(LegKind::RelocateBlocker, plan.parking_path.clone()),
                    Leg::new(
                        LegKind::ApproachPrincipal,
                        Path::straight(parking, principal.start()),
                    ),
                    Leg::new(LegKind::Principal, principal.clone()),
                    Leg::new(LegKind::ApproachParked, Path::straight(principal.end(), parking)),
                    Leg::new(LegKind::RestoreBlocker, plan.restore_path.clone()),
                    Leg::new(LegKind::ReturnHome, Path::straight(plan.blocker, home)),
                ]
            }
        }
    }
}

/// Dispatches legs one command at a time, waiting `settle` after each.
#[derive(Debug, Clone)]
pub struct MotionSequencer {
    settle: Duration,
}

impl Default for MotionSequencer {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl MotionSequencer {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// Drive `legs` through `sink`, committing each carrying leg to `board`
    /// once its last command has been acknowledged.
    ///
    /// All legs are translated before anything is sent, so an invalid path
    /// never leaves the robot half way. Cancellation is honoured before each
    /// leg. Any sink error aborts the remaining legs; whatever was already
    /// acknowledged or committed stays that way and is recorded in `journal`.
    pub fn execute(
        &self,
        board: &mut Board,
        legs: &[Leg],
        sink: &mut dyn ActuatorSink,
        cancel: &CancelToken,
        journal: &mut ExecutionLog,
    ) -> Result<Vec<Direction>, MoveError> {
        let translated = legs
            .iter()
            .map(|leg| to_commands(leg.path.cells()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut dispatched = Vec::with_capacity(translated.iter().map(Vec::len).sum());
        for (leg, commands) in legs.iter().zip(translated) {
            if cancel.check() {
                warn!(leg = %leg.kind, "maneuver cancelled");
                return Err(MoveError::Cancelled { leg: leg.kind });
            }

            sink.begin_leg(leg)
                .map_err(|source| MoveError::Actuator { leg: leg.kind, source })?;

            let mut sent = Vec::with_capacity(commands.len());
            for &direction in &commands {
                if let Err(source) = sink.send(direction) {
                    warn!(leg = %leg.kind, sent = sent.len(), error = %source, "actuator failure");
                    journal.interrupt(leg.kind, sent);
                    return Err(MoveError::Actuator { leg: leg.kind, source });
                }
                sent.push(direction);
                dispatched.push(direction);
                if !self.settle.is_zero() {
                    thread::sleep(self.settle);
                }
            }

            let committed = leg.commit();
            if let Some(mv) = committed {
                board.apply_move(mv.from, mv.to);
                debug!(from = %mv.from, to = %mv.to, "board committed");
            }
            info!(
                leg = %leg.kind,
                from = %leg.path.start(),
                to = %leg.path.end(),
                steps = sent.len(),
                "leg complete"
            );
            journal.complete_leg(leg.kind, sent, committed);
        }
        Ok(dispatched)
    }
}

#[cfg(test)]
#[path = "motion_tests.rs"]
mod motion_tests;
