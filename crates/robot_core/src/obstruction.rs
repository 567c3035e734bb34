//! Obstruction resolution: when no corridor exists, find one piece that can be
//! parked nearby so that a corridor opens, and plan its way back.
//!
//! Every candidate is evaluated on a speculative copy of the board (see
//! [`Board::speculate`]), so the caller's board is identical before and after
//! [`ObstructionResolver::resolve`], whatever its outcome. Only one blocker is
//! ever displaced; chains where the parking route is itself blocked are not
//! attempted.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::error::MoveError;
use crate::path::Path;
use crate::pathfind::{find_path, reconstruct};
use crate::types::Coord;

/// Default bound on how far a blocker may be pushed away.
pub const DEFAULT_PARKING_DEPTH: usize = 2;

/// A single-blocker detour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstructionPlan {
    /// Cell of the piece that is temporarily moved away.
    pub blocker: Coord,
    /// Blocker to parking cell.
    pub parking_path: Path,
    /// Origin to destination with the blocker parked.
    pub principal_path: Path,
    /// Parking cell back to the blocker's cell, after the principal move.
    pub restore_path: Path,
}

impl ObstructionPlan {
    pub fn parking(&self) -> Coord {
        self.parking_path.end()
    }

    pub fn relocation_steps(&self) -> usize {
        self.parking_path.steps()
    }
}

/// Counters from one resolution attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub blockers: usize,
    pub candidates_evaluated: usize,
    pub candidates_accepted: usize,
}

/// Occupied cells bordering the empty region reachable from `origin`.
///
/// Traverses exactly like [`find_path`] and records every occupied neighbour
/// of an expanded cell, except the destination and the origin itself. The
/// result is in discovery order without duplicates, which fixes the order in
/// which candidates are tried.
pub fn detect_blockers(board: &Board, origin: Coord, destination: Coord) -> Vec<Coord> {
    let mut visited = [false; 64];
    let mut recorded = [false; 64];
    let mut blockers = Vec::new();
    let mut queue = VecDeque::with_capacity(64);

    visited[origin.index()] = true;
    queue.push_back(origin);

    while let Some(cell) = queue.pop_front() {
        if cell == destination {
            break;
        }
        for next in cell.neighbors() {
            if !board.is_empty(next) && next != destination {
                if next != origin && !recorded[next.index()] {
                    recorded[next.index()] = true;
                    blockers.push(next);
                }
                continue;
            }
            if !visited[next.index()] {
                visited[next.index()] = true;
                queue.push_back(next);
            }
        }
    }
    blockers
}

/// Paths from `blocker` to every empty cell within `max_depth` steps.
///
/// Only empty cells are traversed and the destination is never used, since a
/// blocker parked there would be overwritten by the principal move. Paths come
/// out in breadth-first order, so their lengths never decrease.
pub fn find_parking_spots(
    board: &Board,
    blocker: Coord,
    destination: Coord,
    max_depth: usize,
) -> Vec<Path> {
    let mut visited = [false; 64];
    let mut parent: [Option<Coord>; 64] = [None; 64];
    let mut depth = [0usize; 64];
    let mut reached = Vec::new();
    let mut queue = VecDeque::with_capacity(16);

    visited[blocker.index()] = true;
    queue.push_back(blocker);

    while let Some(cell) = queue.pop_front() {
        if depth[cell.index()] >= max_depth {
            continue;
        }
        for next in cell.neighbors() {
            if visited[next.index()] || !board.is_empty(next) || next == destination {
                continue;
            }
            visited[next.index()] = true;
            parent[next.index()] = Some(cell);
            depth[next.index()] = depth[cell.index()] + 1;
            reached.push(next);
            queue.push_back(next);
        }
    }

    reached
        .into_iter()
        .map(|spot| reconstruct(&parent, blocker, spot))
        .collect()
}

/// Searches for the cheapest single-blocker detour.
#[derive(Debug, Clone)]
pub struct ObstructionResolver {
    max_depth: usize,
    stats: ResolverStats,
}

impl Default for ObstructionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PARKING_DEPTH)
    }
}

impl ObstructionResolver {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            stats: ResolverStats::default(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Counters of the last [`resolve`](Self::resolve) call.
    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    /// Pick the detour with the fewest parking steps.
    ///
    /// Blockers are tried in discovery order and parking cells in
    /// breadth-first order; among equally cheap candidates the first one found
    /// wins. The board is borrowed exclusively for the whole search and is
    /// unchanged when this returns.
    pub fn resolve(
        &mut self,
        board: &mut Board,
        origin: Coord,
        destination: Coord,
    ) -> Result<ObstructionPlan, MoveError> {
        self.stats = ResolverStats::default();
        let blockers = detect_blockers(board, origin, destination);
        self.stats.blockers = blockers.len();
        debug!(
            origin = %origin,
            destination = %destination,
            blockers = ?blockers.iter().map(|c| c.notation()).collect::<Vec<_>>(),
            "resolving obstruction"
        );

        let mut best: Option<ObstructionPlan> = None;
        'search: for &blocker in &blockers {
            for parking_path in find_parking_spots(board, blocker, destination, self.max_depth) {
                self.stats.candidates_evaluated += 1;
                let Some(plan) = try_candidate(board, origin, destination, blocker, parking_path)
                else {
                    continue;
                };
                self.stats.candidates_accepted += 1;
                debug!(
                    blocker = %plan.blocker,
                    parking = %plan.parking(),
                    steps = plan.relocation_steps(),
                    "candidate opens a corridor"
                );
                if best
                    .as_ref()
                    .is_none_or(|b| plan.relocation_steps() < b.relocation_steps())
                {
                    best = Some(plan);
                }
                // Nothing is cheaper than one step, and ties keep the first.
                if best.as_ref().is_some_and(|b| b.relocation_steps() <= 1) {
                    break 'search;
                }
            }
        }

        debug!(
            evaluated = self.stats.candidates_evaluated,
            accepted = self.stats.candidates_accepted,
            "obstruction search finished"
        );
        best.ok_or(MoveError::Unresolvable {
            origin,
            destination,
        })
    }
}

/// Park `blocker` at the end of `parking_path`, look for the principal
/// corridor, then make the principal move and look for the way back.
/// All of it happens under one speculation, undone on return.
fn try_candidate(
    board: &mut Board,
    origin: Coord,
    destination: Coord,
    blocker: Coord,
    parking_path: Path,
) -> Option<ObstructionPlan> {
    let parking = parking_path.end();
    let mut trial = board.speculate();

    trial.apply_move(blocker, parking);
    let principal_path = find_path(&trial, origin, destination)?;

    trial.apply_move(origin, destination);
    let restore_path = find_path(&trial, parking, blocker)?;

    Some(ObstructionPlan {
        blocker,
        parking_path,
        principal_path,
        restore_path,
    })
}

#[cfg(test)]
#[path = "obstruction_tests.rs"]
mod obstruction_tests;
