//! Breadth-first corridor search over the occupancy grid.

use std::collections::VecDeque;

use crate::board::Board;
use crate::path::Path;
use crate::types::Coord;

/// Shortest orthogonal corridor from `origin` to `destination`.
///
/// A cell may be entered when it is empty or when it is the destination,
/// whose occupant (if any) is simply overwritten by the move. Occupied
/// intermediate cells are never crossed. Returns `None` when the destination
/// is outside the empty-cell component reachable from the origin.
pub fn find_path(board: &Board, origin: Coord, destination: Coord) -> Option<Path> {
    let mut visited = [false; 64];
    let mut parent: [Option<Coord>; 64] = [None; 64];
    let mut queue = VecDeque::with_capacity(64);

    visited[origin.index()] = true;
    queue.push_back(origin);

    while let Some(cell) = queue.pop_front() {
        if cell == destination {
            return Some(reconstruct(&parent, origin, destination));
        }
        for next in cell.neighbors() {
            if visited[next.index()] {
                continue;
            }
            if !board.is_empty(next) && next != destination {
                continue;
            }
            visited[next.index()] = true;
            parent[next.index()] = Some(cell);
            queue.push_back(next);
        }
    }
    None
}

/// Walk predecessor links back from `to` and return the cells origin-first.
pub(crate) fn reconstruct(parent: &[Option<Coord>; 64], from: Coord, to: Coord) -> Path {
    let mut cells = vec![to];
    let mut cur = to;
    while cur != from {
        match parent[cur.index()] {
            Some(prev) => {
                cells.push(prev);
                cur = prev;
            }
            None => break,
        }
    }
    cells.reverse();
    Path::from_search(cells)
}

#[cfg(test)]
#[path = "pathfind_tests.rs"]
mod pathfind_tests;
