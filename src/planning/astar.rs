//! A* shortest path on a 4-connected uniform grid.
//!
//! Search nodes live in a flat arena and reference their predecessor by
//! index; chains are acyclic because g is strictly non-decreasing along any
//! chain the search builds.

use std::collections::{HashMap, HashSet};

use crate::world::Coord;

/// Uniform cost of one orthogonal step.
const STEP_COST: u32 = 10;

#[derive(Clone, Debug)]
struct SearchNode {
    pos: Coord,
    g: u32,
    h: u32,
    f: u32,
    parent: Option<usize>,
}

/// Minimal-step path from `start` to `goal` avoiding `walls`, inclusive of
/// both endpoints, or `None` when the goal is unreachable. Failure is
/// surfaced to the caller, never retried internally.
pub fn shortest_path(
    start: Coord,
    goal: Coord,
    walls: &HashSet<Coord>,
    n: usize,
) -> Option<Vec<Coord>> {
    let mut arena = vec![SearchNode {
        pos: start,
        g: 0,
        h: heuristic(start, goal),
        f: heuristic(start, goal),
        parent: None,
    }];

    // Arena indices sorted ascending by f; ties favor earlier discovery.
    let mut open: Vec<usize> = vec![0];
    // Open-list membership by position
    let mut open_index: HashMap<Coord, usize> = HashMap::from([(start, 0)]);
    let mut closed: HashSet<Coord> = HashSet::new();

    while let Some(&head) = open.first() {
        if arena[head].pos == goal {
            return Some(reconstruct(&arena, head));
        }

        for nbr in arena[head].pos.neighbors(n) {
            if walls.contains(&nbr) || closed.contains(&nbr) {
                continue;
            }

            let candidate_g = arena[head].g + STEP_COST;
            if let Some(&idx) = open_index.get(&nbr) {
                // Re-discovered while still open: take the new path only if
                // it strictly improves g. The open list is not re-ordered.
                if candidate_g < arena[idx].g {
                    arena[idx].g = candidate_g;
                    arena[idx].f = candidate_g + arena[idx].h;
                    arena[idx].parent = Some(head);
                }
            } else {
                let h = heuristic(nbr, goal);
                let idx = arena.len();
                arena.push(SearchNode {
                    pos: nbr,
                    g: candidate_g,
                    h,
                    f: candidate_g + h,
                    parent: Some(head),
                });
                insert_sorted(&mut open, &arena, idx);
                open_index.insert(nbr, idx);
            }
        }

        // Retire the expanded head; closed nodes are never reopened.
        let head = open.remove(0);
        open_index.remove(&arena[head].pos);
        closed.insert(arena[head].pos);
    }

    tracing::debug!(
        "no path from ({}, {}) to ({}, {})",
        start.i,
        start.j,
        goal.i,
        goal.j
    );
    None
}

#[inline]
fn heuristic(from: Coord, to: Coord) -> u32 {
    from.manhattan_distance(&to) as u32 * STEP_COST
}

/// Place a new node just before the first open node with strictly greater
/// f, but never displace the current head; append on no strictly-greater
/// entry.
fn insert_sorted(open: &mut Vec<usize>, arena: &[SearchNode], idx: usize) {
    let f = arena[idx].f;
    for slot in 1..open.len() {
        if f < arena[open[slot]].f {
            open.insert(slot, idx);
            return;
        }
    }
    open.push(idx);
}

fn reconstruct(arena: &[SearchNode], goal: usize) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(idx) = current {
        path.push(arena[idx].pos);
        current = arena[idx].parent;
    }
    path.reverse();
    path
}
