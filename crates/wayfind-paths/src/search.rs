use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use wayfind_core::{Grid, GridError, Point};

use crate::distance::manhattan;
use crate::heap::{HeapEntry, IndexedMinHeap};

/// Outcome of a search together with search statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Path from start to goal inclusive; empty when the goal is unreachable.
    pub path: Vec<Point>,
    /// Number of steps along `path`, or `None` when no path exists.
    pub cost: Option<i32>,
    /// Number of nodes popped from the open queue.
    pub expanded: usize,
}

impl PathResult {
    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Return the path, consuming the result.
    #[inline]
    pub fn into_path(self) -> Vec<Point> {
        self.path
    }
}

/// Best known record for a node on the open frontier.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    g: i32,
    f: i32,
    parent: Option<Point>,
}

impl FrontierEntry {
    fn new(g: i32, h: i32, parent: Option<Point>) -> Self {
        Self {
            g,
            f: g + h,
            parent,
        }
    }
}

/// Compute the shortest 4-directional path from `start` to `goal`.
///
/// Returns the path including both endpoints, or an empty vector when the
/// goal cannot be reached. `start` and `goal` must lie inside `grid`.
pub fn search(start: Point, goal: Point, grid: &Grid) -> Result<Vec<Point>, GridError> {
    search_detailed(start, goal, grid).map(PathResult::into_path)
}

/// Like [`search`], but also reports the path cost and how many nodes were
/// expanded.
///
/// A blocked goal is never reached, unless it is also the start: the goal
/// check runs before the blocked check on a popped node.
pub fn search_detailed(start: Point, goal: Point, grid: &Grid) -> Result<PathResult, GridError> {
    grid.check_bounds(start)?;
    grid.check_bounds(goal)?;
    log::debug!(
        "astar: {start} -> {goal} on {}x{} grid",
        grid.rows(),
        grid.cols()
    );

    let h = |p: Point| manhattan(p, goal);

    // A node is on the open frontier iff it has an entry here; every entry
    // has a matching key in `open` with priority `f`.
    let mut frontier: HashMap<Point, FrontierEntry> = HashMap::new();
    // Predecessors of expanded nodes.
    let mut parents: HashMap<Point, Option<Point>> = HashMap::new();
    let mut visited: HashSet<Point> = HashSet::new();

    let start_entry = FrontierEntry::new(0, h(start), None);
    frontier.insert(start, start_entry);
    let mut open = IndexedMinHeap::build([(start_entry.f, start)]);
    let mut expanded = 0;

    while let Some(HeapEntry { key: node, .. }) = open.pop() {
        expanded += 1;
        let Some(current) = frontier.remove(&node) else {
            unreachable!("astar: popped {node} without a frontier entry");
        };

        if node == goal {
            let path = reconstruct_path(&parents, node, current.parent);
            log::debug!(
                "astar: found path of {} steps, {expanded} nodes expanded",
                current.g
            );
            return Ok(PathResult {
                path,
                cost: Some(current.g),
                expanded,
            });
        }

        // Stale entry, or a blocked node that is never expanded.
        if !visited.insert(node) || grid.is_blocked(node) {
            continue;
        }
        parents.insert(node, current.parent);

        for next in node.neighbors_4() {
            if !grid.contains(next) || visited.contains(&next) {
                continue;
            }
            if grid.is_blocked(next) {
                visited.insert(next);
                continue;
            }

            let candidate = FrontierEntry::new(current.g + 1, h(next), Some(node));
            match frontier.entry(next) {
                Entry::Occupied(mut known) => {
                    if candidate.f < known.get().f {
                        log::trace!(
                            "astar: better route to {next} via {node}, f {} -> {}",
                            known.get().f,
                            candidate.f
                        );
                        known.insert(candidate);
                        open.update(&next, candidate.f);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(candidate);
                    open.push(candidate.f, next);
                }
            }
        }
    }

    log::debug!("astar: no path from {start} to {goal}, {expanded} nodes expanded");
    Ok(PathResult {
        path: Vec::new(),
        cost: None,
        expanded,
    })
}

/// Walk predecessor links back from `goal` and return the path start-first.
fn reconstruct_path(
    parents: &HashMap<Point, Option<Point>>,
    goal: Point,
    mut prev: Option<Point>,
) -> Vec<Point> {
    let mut path = vec![goal];
    while let Some(p) = prev {
        path.push(p);
        prev = match parents.get(&p) {
            Some(&pp) => pp,
            None => unreachable!("astar: predecessor {p} was never expanded"),
        };
    }
    path.reverse();
    path
}
