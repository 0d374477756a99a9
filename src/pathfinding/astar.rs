use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::hex::{distance, offset_to_axial, OffsetCoordinate};
use crate::level::LevelGridModel;
use crate::pathfinding::walkable_neighbors;

// =============================================================================
// A* PATHFINDING
// =============================================================================
///
/// Shortest walk from `start` to `goal` across the level's walkable cells,
/// moving one hex at a time.
///
/// Returns the full path including both ends, or None when either end is off
/// the board, the goal is not walkable, no path exists, or more than
/// `max_iterations` nodes were expanded. The start cell itself does not have
/// to be walkable.
pub fn astar(
    model: &LevelGridModel,
    start: OffsetCoordinate,
    goal: OffsetCoordinate,
    max_iterations: usize,
) -> Option<Vec<OffsetCoordinate>> {
    if !model.in_bounds(start.col, start.row) || !model.is_walkable(goal.col, goal.row).ok()? {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let goal_axial = offset_to_axial(goal.col, goal.row);
    let heuristic = |c: OffsetCoordinate| distance(offset_to_axial(c.col, c.row), goal_axial);

    // Priority queue: (f_score, cell) - use Reverse for min-heap
    let mut open: BinaryHeap<Reverse<(i32, OffsetCoordinate)>> = BinaryHeap::new();
    let mut came_from: HashMap<OffsetCoordinate, OffsetCoordinate> = HashMap::new();
    let mut g_score: HashMap<OffsetCoordinate, i32> = HashMap::new();

    g_score.insert(start, 0);
    open.push(Reverse((heuristic(start), start)));

    let mut iterations = 0;

    while let Some(Reverse((_, current))) = open.pop() {
        iterations += 1;
        if iterations > max_iterations {
            return None;
        }

        if current == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }

        let new_g = g_score[&current] + 1;
        for next in walkable_neighbors(model, current) {
            let existing_g = g_score.get(&next).copied().unwrap_or(i32::MAX);
            if new_g < existing_g {
                g_score.insert(next, new_g);
                came_from.insert(next, current);
                open.push(Reverse((new_g + heuristic(next), next)));
            }
        }
    }

    None
}

fn reconstruct_path(
    came_from: &HashMap<OffsetCoordinate, OffsetCoordinate>,
    start: OffsetCoordinate,
    goal: OffsetCoordinate,
) -> Vec<OffsetCoordinate> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != start {
        current = came_from[&current];
        path.push(current);
    }

    path.reverse();
    path
}
