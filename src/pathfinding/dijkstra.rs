use std::collections::VecDeque;

use crate::grid::linear_index;
use crate::hex::OffsetCoordinate;
use crate::level::LevelGridModel;
use crate::pathfinding::walkable_neighbors;

// =============================================================================
// WALK DISTANCES
// =============================================================================
///
/// Step count from a set of origin cells to every cell reachable over the
/// walkable area. Handy for checking that a painted walk area is connected.
pub struct WalkDistances {
    width: i32,
    height: i32,
    steps: Vec<Option<u32>>,
}

impl WalkDistances {
    /// Breadth-first flood from every in-bounds origin at once. Origins need
    /// not be walkable themselves.
    pub fn new(model: &LevelGridModel, origins: &[OffsetCoordinate]) -> Self {
        let (width, height) = (model.width(), model.height());
        let mut steps = vec![None; model.len()];
        let mut queue = VecDeque::new();

        for &origin in origins {
            if !model.in_bounds(origin.col, origin.row) {
                continue;
            }
            let idx = linear_index(origin.col, origin.row, width) as usize;
            if steps[idx].is_none() {
                steps[idx] = Some(0);
                queue.push_back(origin);
            }
        }

        while let Some(cell) = queue.pop_front() {
            let current = steps[linear_index(cell.col, cell.row, width) as usize].unwrap_or(0);
            for next in walkable_neighbors(model, cell) {
                let nidx = linear_index(next.col, next.row, width) as usize;
                if steps[nidx].is_none() {
                    steps[nidx] = Some(current + 1);
                    queue.push_back(next);
                }
            }
        }

        Self { width, height, steps }
    }

    /// Steps to reach `(col, row)`; None if unreachable or off the board.
    pub fn get(&self, col: i32, row: i32) -> Option<u32> {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return None;
        }
        self.steps[linear_index(col, row, self.width) as usize]
    }

    /// Number of cells reached, origins included.
    pub fn reached(&self) -> usize {
        self.steps.iter().filter(|s| s.is_some()).count()
    }
}
