use std::collections::VecDeque;

use crate::{
    cell::CellId,
    grid::Grid,
    path::CameFrom,
    solver::{GridSolver, Relaxation},
    EDGE_COST,
};
use fxhash::FxHashMap;

/// Breadth-first search with a FIFO frontier. A cell's predecessor is fixed the first time it is
/// discovered, which yields shortest paths on a unit-cost grid without any tie-breaking.
#[derive(Clone, Debug, Default)]
pub struct BfsSolver {
    queue: VecDeque<CellId>,
    came_from: CameFrom,
    depth: FxHashMap<CellId, i32>,
}

impl BfsSolver {
    pub fn new() -> BfsSolver {
        BfsSolver::default()
    }
}

impl GridSolver for BfsSolver {
    fn seed(&mut self, _grid: &Grid, source: CellId) {
        self.queue.push_back(source);
        self.came_from.insert(source, None);
        self.depth.insert(source, 0);
    }

    fn pop(&mut self) -> Option<CellId> {
        self.queue.pop_front()
    }

    fn relax(&mut self, _grid: &Grid, current: CellId, neighbor: CellId) -> Relaxation {
        if self.came_from.contains_key(&neighbor) {
            return Relaxation::Unchanged;
        }
        let depth = self.depth.get(&current).copied().unwrap_or(0) + EDGE_COST;
        self.came_from.insert(neighbor, Some(current));
        self.depth.insert(neighbor, depth);
        self.queue.push_back(neighbor);
        Relaxation::Discovered
    }

    fn came_from(&self) -> &CameFrom {
        &self.came_from
    }

    fn cost(&self, cell: CellId) -> Option<i32> {
        self.depth.get(&cell).copied()
    }

    fn frontier_len(&self) -> usize {
        self.queue.len()
    }

    fn name(&self) -> &'static str {
        "BFS"
    }
}
