use crate::{
    cell::CellId,
    grid::Grid,
    path::CameFrom,
    solver::{open_list::OpenList, GridSolver, Relaxation},
    EDGE_COST,
};
use fxhash::FxHashMap;

/// A* with a weighted [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry)
/// heuristic. A factor of 1 keeps the heuristic admissible on a 4-connected unit-cost grid;
/// larger factors trade optimality for fewer expansions and 0 gives uniform-cost search.
#[derive(Default)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
    target: CellId,
    open: OpenList<i32>,
    came_from: CameFrom,
    g_score: FxHashMap<CellId, i32>,
    f_score: FxHashMap<CellId, i32>,
}

impl AstarSolver {
    pub fn new(target: CellId, heuristic_factor: f32) -> AstarSolver {
        AstarSolver {
            heuristic_factor,
            target,
            ..AstarSolver::default()
        }
    }

    /// Unweighted Manhattan distance between two cells.
    pub fn distance(&self, grid: &Grid, a: CellId, b: CellId) -> i32 {
        match (grid.cell(a), grid.cell(b)) {
            (Some(a), Some(b)) => a.point().manhattan_distance(&b.point()) * EDGE_COST,
            _ => 0,
        }
    }

    /// Just the cost times the heuristic factor. The float to int cast saturates, so huge factors
    /// top out at [i32::MAX].
    pub fn heuristic(&self, grid: &Grid, a: CellId, b: CellId) -> i32 {
        (self.distance(grid, a, b) as f32 * self.heuristic_factor) as i32
    }

    pub fn g_score(&self, cell: CellId) -> Option<i32> {
        self.g_score.get(&cell).copied()
    }

    pub fn f_score(&self, cell: CellId) -> Option<i32> {
        self.f_score.get(&cell).copied()
    }
}

impl GridSolver for AstarSolver {
    fn seed(&mut self, grid: &Grid, source: CellId) {
        self.came_from.insert(source, None);
        self.g_score.insert(source, 0);
        let f = self.heuristic(grid, source, self.target);
        self.f_score.insert(source, f);
        self.open.seed(source);
    }

    fn pop(&mut self) -> Option<CellId> {
        self.open.pop().map(|(cell, _)| cell)
    }

    fn relax(&mut self, grid: &Grid, current: CellId, neighbor: CellId) -> Relaxation {
        let Some(current_g) = self.g_score(current) else {
            return Relaxation::Unchanged;
        };
        let tentative = current_g.saturating_add(EDGE_COST);
        if self.g_score(neighbor).is_some_and(|g| tentative >= g) {
            return Relaxation::Unchanged;
        }
        let f = tentative.saturating_add(self.heuristic(grid, neighbor, self.target));
        self.came_from.insert(neighbor, Some(current));
        self.g_score.insert(neighbor, tentative);
        self.f_score.insert(neighbor, f);
        if self.open.push(neighbor, f) {
            Relaxation::Discovered
        } else {
            self.open.reprioritize(neighbor, f);
            Relaxation::Improved
        }
    }

    fn came_from(&self) -> &CameFrom {
        &self.came_from
    }

    fn cost(&self, cell: CellId) -> Option<i32> {
        self.g_score(cell)
    }

    fn frontier_len(&self) -> usize {
        self.open.len()
    }

    fn name(&self) -> &'static str {
        "A*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_scales_manhattan_distance() {
        let grid = Grid::new(4, 4);
        let solver = AstarSolver::new(15, 1.0);
        assert_eq!(solver.heuristic(&grid, 0, 15), 6);
        assert_eq!(solver.heuristic(&grid, 5, 15), 4);
        let weighted = AstarSolver::new(15, 2.0);
        assert_eq!(weighted.heuristic(&grid, 0, 15), 12);
        let uniform = AstarSolver::new(15, 0.0);
        assert_eq!(uniform.heuristic(&grid, 0, 15), 0);
    }

    #[test]
    fn seed_records_scores() {
        let grid = Grid::new(3, 3);
        let mut solver = AstarSolver::new(8, 1.0);
        solver.seed(&grid, 0);
        assert_eq!(solver.g_score(0), Some(0));
        assert_eq!(solver.f_score(0), Some(4));
        assert_eq!(solver.came_from().get(&0), Some(&None));
        assert_eq!(solver.frontier_len(), 1);
        assert_eq!(solver.pop(), Some(0));
    }

    #[test]
    fn relax_discovers_then_leaves_equal_cost_alone() {
        let grid = Grid::new(3, 3);
        let mut solver = AstarSolver::new(8, 1.0);
        solver.seed(&grid, 0);
        solver.pop();
        assert_eq!(solver.relax(&grid, 0, 1), Relaxation::Discovered);
        assert_eq!(solver.relax(&grid, 0, 3), Relaxation::Discovered);
        assert_eq!(solver.g_score(1), Some(1));
        assert_eq!(solver.f_score(1), Some(1 + 3));
        solver.pop();
        // 4 is reachable from 1 at g = 2; reaching it again via 3 costs the same.
        assert_eq!(solver.relax(&grid, 1, 4), Relaxation::Discovered);
        assert_eq!(solver.relax(&grid, 3, 4), Relaxation::Unchanged);
        assert_eq!(solver.came_from().get(&4), Some(&Some(1)));
    }

    #[test]
    fn cheaper_route_rekeys_frontier_entry() {
        let grid = Grid::new(3, 3);
        let mut solver = AstarSolver::new(8, 1.0);
        solver.seed(&grid, 0);
        solver.g_score.insert(2, 5);
        solver.open.push(2, 7);
        solver.pop();
        solver.g_score.insert(1, 1);
        assert_eq!(solver.relax(&grid, 1, 2), Relaxation::Improved);
        assert_eq!(solver.g_score(2), Some(2));
        assert_eq!(solver.open.priority(2), Some(4));
        assert_eq!(solver.frontier_len(), 1);
    }

    #[test]
    fn huge_factor_saturates_instead_of_overflowing() {
        // |S...T|
        let grid = Grid::new(1, 5);
        let mut solver = AstarSolver::new(4, 1e10);
        assert_eq!(solver.heuristic(&grid, 0, 4), i32::MAX);
        solver.seed(&grid, 0);
        solver.pop();
        assert_eq!(solver.relax(&grid, 0, 1), Relaxation::Discovered);
        assert_eq!(solver.g_score(1), Some(1));
        assert_eq!(solver.f_score(1), Some(i32::MAX));
    }
}
