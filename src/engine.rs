use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fxhash::FxHashSet;
use log::{info, warn};
use smallvec::SmallVec;

use crate::{
    cell::{Cell, CellId},
    config::{Algorithm, SearchConfig},
    error::SearchError,
    event::{Step, StepEvent},
    grid::Grid,
    path::{reconstruct, trace_back, CameFrom},
    solver::{astar::AstarSolver, bfs::BfsSolver, GridSolver, Relaxation},
};

/// Cooperative cancellation flag for one search run. Clones share the flag, so a driver can hand
/// one to another thread; the engine checks it at every step boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Running,
    /// The target was reached. Path steps may still be pending.
    Found,
    Exhausted,
    Cancelled,
}

/// Terminal result of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Source-to-target path.
    Found(Vec<CellId>),
    Exhausted,
    Cancelled,
}

enum Phase {
    Searching,
    /// Emitting the final path from the target back to the source.
    Tracing { trace: Vec<CellId>, next: usize },
    Done,
}

/// State of one search run. Retained read-only after the run terminates until the engine is
/// reset or started again.
struct Run {
    solver: Box<dyn GridSolver + Send>,
    target: CellId,
    dims: (usize, usize),
    phase: Phase,
    status: SearchStatus,
    outcome: Option<Outcome>,
    current: Option<CellId>,
    previous: Option<CellId>,
    preview: Vec<CellId>,
    visited_order: Vec<CellId>,
    cancel: CancelToken,
}

impl Run {
    fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    fn finish(&mut self, status: SearchStatus, outcome: Outcome) {
        self.phase = Phase::Done;
        self.status = status;
        self.outcome = Some(outcome);
    }

    /// Ends the event stream. A run that already found its target keeps that outcome and only
    /// skips the remaining path steps.
    fn stop(&mut self) {
        match self.phase {
            Phase::Searching => {
                warn!(
                    "Search cancelled after {} expansions",
                    self.visited_order.len()
                );
                self.finish(SearchStatus::Cancelled, Outcome::Cancelled);
            }
            Phase::Tracing { .. } => {
                warn!("Path trace cancelled, keeping the found path");
                self.phase = Phase::Done;
            }
            Phase::Done => {}
        }
    }

    fn expand(&mut self, grid: &mut Grid) -> Step {
        let previous = self.current.take();
        self.previous = previous;
        if let Some(p) = previous {
            if let Some(cell) = grid.cell_mut(p) {
                cell.marks_mut().current = false;
            }
        }

        let Some(current) = self.solver.pop() else {
            let removed = std::mem::take(&mut self.preview);
            for &id in &removed {
                if let Some(cell) = grid.cell_mut(id) {
                    cell.marks_mut().previewed = false;
                }
            }
            info!(
                "{} exhausted its frontier after {} expansions",
                self.solver.name(),
                self.visited_order.len()
            );
            self.finish(SearchStatus::Exhausted, Outcome::Exhausted);
            return Step {
                events: vec![
                    StepEvent::PathPreviewChanged {
                        removed,
                        added: Vec::new(),
                    },
                    StepEvent::Exhausted,
                ],
            };
        };
        self.current = Some(current);
        if let Some(cell) = grid.cell_mut(current) {
            cell.marks_mut().on_frontier = false;
        }

        if current == self.target {
            let preview = self.update_preview(grid, current);
            let path = reconstruct(current, self.solver.came_from());
            if let Some(cell) = grid.cell_mut(current) {
                cell.marks_mut().found = true;
            }
            info!(
                "{} reached the target after {} expansions, path has {} cells",
                self.solver.name(),
                self.visited_order.len(),
                path.len()
            );
            self.phase = Phase::Tracing {
                trace: path.iter().rev().copied().collect(),
                next: 0,
            };
            self.status = SearchStatus::Found;
            self.outcome = Some(Outcome::Found(path.clone()));
            return Step {
                events: vec![preview, StepEvent::Found { path }],
            };
        }

        let mut discovered = SmallVec::new();
        for neighbor in grid.neighbors(current) {
            let relaxation = self.solver.relax(grid, current, neighbor);
            if relaxation == Relaxation::Unchanged {
                continue;
            }
            let cost = self.solver.cost(neighbor);
            if let Some(cell) = grid.cell_mut(neighbor) {
                if let Some(cost) = cost {
                    cell.set_distance(cost);
                }
                cell.marks_mut().on_frontier = true;
            }
            if relaxation == Relaxation::Discovered {
                discovered.push(neighbor);
            }
        }

        let preview = self.update_preview(grid, current);
        if let Some(cell) = grid.cell_mut(current) {
            let marks = cell.marks_mut();
            marks.visited = true;
            marks.current = true;
        }
        self.visited_order.push(current);
        Step {
            events: vec![
                preview,
                StepEvent::Expanded {
                    cell: current,
                    previous,
                    discovered,
                },
            ],
        }
    }

    /// Swaps the preview over to the path leading to `current`, touching only the cells whose
    /// membership changed.
    fn update_preview(&mut self, grid: &mut Grid, current: CellId) -> StepEvent {
        let mut next = trace_back(current, self.solver.came_from())
            .filter(|&id| grid.cell(id).is_some_and(Cell::takes_path_marks))
            .collect::<Vec<_>>();
        next.reverse();

        let old = self.preview.iter().copied().collect::<FxHashSet<_>>();
        let new = next.iter().copied().collect::<FxHashSet<_>>();
        let removed = self
            .preview
            .iter()
            .copied()
            .filter(|id| !new.contains(id))
            .collect::<Vec<_>>();
        let added = next
            .iter()
            .copied()
            .filter(|id| !old.contains(id))
            .collect::<Vec<_>>();

        for &id in &removed {
            if let Some(cell) = grid.cell_mut(id) {
                cell.marks_mut().previewed = false;
            }
        }
        for &id in &added {
            if let Some(cell) = grid.cell_mut(id) {
                cell.marks_mut().previewed = true;
            }
        }
        self.preview = next;
        StepEvent::PathPreviewChanged { removed, added }
    }

    fn trace(&mut self, grid: &mut Grid) -> Option<Step> {
        let Phase::Tracing { trace, next } = &mut self.phase else {
            return None;
        };
        let index = *next;
        let cell = *trace.get(index)?;
        *next += 1;
        let finished = *next >= trace.len();
        if let Some(c) = grid.cell_mut(cell) {
            if c.takes_path_marks() {
                let marks = c.marks_mut();
                marks.on_path = true;
                marks.previewed = false;
            }
        }
        self.preview.retain(|&id| id != cell);
        if finished {
            self.phase = Phase::Done;
        }
        Some(Step {
            events: vec![StepEvent::PathStep { cell, index }],
        })
    }
}

/// Steppable BFS / A* driver. One engine runs at most one search at a time; each call to
/// [step](Self::step) performs one unit of work and reports it as a [Step].
#[derive(Default)]
pub struct SearchEngine {
    run: Option<Run>,
}

impl SearchEngine {
    pub fn new() -> SearchEngine {
        SearchEngine::default()
    }

    pub fn status(&self) -> SearchStatus {
        self.run.as_ref().map_or(SearchStatus::Idle, |r| r.status)
    }

    /// Whether the current run still has steps to emit.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|r| !r.is_done())
    }

    /// Starts a search between the grid's assigned source and target.
    pub fn start(&mut self, grid: &mut Grid, config: &SearchConfig) -> Result<(), SearchError> {
        match (grid.source(), grid.target()) {
            (Some(source), Some(target)) => self.start_between(grid, source, target, config),
            _ => Err(SearchError::MissingEndpoints),
        }
    }

    /// Starts a search between explicit endpoints. The grid's search marks are cleared first;
    /// roles are left alone.
    pub fn start_between(
        &mut self,
        grid: &mut Grid,
        source: CellId,
        target: CellId,
        config: &SearchConfig,
    ) -> Result<(), SearchError> {
        if self.is_running() {
            return Err(SearchError::AlreadyRunning);
        }
        let weight = config.heuristic_weight;
        if !weight.is_finite() || weight < 0.0 {
            return Err(SearchError::InvalidHeuristicWeight(weight));
        }
        for id in [source, target] {
            match grid.cell(id) {
                None => return Err(SearchError::UnknownCell(id)),
                Some(cell) if cell.is_blocked() => return Err(SearchError::BlockedEndpoint(id)),
                Some(_) => {}
            }
        }

        grid.clear_algorithm_marks();
        let mut solver: Box<dyn GridSolver + Send> = match config.algorithm {
            Algorithm::Bfs => Box::new(BfsSolver::new()),
            Algorithm::AStar => Box::new(AstarSolver::new(target, weight)),
        };
        solver.seed(grid, source);
        let source_cost = solver.cost(source);
        if let Some(cell) = grid.cell_mut(source) {
            cell.marks_mut().on_frontier = true;
            if let Some(cost) = source_cost {
                cell.set_distance(cost);
            }
        }
        info!(
            "Starting {} search from {} to {} on a {}x{} grid",
            solver.name(),
            source,
            target,
            grid.rows(),
            grid.cols()
        );
        self.run = Some(Run {
            solver,
            target,
            dims: (grid.rows(), grid.cols()),
            phase: Phase::Searching,
            status: SearchStatus::Running,
            outcome: None,
            current: None,
            previous: None,
            preview: Vec::new(),
            visited_order: Vec::new(),
            cancel: CancelToken::new(),
        });
        Ok(())
    }

    /// Performs one step of the active run. Returns [None] once the run has emitted its last
    /// event, was cancelled, or when no run exists.
    pub fn step(&mut self, grid: &mut Grid) -> Option<Step> {
        let run = self.run.as_mut()?;
        if run.is_done() {
            return None;
        }
        if run.cancel.is_cancelled() {
            run.stop();
            return None;
        }
        if (grid.rows(), grid.cols()) != run.dims {
            warn!(
                "Grid is {}x{} but the search started on {}x{}, cancelling",
                grid.rows(),
                grid.cols(),
                run.dims.0,
                run.dims.1
            );
            run.finish(SearchStatus::Cancelled, Outcome::Cancelled);
            return None;
        }
        match run.phase {
            Phase::Searching => Some(run.expand(grid)),
            Phase::Tracing { .. } => run.trace(grid),
            Phase::Done => None,
        }
    }

    /// Pull-based iterator over the remaining steps.
    pub fn steps<'a>(&'a mut self, grid: &'a mut Grid) -> Steps<'a> {
        Steps { engine: self, grid }
    }

    /// Drains every remaining step and returns the outcome.
    pub fn run_to_end(&mut self, grid: &mut Grid) -> Option<&Outcome> {
        while self.step(grid).is_some() {}
        self.outcome()
    }

    /// Stops the active run. No further steps are produced. Cancelling while the found path is
    /// still being traced keeps [Outcome::Found].
    pub fn cancel(&mut self) {
        if let Some(run) = self.run.as_mut() {
            if !run.is_done() {
                run.cancel.cancel();
                run.stop();
            }
        }
    }

    /// A handle that cancels the active run from elsewhere.
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.run.as_ref().map(|r| r.cancel.clone())
    }

    /// Stops any active run and forgets it; the engine is idle afterwards.
    pub fn reset(&mut self) {
        self.cancel();
        self.run = None;
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.run.as_ref().and_then(|r| r.outcome.as_ref())
    }

    /// Expanded cells in expansion order.
    pub fn visited_order(&self) -> &[CellId] {
        self.run
            .as_ref()
            .map(|r| r.visited_order.as_slice())
            .unwrap_or_default()
    }

    pub fn came_from(&self) -> Option<&CameFrom> {
        self.run.as_ref().map(|r| r.solver.came_from())
    }

    pub fn frontier_len(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.solver.frontier_len())
    }

    pub fn current(&self) -> Option<CellId> {
        self.run.as_ref().and_then(|r| r.current)
    }

    pub fn previous(&self) -> Option<CellId> {
        self.run.as_ref().and_then(|r| r.previous)
    }

    /// Cells currently marked as the live preview path, in source-to-current order.
    pub fn preview(&self) -> &[CellId] {
        self.run
            .as_ref()
            .map(|r| r.preview.as_slice())
            .unwrap_or_default()
    }
}

pub struct Steps<'a> {
    engine: &'a mut SearchEngine,
    grid: &'a mut Grid,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.engine.step(self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::StepKind;

    fn open_grid(rows: usize, cols: usize, source: (i32, i32), target: (i32, i32)) -> Grid {
        let mut grid = Grid::new(rows, cols);
        grid.select(source.0, source.1);
        grid.select(target.0, target.1);
        grid
    }

    #[test]
    fn start_requires_endpoints() {
        let mut grid = Grid::new(3, 3);
        let mut engine = SearchEngine::new();
        assert_eq!(
            engine.start(&mut grid, &SearchConfig::default()),
            Err(SearchError::MissingEndpoints)
        );
        grid.select(0, 0);
        assert_eq!(
            engine.start(&mut grid, &SearchConfig::default()),
            Err(SearchError::MissingEndpoints)
        );
        assert_eq!(engine.status(), SearchStatus::Idle);
        assert!(engine.step(&mut grid).is_none());
    }

    #[test]
    fn start_rejects_bad_requests() {
        let mut grid = Grid::new(3, 3);
        grid.set_blocked(1, 1, true);
        let mut engine = SearchEngine::new();
        let config = SearchConfig::default();
        assert_eq!(
            engine.start_between(&mut grid, 0, 9, &config),
            Err(SearchError::UnknownCell(9))
        );
        assert_eq!(
            engine.start_between(&mut grid, 4, 0, &config),
            Err(SearchError::BlockedEndpoint(4))
        );
        let weighted = SearchConfig::new(Algorithm::AStar).with_heuristic_weight(-1.0);
        assert_eq!(
            engine.start_between(&mut grid, 0, 8, &weighted),
            Err(SearchError::InvalidHeuristicWeight(-1.0))
        );
    }

    #[test]
    fn second_start_while_running_is_rejected() {
        let mut grid = open_grid(3, 3, (0, 0), (2, 2));
        let mut engine = SearchEngine::new();
        let config = SearchConfig::default();
        engine.start(&mut grid, &config).unwrap();
        engine.step(&mut grid).unwrap();
        assert_eq!(
            engine.start(&mut grid, &config),
            Err(SearchError::AlreadyRunning)
        );
        engine.run_to_end(&mut grid);
        assert!(engine.start(&mut grid, &config).is_ok());
        assert_eq!(engine.visited_order(), &[] as &[CellId]);
    }

    #[test]
    fn expansion_step_orders_preview_before_expansion() {
        let mut grid = open_grid(3, 3, (0, 0), (2, 2));
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        let step = engine.step(&mut grid).unwrap();
        assert_eq!(
            step.kinds(),
            vec![StepKind::PathPreviewChanged, StepKind::Expanded]
        );
        assert_eq!(
            step.events[1],
            StepEvent::Expanded {
                cell: 0,
                previous: None,
                discovered: [3, 1].into_iter().collect(),
            }
        );
        let source = grid.cell(0).unwrap();
        assert!(source.marks().visited && source.marks().current);
        assert!(grid.cell(3).unwrap().marks().on_frontier);
        assert_eq!(grid.cell(3).unwrap().distance(), Some(1));
    }

    #[test]
    fn preview_follows_current_cell() {
        // |S..|
        // |...|
        // |..T|
        let mut grid = open_grid(3, 3, (0, 0), (2, 2));
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        engine.step(&mut grid); // expands 0
        let step = engine.step(&mut grid).unwrap(); // expands 3
        assert_eq!(
            step.events[0],
            StepEvent::PathPreviewChanged {
                removed: vec![],
                added: vec![3],
            }
        );
        let step = engine.step(&mut grid).unwrap(); // expands 1
        assert_eq!(
            step.events[0],
            StepEvent::PathPreviewChanged {
                removed: vec![3],
                added: vec![1],
            }
        );
        assert!(grid.cell(1).unwrap().marks().previewed);
        assert!(!grid.cell(3).unwrap().marks().previewed);
        assert!(!grid.cell(3).unwrap().marks().current);
        assert_eq!(engine.preview(), &[1]);
        assert_eq!(engine.previous(), Some(3));
        assert_eq!(engine.current(), Some(1));
    }

    #[test]
    fn found_then_traces_path_back_from_target() {
        let mut grid = open_grid(1, 3, (0, 0), (0, 2));
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        let steps = engine.steps(&mut grid).collect::<Vec<_>>();
        let kinds = steps.iter().map(Step::kinds).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                vec![StepKind::PathPreviewChanged, StepKind::Expanded],
                vec![StepKind::PathPreviewChanged, StepKind::Expanded],
                vec![StepKind::PathPreviewChanged, StepKind::Found],
                vec![StepKind::PathStep],
                vec![StepKind::PathStep],
                vec![StepKind::PathStep],
            ]
        );
        assert_eq!(steps[2].events[1], StepEvent::Found { path: vec![0, 1, 2] });
        let traced = steps[3..]
            .iter()
            .flat_map(|s| s.events.iter())
            .map(|e| match e {
                StepEvent::PathStep { cell, .. } => *cell,
                other => panic!("unexpected {:?}", other),
            })
            .collect::<Vec<_>>();
        assert_eq!(traced, vec![2, 1, 0]);
        assert_eq!(engine.status(), SearchStatus::Found);
        assert!(!engine.is_running());
        assert!(grid.cell(1).unwrap().marks().on_path);
        assert!(!grid.cell(0).unwrap().marks().on_path);
        assert!(grid.cell(2).unwrap().marks().found);
        assert_eq!(grid.to_string(), "S*T\n");
    }

    #[test]
    fn exhausted_clears_preview() {
        // |S.#T|
        let mut grid = open_grid(1, 4, (0, 0), (0, 3));
        grid.set_blocked(0, 2, true);
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        let steps = engine.steps(&mut grid).collect::<Vec<_>>();
        let last = steps.last().unwrap();
        assert_eq!(
            last.events,
            vec![
                StepEvent::PathPreviewChanged {
                    removed: vec![1],
                    added: vec![],
                },
                StepEvent::Exhausted,
            ]
        );
        assert_eq!(engine.outcome(), Some(&Outcome::Exhausted));
        assert!(grid.cells().iter().all(|c| !c.marks().previewed));
    }

    #[test]
    fn cancel_stops_the_stream() {
        let mut grid = open_grid(5, 5, (0, 0), (4, 4));
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        engine.step(&mut grid).unwrap();
        engine.cancel();
        assert!(engine.step(&mut grid).is_none());
        assert_eq!(engine.status(), SearchStatus::Cancelled);
        assert_eq!(engine.outcome(), Some(&Outcome::Cancelled));
    }

    #[test]
    fn cancel_token_is_checked_at_step_boundary() {
        let mut grid = open_grid(5, 5, (0, 0), (4, 4));
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        let token = engine.cancel_token().unwrap();
        engine.step(&mut grid).unwrap();
        std::thread::spawn(move || token.cancel()).join().unwrap();
        assert!(engine.step(&mut grid).is_none());
        assert_eq!(engine.visited_order().len(), 1);
        assert_eq!(engine.status(), SearchStatus::Cancelled);
    }

    #[test]
    fn mismatched_grid_cancels_instead_of_indexing() {
        let mut grid = open_grid(3, 3, (0, 0), (2, 2));
        let mut other = Grid::new(2, 2);
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        assert!(engine.step(&mut other).is_none());
        assert_eq!(engine.status(), SearchStatus::Cancelled);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut grid = open_grid(3, 3, (0, 0), (2, 2));
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        engine.step(&mut grid);
        engine.reset();
        assert_eq!(engine.status(), SearchStatus::Idle);
        assert!(engine.outcome().is_none());
        assert!(engine.step(&mut grid).is_none());
    }

    #[test]
    fn huge_heuristic_weight_still_finds_the_path() {
        // |S...T|
        let mut grid = open_grid(1, 5, (0, 0), (0, 4));
        let mut engine = SearchEngine::new();
        let config = SearchConfig::new(Algorithm::AStar).with_heuristic_weight(1e10);
        engine.start(&mut grid, &config).unwrap();
        assert_eq!(
            engine.run_to_end(&mut grid),
            Some(&Outcome::Found(vec![0, 1, 2, 3, 4]))
        );
    }

    #[test]
    fn cancel_during_trace_keeps_found_path() {
        let mut grid = open_grid(1, 3, (0, 0), (0, 2));
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        for _ in 0..3 {
            engine.step(&mut grid).unwrap();
        }
        assert_eq!(engine.status(), SearchStatus::Found);
        engine.cancel();
        assert!(engine.step(&mut grid).is_none());
        assert!(!engine.is_running());
        assert_eq!(engine.status(), SearchStatus::Found);
        assert_eq!(engine.outcome(), Some(&Outcome::Found(vec![0, 1, 2])));
    }

    #[test]
    fn cancel_token_during_trace_keeps_found_path() {
        let mut grid = open_grid(1, 3, (0, 0), (0, 2));
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        let token = engine.cancel_token().unwrap();
        for _ in 0..4 {
            engine.step(&mut grid).unwrap();
        }
        token.cancel();
        assert!(engine.step(&mut grid).is_none());
        assert_eq!(engine.status(), SearchStatus::Found);
        assert_eq!(engine.outcome(), Some(&Outcome::Found(vec![0, 1, 2])));
    }

    #[test]
    fn weighted_astar_improves_a_queued_cell() {
        // |.S..#.|
        // |.##.#.|
        // |....#.|
        // |.#####|
        // |.....T|
        // With W = 2 the search first runs into the pocket on the right and queues (2, 0) at
        // g = 7 from there, then reaches it at g = 3 down the left column.
        let mut grid = open_grid(5, 6, (0, 1), (4, 5));
        for (r, c) in [
            (0, 4),
            (1, 1),
            (1, 2),
            (1, 4),
            (2, 4),
            (3, 1),
            (3, 2),
            (3, 3),
            (3, 4),
            (3, 5),
        ] {
            grid.set_blocked(r, c, true);
        }
        let mut engine = SearchEngine::new();
        let config = SearchConfig::new(Algorithm::AStar).with_heuristic_weight(2.0);
        engine.start(&mut grid, &config).unwrap();

        let mut improved_step = None;
        while let Some(step) = engine.step(&mut grid) {
            match step.expanded() {
                Some(13) => assert_eq!(grid.cell(12).unwrap().distance(), Some(7)),
                Some(6) => improved_step = Some(step),
                _ => {}
            }
        }
        let step = improved_step.unwrap();
        assert_eq!(
            step.events[1],
            StepEvent::Expanded {
                cell: 6,
                previous: Some(0),
                discovered: SmallVec::new(),
            }
        );
        assert_eq!(grid.cell(12).unwrap().distance(), Some(3));
        assert_eq!(
            engine.came_from().and_then(|c| c.get(&12).copied()),
            Some(Some(6))
        );
        assert_eq!(
            engine.outcome(),
            Some(&Outcome::Found(vec![1, 0, 6, 12, 18, 24, 25, 26, 27, 28, 29]))
        );
    }

    #[test]
    fn traced_path_leaves_the_preview() {
        // |S...|
        // |.##.|
        // |...T|
        let mut grid = open_grid(3, 4, (0, 0), (2, 3));
        grid.set_blocked(1, 1, true);
        grid.set_blocked(1, 2, true);
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &SearchConfig::default()).unwrap();
        while engine.status() == SearchStatus::Running {
            engine.step(&mut grid);
        }
        assert!(!engine.preview().is_empty());
        engine.run_to_end(&mut grid);
        assert!(engine.preview().is_empty());
        assert!(grid.cells().iter().all(|c| !c.marks().previewed));
        assert_eq!(grid.cells().iter().filter(|c| c.marks().on_path).count(), 4);
    }
}
