use crate::{cell::CellId, grid::Grid, path::CameFrom};

pub mod astar;
pub mod bfs;
pub mod open_list;

/// What happened to a neighbour when a solver considered it from the current cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relaxation {
    /// First time on the frontier.
    Discovered,
    /// Already on the frontier, now reachable more cheaply.
    Improved,
    Unchanged,
}

/// The per-algorithm half of a search: frontier discipline and cost bookkeeping. The
/// [SearchEngine](crate::SearchEngine) drives a solver and owns everything shared between
/// algorithms (marks, preview, events, cancellation).
pub trait GridSolver {
    /// Puts the source on the frontier and records it in the predecessor map.
    fn seed(&mut self, grid: &Grid, source: CellId);

    /// Removes the next cell to expand from the frontier.
    fn pop(&mut self) -> Option<CellId>;

    /// Considers reaching `neighbor` from `current`.
    fn relax(&mut self, grid: &Grid, current: CellId, neighbor: CellId) -> Relaxation;

    fn came_from(&self) -> &CameFrom;

    /// Cost recorded for `cell`, shown by renderers as its distance.
    fn cost(&self, cell: CellId) -> Option<i32>;

    fn frontier_len(&self) -> usize;

    fn name(&self) -> &'static str;
}
