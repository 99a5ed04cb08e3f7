//! Errors reported synchronously by the search control API.
//!
//! Out-of-range grid lookups are not errors (they return [None]) and neither is an exhausted
//! frontier, which is the [Outcome::Exhausted](crate::Outcome::Exhausted) terminal state.

use crate::cell::CellId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// A search needs both a source and a target assigned on the grid.
    #[error("a search needs both a source and a target cell")]
    MissingEndpoints,

    #[error("cell {0} is not part of the grid")]
    UnknownCell(CellId),

    #[error("cell {0} is blocked and cannot be a search endpoint")]
    BlockedEndpoint(CellId),

    #[error("heuristic weight must be finite and non-negative, got {0}")]
    InvalidHeuristicWeight(f32),

    /// Only one search may run against a grid at a time, and the grid cannot be edited while
    /// it does.
    #[error("a search is already running")]
    AlreadyRunning,
}

impl SearchError {
    /// Whether the request itself was malformed, as opposed to arriving at a bad time.
    pub fn is_invalid_request(&self) -> bool {
        !matches!(self, SearchError::AlreadyRunning)
    }
}
