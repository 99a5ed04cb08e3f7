//! # grid_search
//!
//! An incremental pathfinding engine for grid visualizations. A [Grid] of cells holds a
//! source, a target and blocked cells; a [SearchEngine] then explores it with
//! [Breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search) or
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) one expansion at a time. Every call
//! to [SearchEngine::step] returns a [Step] describing what changed (the live preview path, the
//! visited cell, newly discovered frontier cells) so that a renderer can animate the search
//! without the engine knowing anything about timing. Movement is 4-connected and every move
//! has unit cost.
//!
//! [Session] bundles one grid with one engine and a [SessionConfig], and is what an
//! interactive driver usually holds on to.
//!
//! ```
//! use grid_search::{Algorithm, Outcome, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default().with_size(4, 4));
//! session.select(0, 0).unwrap();
//! session.select(3, 3).unwrap();
//! session.start(Algorithm::Bfs).unwrap();
//! while let Some(_step) = session.step() {}
//! match session.engine().outcome() {
//!     Some(Outcome::Found(path)) => assert_eq!(path.len(), 7),
//!     other => panic!("unexpected outcome {:?}", other),
//! }
//! ```
pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod grid;
pub mod path;
pub mod session;
pub mod solver;

pub use cell::{Cell, CellId, CellRole, Marks};
pub use config::{Algorithm, SearchConfig, SessionConfig};
pub use engine::{CancelToken, Outcome, SearchEngine, SearchStatus, Steps};
pub use error::SearchError;
pub use event::{Step, StepEvent, StepKind};
pub use grid::Grid;
pub use path::{reconstruct, trace_back, CameFrom};
pub use session::Session;

/// Cost of moving between two orthogonally adjacent cells.
pub const EDGE_COST: i32 = 1;
/// Inline capacity used for neighbour buffers; a cell has at most four neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Insertion-ordered map with the fast non-cryptographic hasher used throughout the search.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;
