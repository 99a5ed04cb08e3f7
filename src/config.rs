use std::time::Duration;

/// Number of rows and columns of a fresh session grid.
pub const DEFAULT_GRID_SIZE: usize = 30;
/// Probability that [Grid::randomize](crate::Grid::randomize) blocks a cell.
pub const DEFAULT_BLOCK_DENSITY: f64 = 0.3;
pub const DEFAULT_HEURISTIC_WEIGHT: f32 = 1.0;
pub const DEFAULT_STEP_DELAY_MS: u64 = 1;
pub const DEFAULT_PATH_DELAY_MS: u64 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Bfs,
    AStar,
}

/// Parameters of a single search run. The delays are hints for whoever paces the steps; the
/// engine itself never sleeps.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Factor applied to the A* Manhattan heuristic. Ignored by BFS.
    pub heuristic_weight: f32,
    /// Pause after each expansion step.
    pub step_delay_ms: u64,
    /// Pause after each step of the final path trace.
    pub path_delay_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            algorithm: Algorithm::default(),
            heuristic_weight: DEFAULT_HEURISTIC_WEIGHT,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            path_delay_ms: DEFAULT_PATH_DELAY_MS,
        }
    }
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm) -> SearchConfig {
        SearchConfig {
            algorithm,
            ..SearchConfig::default()
        }
    }
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
    pub fn with_heuristic_weight(mut self, weight: f32) -> Self {
        self.heuristic_weight = weight;
        self
    }
    pub fn with_delays(mut self, step_delay_ms: u64, path_delay_ms: u64) -> Self {
        self.step_delay_ms = step_delay_ms;
        self.path_delay_ms = path_delay_ms;
        self
    }
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
    pub fn path_delay(&self) -> Duration {
        Duration::from_millis(self.path_delay_ms)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Density used by [Session::randomize](crate::Session::randomize).
    pub block_density: f64,
    pub search: SearchConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            rows: DEFAULT_GRID_SIZE,
            cols: DEFAULT_GRID_SIZE,
            block_density: DEFAULT_BLOCK_DENSITY,
            search: SearchConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }
    pub fn with_block_density(mut self, density: f64) -> Self {
        self.block_density = density;
        self
    }
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}
