use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::{
    cell::CellRole,
    config::{Algorithm, SearchConfig, SessionConfig},
    engine::{CancelToken, Outcome, SearchEngine},
    error::SearchError,
    event::Step,
    grid::Grid,
};

/// One interactive pathfinding session: a grid, the engine searching it and the configuration
/// both were built from. Edits are refused while a search is running, and [reset](Self::reset)
/// stops the search before the grid is replaced.
pub struct Session {
    config: SessionConfig,
    active: SearchConfig,
    grid: Grid,
    engine: SearchEngine,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Session {
        Session {
            grid: Grid::new(config.rows, config.cols),
            active: config.search.clone(),
            engine: SearchEngine::new(),
            config,
        }
    }
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    fn ensure_idle(&self) -> Result<(), SearchError> {
        if self.engine.is_running() {
            debug!("Grid edit refused while a search is running");
            Err(SearchError::AlreadyRunning)
        } else {
            Ok(())
        }
    }

    /// Click on a cell; see [Grid::select].
    pub fn select(&mut self, row: i32, col: i32) -> Result<Option<CellRole>, SearchError> {
        self.ensure_idle()?;
        Ok(self.grid.select(row, col))
    }

    pub fn set_role(&mut self, row: i32, col: i32, role: CellRole) -> Result<bool, SearchError> {
        self.ensure_idle()?;
        Ok(self.grid.set_role(row, col, role))
    }

    pub fn set_blocked(&mut self, row: i32, col: i32, blocked: bool) -> Result<bool, SearchError> {
        self.ensure_idle()?;
        Ok(self.grid.set_blocked(row, col, blocked))
    }

    /// Randomizes blocks with the configured density.
    pub fn randomize(&mut self) -> Result<(), SearchError> {
        self.randomize_with(&mut rand::thread_rng())
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SearchError> {
        self.ensure_idle()?;
        self.grid.randomize_with(rng, self.config.block_density);
        Ok(())
    }

    /// Starts `algorithm` with the session's search settings.
    pub fn start(&mut self, algorithm: Algorithm) -> Result<(), SearchError> {
        let config = self.config.search.clone().with_algorithm(algorithm);
        self.start_with(config)
    }

    pub fn start_with(&mut self, config: SearchConfig) -> Result<(), SearchError> {
        self.engine.start(&mut self.grid, &config)?;
        self.active = config;
        Ok(())
    }

    pub fn step(&mut self) -> Option<Step> {
        self.engine.step(&mut self.grid)
    }

    pub fn cancel(&mut self) {
        self.engine.cancel();
    }

    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.engine.cancel_token()
    }

    /// Stops any running search, then replaces the grid with a fresh one of the same size.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.grid = Grid::new(self.config.rows, self.config.cols);
        info!(
            "Session reset to an empty {}x{} grid",
            self.config.rows, self.config.cols
        );
    }

    /// How long a driver should wait after showing `step`.
    pub fn delay_for(&self, step: &Step) -> Duration {
        if step.is_path_step() {
            self.active.path_delay()
        } else {
            self.active.step_delay()
        }
    }

    /// Pulls steps until the run ends, pausing between them by the configured delays. The
    /// callback sees each step and the grid after it was applied; returning
    /// [ControlFlow::Break] cancels the run.
    pub fn play<F>(&mut self, mut on_step: F) -> Option<Outcome>
    where
        F: FnMut(&Step, &Grid) -> ControlFlow<()>,
    {
        while let Some(step) = self.step() {
            if on_step(&step, &self.grid).is_break() {
                self.cancel();
                break;
            }
            let delay = self.delay_for(&step);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        self.engine.outcome().cloned()
    }
}
