use crate::cell::{Cell, CellId, CellRole};
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use itertools::Itertools;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

/// Neighbour offsets as (row, col) deltas: up, down, left, right. The order feeds directly into
/// the tie-breaking of both searches and must not change.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// [Grid] owns the cells of a `rows × cols` board in row-major order together with the source
/// and target lookups. It also maintains information about 4-connected components using a
/// [UnionFind] structure, regenerated lazily when blocking cells may have split a component.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    source: Option<CellId>,
    target: Option<CellId>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Grid {
        let cells = (0..rows)
            .cartesian_product(0..cols)
            .enumerate()
            .map(|(id, (row, col))| Cell::new(id, row, col))
            .collect::<Vec<_>>();
        let mut grid = Grid {
            rows,
            cols,
            cells,
            source: None,
            target: None,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn source(&self) -> Option<CellId> {
        self.source
    }
    pub fn target(&self) -> Option<CellId> {
        self.target
    }
    fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }
    /// Maps a coordinate to its id, or [None] when it lies outside the grid.
    pub fn id_of(&self, row: i32, col: i32) -> Option<CellId> {
        if self.in_bounds(row, col) {
            Some(row as usize * self.cols + col as usize)
        } else {
            None
        }
    }
    /// Out-of-range coordinates yield [None] rather than failing.
    pub fn get_cell(&self, row: i32, col: i32) -> Option<&Cell> {
        self.id_of(row, col).map(|id| &self.cells[id])
    }
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id)
    }
    pub(crate) fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id)
    }

    /// Open cells orthogonally adjacent to `id`, in up, down, left, right order. Cells that are
    /// out of range, already visited, blocked, or the source are left out.
    pub fn neighbors(&self, id: CellId) -> SmallVec<[CellId; N_SMALLVEC_SIZE]> {
        let Some(cell) = self.cell(id) else {
            return SmallVec::new();
        };
        let (row, col) = (cell.row() as i32, cell.col() as i32);
        NEUMANN_OFFSETS
            .iter()
            .filter_map(|(dr, dc)| self.id_of(row + dr, col + dc))
            .filter(|&n| {
                let neighbor = &self.cells[n];
                !neighbor.is_visited() && !neighbor.is_source() && !neighbor.is_blocked()
            })
            .collect()
    }

    /// Open cells adjacent to `id` regardless of search marks, used for component bookkeeping.
    fn open_neighbors(&self, id: CellId) -> SmallVec<[CellId; N_SMALLVEC_SIZE]> {
        let cell = &self.cells[id];
        let (row, col) = (cell.row() as i32, cell.col() as i32);
        NEUMANN_OFFSETS
            .iter()
            .filter_map(|(dr, dc)| self.id_of(row + dr, col + dc))
            .filter(|&n| !self.cells[n].is_blocked())
            .collect()
    }

    /// Assigns `role` to the cell at `(row, col)`. Returns whether anything changed; refused
    /// edits are silent no-ops. At most one source and one target may exist, endpoints are only
    /// placed on empty cells and never change afterwards. [CellRole::Blocked] and
    /// [CellRole::Empty] toggle blocking through [set_blocked](Self::set_blocked).
    pub fn set_role(&mut self, row: i32, col: i32, role: CellRole) -> bool {
        let Some(id) = self.id_of(row, col) else {
            return false;
        };
        let current = self.cells[id].role();
        match role {
            CellRole::Blocked => self.set_blocked(row, col, true),
            CellRole::Empty => self.set_blocked(row, col, false),
            CellRole::Source | CellRole::Target => {
                let slot = if role == CellRole::Source {
                    self.source
                } else {
                    self.target
                };
                if current != CellRole::Empty || slot.is_some() {
                    debug!("Refusing {:?} on ({}, {}): cell is {:?}", role, row, col, current);
                    return false;
                }
                self.cells[id].set_role(role);
                if role == CellRole::Source {
                    self.source = Some(id);
                } else {
                    self.target = Some(id);
                }
                true
            }
        }
    }

    /// Click semantics: the first accepted selection becomes the source, the second the target,
    /// anything afterwards is ignored. Blocked cells and the source itself are never selected.
    pub fn select(&mut self, row: i32, col: i32) -> Option<CellRole> {
        let role = if self.source.is_none() {
            CellRole::Source
        } else if self.target.is_none() {
            CellRole::Target
        } else {
            return None;
        };
        self.set_role(row, col, role).then_some(role)
    }

    /// Blocks or unblocks a cell. Endpoints cannot be blocked. Unblocking joins the newly
    /// connected components; blocking flags the components as dirty since they may split.
    pub fn set_blocked(&mut self, row: i32, col: i32, blocked: bool) -> bool {
        let Some(id) = self.id_of(row, col) else {
            return false;
        };
        let current = self.cells[id].role();
        if current.is_endpoint() {
            debug!("Refusing to change blocking of {:?} at ({}, {})", current, row, col);
            return false;
        }
        if (current == CellRole::Blocked) == blocked {
            return false;
        }
        if blocked {
            self.cells[id].set_role(CellRole::Blocked);
            self.components_dirty = true;
        } else {
            self.cells[id].set_role(CellRole::Empty);
            for n in self.open_neighbors(id) {
                self.components.union(id, n);
            }
        }
        true
    }

    /// Resets every transient search mark; roles are untouched.
    pub fn clear_algorithm_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear_marks();
        }
    }

    /// Randomly blocks non-endpoint cells with probability `density` using the thread-local RNG.
    pub fn randomize(&mut self, density: f64) {
        self.randomize_with(&mut rand::thread_rng(), density);
    }

    /// Every cell that is not the source or target becomes blocked when a uniform draw from
    /// `[0, 1)` falls below `density`, and empty otherwise.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        info!(
            "Randomizing {}x{} grid with block density {}",
            self.rows, self.cols, density
        );
        for cell in self.cells.iter_mut() {
            if cell.role().is_endpoint() {
                continue;
            }
            let role = if rng.gen::<f64>() < density {
                CellRole::Blocked
            } else {
                CellRole::Empty
            };
            cell.set_role(role);
        }
        self.generate_components();
    }

    /// Retrieves the component id a given cell belongs to.
    pub fn get_component(&self, id: CellId) -> usize {
        self.components.find(id)
    }

    /// Checks whether `a` and `b` lie on the same 4-connected component of open cells.
    /// Regenerates the components first if they are dirty.
    pub fn reachable(&mut self, a: CellId, b: CellId) -> bool {
        if a >= self.len() || b >= self.len() {
            return false;
        }
        self.update();
        self.components.equiv(a, b)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open grid neighbours to the same
    /// components. Only the down and right neighbours need to be visited.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for id in 0..self.len() {
            if self.cells[id].is_blocked() {
                continue;
            }
            let (row, col) = (self.cells[id].row() as i32, self.cells[id].col() as i32);
            [(row + 1, col), (row, col + 1)]
                .into_iter()
                .filter_map(|(r, c)| self.id_of(r, c))
                .filter(|&n| !self.cells[n].is_blocked())
                .collect::<SmallVec<[CellId; 2]>>()
                .into_iter()
                .for_each(|n| {
                    self.components.union(id, n);
                });
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            writeln!(f, "{}", row.iter().map(Cell::glyph).join(""))?;
        }
        Ok(())
    }
}
