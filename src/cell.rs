use grid_util::point::Point;

/// Row-major index of a cell, `row * cols + col`.
pub type CellId = usize;

/// The user-assigned role of a cell. Roles are mutually exclusive; the [Grid](crate::Grid)
/// setters are the only way to change them and enforce that exclusivity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellRole {
    #[default]
    Empty,
    Source,
    Target,
    Blocked,
}

impl CellRole {
    /// Source and target are the endpoints of a search.
    pub fn is_endpoint(self) -> bool {
        matches!(self, CellRole::Source | CellRole::Target)
    }
}

/// Transient state written by a search. Cleared wholesale by
/// [clear_algorithm_marks](crate::Grid::clear_algorithm_marks).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Marks {
    pub visited: bool,
    pub on_frontier: bool,
    /// Part of the live best-known path to the cell currently being expanded.
    pub previewed: bool,
    pub current: bool,
    /// Part of the final reconstructed path.
    pub on_path: bool,
    /// Set on the target once it has been reached.
    pub found: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    row: usize,
    col: usize,
    role: CellRole,
    marks: Marks,
    distance: Option<i32>,
}

impl Cell {
    pub(crate) fn new(id: CellId, row: usize, col: usize) -> Cell {
        Cell {
            id,
            row,
            col,
            role: CellRole::Empty,
            marks: Marks::default(),
            distance: None,
        }
    }
    pub fn id(&self) -> CellId {
        self.id
    }
    pub fn row(&self) -> usize {
        self.row
    }
    pub fn col(&self) -> usize {
        self.col
    }
    /// The cell position as a [Point] with `x` the column and `y` the row.
    pub fn point(&self) -> Point {
        Point::new(self.col as i32, self.row as i32)
    }
    pub fn role(&self) -> CellRole {
        self.role
    }
    pub fn marks(&self) -> Marks {
        self.marks
    }
    /// BFS depth or A* gScore recorded for this cell during the last search, if any.
    pub fn distance(&self) -> Option<i32> {
        self.distance
    }
    pub fn is_source(&self) -> bool {
        self.role == CellRole::Source
    }
    pub fn is_target(&self) -> bool {
        self.role == CellRole::Target
    }
    pub fn is_blocked(&self) -> bool {
        self.role == CellRole::Blocked
    }
    pub fn is_visited(&self) -> bool {
        self.marks.visited
    }

    pub(crate) fn set_role(&mut self, role: CellRole) {
        self.role = role;
    }
    pub(crate) fn marks_mut(&mut self) -> &mut Marks {
        &mut self.marks
    }
    pub(crate) fn set_distance(&mut self, distance: i32) {
        self.distance = Some(distance);
    }
    pub(crate) fn clear_marks(&mut self) {
        self.marks = Marks::default();
        self.distance = None;
    }
    /// Endpoint and blocked cells keep their own colouring, so only plain cells take
    /// preview and path marks.
    pub(crate) fn takes_path_marks(&self) -> bool {
        self.role == CellRole::Empty
    }

    /// Glyph used by the grid's [Display](std::fmt::Display) rendering.
    pub fn glyph(&self) -> char {
        match self.role {
            CellRole::Source => 'S',
            CellRole::Target => 'T',
            CellRole::Blocked => '#',
            CellRole::Empty if self.marks.on_path => '*',
            CellRole::Empty if self.marks.previewed => '+',
            CellRole::Empty if self.marks.visited => 'o',
            CellRole::Empty => '.',
        }
    }
}
