use std::cmp::Ordering;
use std::fmt;

use crate::Coord;

/// Offsets of the 8 cells at Chebyshev distance 1, row by row.
pub const NEIGHBOR_OFFSETS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A position on the infinite simulation plane.
///
/// `x` grows to the right and `y` grows downwards, which matches the order rows are read from a
/// pattern file and printed to a terminal.
///
/// # Overflow
/// Neighbor arithmetic uses plain `+`. A live cell sitting on `Coord::MIN` or `Coord::MAX` will
/// panic in debug builds and wrap in release builds, exactly like any other `i64` addition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    pub const ORIGIN: Cell = Cell::new(0, 0);

    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// The cell translated by `(dx, dy)`.
    pub const fn offset(self, dx: Coord, dy: Coord) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The 8 surrounding cells. The cell itself is not included.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// The 3x3 block centered on this cell, the cell included.
    pub fn block(self) -> impl Iterator<Item = Cell> {
        (-1..=1).flat_map(move |dy| (-1..=1).map(move |dx| self.offset(dx, dy)))
    }

    /// Chebyshev (king move) distance between two cells.
    pub fn distance(self, other: Cell) -> u64 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);

        dx.max(dy)
    }
}

impl From<(Coord, Coord)> for Cell {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for (Coord, Coord) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

// Row-major, so sorting a list of cells reads like the grid does
impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
