use std::collections::HashSet;
use std::collections::hash_set;
use std::fmt;

use crate::Coord;
use crate::cell::Cell;

/// A set of live cells.
///
/// Only live cells are ever stored, so memory is proportional to the population, not to the area
/// the population spans. Every operation is total over the whole coordinate range.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CellSet {
    cells: HashSet<Cell>,
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: HashSet::with_capacity(capacity),
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Mark `cell` alive. Inserting a live cell again does nothing.
    pub fn insert(&mut self, cell: Cell) {
        self.cells.insert(cell);
    }

    /// Mark `cell` dead. Removing a dead cell does nothing.
    pub fn remove(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Visits every live cell exactly once, in no particular order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.cells.iter(),
        }
    }

    /// Number of live cells among the 8 neighbors of `cell`.
    pub fn count_neighbors(&self, cell: Cell) -> u8 {
        cell.neighbors().filter(|&n| self.contains(n)).count() as u8
    }

    /// Smallest rectangle holding every live cell, as `(min, max)` corners (both inclusive).
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        let mut iter = self.iter();
        let first = iter.next()?;

        let bounds = iter.fold((first, first), |(min, max), c| {
            (
                Cell::new(min.x.min(c.x), min.y.min(c.y)),
                Cell::new(max.x.max(c.x), max.y.max(c.y)),
            )
        });

        Some(bounds)
    }

    /// Live cells in row-major order. Useful wherever output has to be deterministic.
    pub fn sorted(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.iter().collect();
        cells.sort_unstable();
        cells
    }
}

pub struct Iter<'a> {
    inner: hash_set::Iter<'a, Cell>,
}

impl Iterator for Iter<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a CellSet {
    type Item = Cell;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(Coord, Coord)> for CellSet {
    fn from_iter<I: IntoIterator<Item = (Coord, Coord)>>(iter: I) -> Self {
        iter.into_iter().map(Cell::from).collect()
    }
}

impl Extend<Cell> for CellSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

/// Bounding boxes up to this many cells are always printed as a picture.
const PLAINTEXT_AREA: u128 = 1 << 12;

/// Larger boxes are printed as a picture only while they hold at least one live cell in this many.
const PLAINTEXT_SPARSITY: u128 = 64;

/// Prints the bounding box in plaintext pattern notation: `O` for live cells, `.` for dead ones,
/// top row first. There is no trailing newline, and an empty set prints nothing.
///
/// A box too sparse to draw, such as two cells far apart, is printed as one `x y` line per live
/// cell in row-major order instead, so the output follows the population rather than the area.
impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((min, max)) = self.bounds() else {
            return Ok(());
        };

        let w = u128::from(min.x.abs_diff(max.x)) + 1;
        let h = u128::from(min.y.abs_diff(max.y)) + 1;

        if w * h > PLAINTEXT_AREA.max(self.len() as u128 * PLAINTEXT_SPARSITY) {
            for (i, c) in self.sorted().into_iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }

                write!(f, "{} {}", c.x, c.y)?;
            }

            return Ok(());
        }

        for y in min.y..=max.y {
            if y > min.y {
                writeln!(f)?;
            }

            for x in min.x..=max.x {
                let c = if self.contains(Cell::new(x, y)) { 'O' } else { '.' };
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.sorted()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::CellSet;
    use crate::cell::Cell;

    #[test]
    fn insert_is_idempotent() {
        let mut set = CellSet::new();
        set.insert(Cell::new(1, 2));
        set.insert(Cell::new(1, 2));

        assert_eq!(set.len(), 1);
        assert!(set.contains(Cell::new(1, 2)));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut set: CellSet = [(0, 0), (3, 3)].into_iter().collect();
        set.remove(Cell::new(0, 0));
        set.remove(Cell::new(0, 0));
        set.remove(Cell::new(9, 9));

        assert_eq!(set.len(), 1);
        assert!(!set.contains(Cell::new(0, 0)));
    }

    #[test]
    fn clear_empties() {
        let mut set: CellSet = [(0, 0), (-4, 7)].into_iter().collect();
        set.clear();

        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn extreme_coordinates() {
        let far = Cell::new(i64::MIN, i64::MAX);
        let mut set = CellSet::new();
        set.insert(far);

        assert!(set.contains(far));
        assert_eq!(set.bounds(), Some((far, far)));
    }

    #[test]
    fn iteration_visits_each_cell_once() {
        let set: CellSet = [(0, 0), (1, 0), (0, 1), (1, 0)].into_iter().collect();
        let mut seen: Vec<Cell> = set.iter().collect();
        seen.sort();

        assert_eq!(seen, [Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1)]);
        assert_eq!(set.iter().len(), 3);
    }

    #[test]
    fn neighbor_count_ignores_self() {
        let set: CellSet = [(0, 0), (1, 0), (0, 1), (1, 1)].into_iter().collect();

        assert_eq!(set.count_neighbors(Cell::new(0, 0)), 3);
        assert_eq!(set.count_neighbors(Cell::new(2, 2)), 1);
        assert_eq!(set.count_neighbors(Cell::new(5, 5)), 0);
    }

    #[test]
    fn bounds_of_scattered_cells() {
        let set: CellSet = [(3, -1), (-2, 4), (0, 0)].into_iter().collect();

        assert_eq!(set.bounds(), Some((Cell::new(-2, -1), Cell::new(3, 4))));
        assert_eq!(CellSet::new().bounds(), None);
    }

    #[test]
    fn display_plaintext() {
        let set: CellSet = [(0, 0), (2, 0), (1, 1)].into_iter().collect();

        assert_eq!(set.to_string(), "O.O\n.O.");
        assert_eq!(CellSet::new().to_string(), "");
    }

    #[test]
    fn display_sparse_as_coordinates() {
        let far: CellSet = [(i64::MAX, 0), (i64::MIN, -3), (0, 0)].into_iter().collect();

        assert_eq!(
            far.to_string(),
            format!("{} -3\n0 0\n{} 0", i64::MIN, i64::MAX)
        );

        // 100 cells wide but well under the picture limit
        let line: CellSet = [(0, 0), (99, 0)].into_iter().collect();
        assert_eq!(line.to_string().len(), 100);
    }
}
