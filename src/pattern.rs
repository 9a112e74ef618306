//! Seed patterns.
//!
//! A [`Pattern`] is a list of live cells in its own coordinates, usually read from an RLE file.
//! [`Pattern::centered`] moves it so the middle of its bounding box lands on the origin, which is
//! what the world is seeded with.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::Coord;
use crate::cell::Cell;
use crate::parse_rle;
use crate::parse_rle::RleError;
use crate::rule_set::RuleSet;

/// Built-in patterns as `(name, rle)`.
const BUILTINS: &[(&str, &str)] = &[
    ("block", "2o$2o!"),
    ("blinker", "3o!"),
    ("glider", "bo$2bo$3o!"),
    ("r-pentomino", "b2o$2o$bo!"),
    ("acorn", "bo$3bo$2o2b3o!"),
    ("diehard", "6bob$2o6b$bo3b3o!"),
    (
        "gosper-glider-gun",
        "24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$2o8bo3bob2o4bo\
         bo$10bo5bo7bo$11bo3bo$12b2o!",
    ),
];

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Unknown pattern \"{name}\", expected one of: {}", builtin_names().collect::<Vec<_>>().join(", "))]
    UnknownBuiltin { name: String },

    #[error("Failed to read pattern file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid RLE: {0}")]
    Rle(#[from] RleError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    pub name: Option<String>,

    /// Rule the pattern was designed for, if the source says so
    pub rule: Option<RuleSet>,

    pub cells: Vec<Cell>,
}

impl Pattern {
    pub fn new<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        Self {
            name: None,
            rule: None,
            cells: cells.into_iter().collect(),
        }
    }

    pub fn from_rle(text: &str) -> Result<Self, RleError> {
        let mut cells = Vec::new();
        let file = parse_rle::read_rle(text, |x, y| cells.push(Cell::new(x, y)))?;

        Ok(Self {
            name: file.name,
            rule: file.rule,
            cells,
        })
    }

    /// Read an RLE file from disk. Files without a `#N` line are named after the file stem.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut pattern = Self::from_rle(&text)?;

        if pattern.name.is_none() {
            pattern.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }

        Ok(pattern)
    }

    /// Look up a built-in pattern by name, e.g. `"glider"` or `"r-pentomino"`.
    pub fn builtin(name: &str) -> Result<Self, PatternError> {
        let Some(&(name, rle)) = BUILTINS.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)) else {
            return Err(PatternError::UnknownBuiltin {
                name: name.to_string(),
            });
        };

        let mut pattern = Self::from_rle(rle)?;
        pattern.name = Some(name.to_string());

        Ok(pattern)
    }

    /// Midpoint of the bounding box, rounded toward zero. `(0, 0)` for an empty pattern.
    pub fn center(&self) -> Cell {
        let Some((&first, rest)) = self.cells.split_first() else {
            return Cell::ORIGIN;
        };

        let (mut min, mut max) = (first, first);
        for c in rest {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }

        // The sum needs 65 bits; the halved result always fits back in a `Coord`
        let mid = |a: Coord, b: Coord| ((i128::from(a) + i128::from(b)) / 2) as Coord;

        Cell::new(mid(min.x, max.x), mid(min.y, max.y))
    }

    /// The cells moved so [`Pattern::center`] sits on the origin.
    pub fn centered(&self) -> impl Iterator<Item = Cell> + '_ {
        let center = self.center();

        self.cells
            .iter()
            .map(move |c| Cell::new(c.x - center.x, c.y - center.y))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Names accepted by [`Pattern::builtin`].
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|&(name, _)| name)
}
