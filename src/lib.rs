//! Conway's Game of Life on an unbounded plane.
//!
//! Only live cells are stored. Each generation looks at the live cells and their neighbors and
//! nothing else, so the cost of a step follows the population instead of the area it covers.

pub mod camera;
pub mod cell;
pub mod cell_set;
pub mod config;
pub mod events;
pub mod io;
pub mod parse_rle;
pub mod parse_util;
pub mod pattern;
pub mod rule_set;
pub mod scheduler;
pub mod world;

/// A coordinate on the simulation plane.
pub type Coord = i64;
