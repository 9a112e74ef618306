use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use tracing::trace;

use crate::cell::Cell;
use crate::cell_set::CellSet;
use crate::pattern::Pattern;
use crate::rule_set::RuleSet;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// With birth on 0 neighbors every empty cell of the infinite plane comes alive, which cannot
    /// be represented by a set of live cells.
    #[error("Rule {0} births cells with no neighbors and cannot be simulated sparsely")]
    UnboundedRule(RuleSet),
}

/// The simulation engine.
///
/// Holds the live cells of the current generation together with the counters shown to the user.
/// Generations are double buffered: [`World::advance`] evaluates every candidate against the
/// current set and builds the next one separately, then swaps it in whole.
pub struct World {
    /// Live cells of the current generation
    current: CellSet,

    /// Cells to evaluate during an [`World::advance`]. Empty between ticks; kept around so its
    /// allocation can be reused.
    candidates: CellSet,

    rules: RuleSet,

    population: usize,

    /// Ticks since the last seed or reset
    iteration: u64,

    /// Sum of the tick durations passed to [`World::advance`] since the last seed or reset
    elapsed: Duration,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world running Conway's Life.
    pub fn new() -> Self {
        Self {
            current: CellSet::new(),
            candidates: CellSet::new(),
            rules: RuleSet::default(),
            population: 0,
            iteration: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Create an empty world running `rules`.
    pub fn with_rules(rules: RuleSet) -> Result<Self, WorldError> {
        if rules.is_born(0) {
            return Err(WorldError::UnboundedRule(rules));
        }

        Ok(Self {
            rules,
            ..Self::new()
        })
    }

    /// Replace the whole state with `cells`. Counters start over and duplicates collapse.
    pub fn seed<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Cell>,
    {
        self.clear_state();
        self.current.extend(cells);
        self.population = self.current.len();

        debug!(population = self.population, "seeded world");
    }

    /// Seed with `pattern`, centered on the origin.
    pub fn seed_pattern(&mut self, pattern: &Pattern) {
        self.seed(pattern.centered());
    }

    /// Kill every cell and zero the counters. Same as seeding with nothing.
    pub fn reset(&mut self) {
        self.clear_state();

        debug!("reset world");
    }

    fn clear_state(&mut self) {
        self.current.clear();
        self.candidates.clear();
        self.population = 0;
        self.iteration = 0;
        self.elapsed = Duration::ZERO;
    }

    /// Compute the next generation and swap it in, then count the tick.
    pub fn advance(&mut self, tick: Duration) {
        // Every cell that can change is alive or next to a live cell
        self.candidates.clear();
        for cell in &self.current {
            self.candidates.extend(cell.block());
        }

        let candidates = self.candidates.len();

        // Evaluated only against `current`, never against the set being built
        let mut next = CellSet::with_capacity(self.current.len());
        for cell in &self.candidates {
            let alive = self.current.contains(cell);
            let neighbors = self.current.count_neighbors(cell);

            if self.rules.next_state(alive, neighbors) {
                next.insert(cell);
            }
        }

        self.candidates.clear();
        self.current = next;

        self.population = self.current.len();
        self.iteration += 1;
        self.elapsed += tick;

        trace!(
            iteration = self.iteration,
            population = self.population,
            candidates,
            "advanced generation"
        );
    }

    /// Advance `n` times with the same tick duration.
    pub fn advance_n(&mut self, n: u64, tick: Duration) {
        for _ in 0..n {
            self.advance(tick);
        }
    }

    pub fn cells(&self) -> &CellSet {
        &self.current
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.current.contains(cell)
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }
}
