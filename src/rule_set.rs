use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// An outer-totalistic life-like rule.
///
/// # Representation
/// Rules are packed into a single word
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
/// where bit `n` of either half means "`n` live neighbors".
///
/// Life itself is `0x0008_000C`, HighLife (B36/S23) is `0x0048_000C`.
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and `s`, bit `i`
    /// set means `i` is included. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub const fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub const fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a dead cell with `neighbors` live neighbors comes alive.
    pub const fn is_born(&self, neighbors: u8) -> bool {
        neighbors <= 8 && self.births() & (1 << neighbors) != 0
    }

    /// Whether a live cell with `neighbors` live neighbors stays alive.
    pub const fn survives(&self, neighbors: u8) -> bool {
        neighbors <= 8 && self.survivals() & (1 << neighbors) != 0
    }

    /// State of a cell in the next generation.
    pub const fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survives(neighbors)
        } else {
            self.is_born(neighbors)
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Empty rule")]
    Empty,

    #[error("Expected a neighbor count in 0..=8, found '{got}'")]
    InvalidCount { got: char },

    #[error("Neighbor count {n} listed twice")]
    Duplicate { n: u8 },

    #[error("Unexpected '{got}' in rule")]
    UnexpectedToken { got: char },
}

/// Parses both the B/S notation (`B3/S23`, `b3s23`) and the traditional S/B notation found in
/// older RLE files (`23/3`, survivals first).
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RuleError::Empty);
        }

        if s.starts_with(['b', 'B']) {
            parse_bs(s)
        } else {
            parse_nameless(s)
        }
    }
}

// Parse rules that look like b3/s23
fn parse_bs(s: &str) -> Result<RuleSet, RuleError> {
    enum State {
        Birth,
        Survival,
    }

    let mut state = State::Birth;
    let (mut b, mut s_mask) = (0u16, 0u16);

    for c in s.chars() {
        match c {
            'b' | 'B' => state = State::Birth,
            's' | 'S' => state = State::Survival,
            '/' => {}
            c => {
                let mask = match state {
                    State::Birth => &mut b,
                    State::Survival => &mut s_mask,
                };

                add_count(mask, c)?;
            }
        }
    }

    Ok(RuleSet::new(b, s_mask))
}

// Parse rules that look like 23/3. These show up in RLE #r comment lines.
fn parse_nameless(s: &str) -> Result<RuleSet, RuleError> {
    let Some((survivals, births)) = s.split_once('/') else {
        let got = s.chars().find(|c| !c.is_ascii_digit()).unwrap_or('/');
        return Err(RuleError::UnexpectedToken { got });
    };

    let mut b = 0;
    let mut s_mask = 0;

    for c in births.chars() {
        add_count(&mut b, c)?;
    }

    for c in survivals.chars() {
        add_count(&mut s_mask, c)?;
    }

    Ok(RuleSet::new(b, s_mask))
}

fn add_count(mask: &mut u16, c: char) -> Result<(), RuleError> {
    let n = match c.to_digit(10) {
        Some(n) if n <= 8 => n as u8,
        Some(_) => return Err(RuleError::InvalidCount { got: c }),
        None => return Err(RuleError::UnexpectedToken { got: c }),
    };

    if *mask & (1 << n) != 0 {
        return Err(RuleError::Duplicate { n });
    }

    *mask |= 1 << n;

    Ok(())
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |mask: u16| -> String {
            (0..=8)
                .filter(|n| mask & (1 << n) != 0)
                .map(|n| char::from(b'0' + n as u8))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}
