use thiserror::Error;
use tracing::warn;

use crate::Coord;
use crate::parse_util;
use crate::parse_util::ParseError;
use crate::parse_util::ParseResult;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

/// Everything an RLE file says besides its cells.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RleFile {
    pub name: Option<String>,
    pub author: Option<String>,
    pub comments: Vec<String>,

    /// Width and height from the header line
    pub size: Option<(Coord, Coord)>,

    /// Top-left corner from a `#P` or `#R` line
    pub offset: Option<(Coord, Coord)>,

    pub rule: Option<RuleSet>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Line {line}: {kind}")]
pub struct RleError {
    pub line: usize,

    #[source]
    pub kind: RleErrorKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RleErrorKind {
    #[error("No comment type")]
    NoCommentType,

    #[error("Invalid comment type, found '{got}'")]
    InvalidCommentType { got: char },

    #[error("Empty name line")]
    EmptyName,

    #[error("Empty author line")]
    EmptyAuthor,

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),

    #[error("Run length does not fit in a coordinate")]
    RunLength,

    #[error("Pattern runs off the edge of the plane")]
    Coordinate,

    #[error("Pattern has more than {max} live cells")]
    TooManyCells { max: u64 },

    #[error("Unrecognized character '{got}'")]
    UnrecognizedToken { got: char },

    #[error("Unexpected end of input, expected '!'")]
    UnexpectedEof,
}

/// Parse the RLE format, calling `f` with the position of every live cell. `x` grows to the right
/// and `y` grows downwards, starting from `(0, 0)` unless the file carries a `#P`/`#R` offset.
///
/// Multi-state files are folded to two states: any state other than dead counts as alive.
///
/// See: https://conwaylife.com/wiki/Run_Length_Encoded
pub fn read_rle<F>(text: &str, mut f: F) -> Result<RleFile, RleError>
where
    F: FnMut(Coord, Coord),
{
    let mut file = RleFile::default();
    let mut lines = text.lines().enumerate().peekable();

    // Comment lines, then an optional header line
    while let Some(&(i, line)) = lines.peek() {
        let at = |kind| RleError { line: i + 1, kind };
        let bytes = parse_util::take_ws(line.as_bytes());

        match parse_util::peek_1(bytes) {
            None => {}
            Some(b'#') => read_line_comment(&bytes[1..], &mut file).map_err(at)?,
            Some(b'x') => {
                read_line_header(bytes, &mut file).map_err(at)?;
                lines.next();
                break;
            }
            Some(_) => break,
        }

        lines.next();
    }

    let mut decoder = Decoder::new(file.offset.unwrap_or_default());
    let mut last = 0;

    for (i, line) in lines {
        let at = |kind| RleError { line: i + 1, kind };
        last = i + 1;

        if decoder
            .feed(line.as_bytes(), &mut f)
            .map_err(at)?
        {
            return Ok(file);
        }
    }

    Err(RleError {
        line: last,
        kind: RleErrorKind::UnexpectedEof,
    })
}

fn read_line_comment(bytes: &[u8], file: &mut RleFile) -> Result<(), RleErrorKind> {
    let (Some(b), bytes) = parse_util::take_1(bytes) else {
        return Err(RleErrorKind::NoCommentType);
    };

    let bytes = parse_util::trim_end(parse_util::take_ws(bytes));
    let text = || String::from_utf8_lossy(bytes).into_owned();

    match b {
        // Comment line
        b'C' | b'c' => file.comments.push(text()),

        // Pattern name
        b'N' => {
            if bytes.is_empty() {
                return Err(RleErrorKind::EmptyName);
            }

            if file.name.is_some() {
                warn!("RLE file name already defined. Using latest");
            }

            file.name = Some(text());
        }

        // Pattern author
        b'O' => {
            if bytes.is_empty() {
                return Err(RleErrorKind::EmptyAuthor);
            }

            if file.author.is_some() {
                warn!("RLE author already defined. Using latest");
            }

            file.author = Some(text());
        }

        // Pattern offset
        b'P' | b'R' => {
            let (x, bytes) = parse_util::take_until_ws(bytes);
            let (y, _) = parse_util::take_until_ws(parse_util::take_ws(bytes));

            let x = parse_util::convert(x.unwrap_or_default())?;
            let y = parse_util::convert(y.unwrap_or_default())?;

            file.offset = Some((x, y));
        }

        // Pattern rules
        b'r' => {
            let rule = text().parse::<RuleSet>()?;

            file.rule = Some(rule);
        }

        b => return Err(RleErrorKind::InvalidCommentType { got: b as char }),
    }

    Ok(())
}

/// `x = m, y = n[, rule = abc]`
fn read_line_header(bytes: &[u8], file: &mut RleFile) -> Result<(), RleErrorKind> {
    let (w, bytes) = read_assignment(b"x", bytes)?;
    let bytes = parse_util::expect(b',', bytes)?;
    let (h, bytes) = read_assignment(b"y", parse_util::take_ws(bytes))?;

    file.size = Some((parse_util::convert(w)?, parse_util::convert(h)?));

    let bytes = parse_util::take_ws(bytes);
    if bytes.is_empty() {
        return Ok(());
    }

    let bytes = parse_util::expect(b',', bytes)?;
    let (rule, _) = read_assignment(b"rule", parse_util::take_ws(bytes))?;
    let rule = String::from_utf8_lossy(rule).parse::<RuleSet>()?;

    if file.rule.is_some_and(|r| r != rule) {
        warn!("Header rule {rule} overrides the #r comment rule");
    }

    file.rule = Some(rule);

    Ok(())
}

/// Reads `key = value`, where the value runs up to the next `,` or the end of the line.
fn read_assignment<'a>(key: &[u8], bytes: &'a [u8]) -> ParseResult<(&'a [u8], &'a [u8])> {
    let bytes = parse_util::expect_slice(key, bytes)?;
    let bytes = parse_util::take_ws(bytes);
    let bytes = parse_util::expect(b'=', bytes)?;
    let bytes = parse_util::take_ws(bytes);

    let (value, bytes) = parse_util::take_until(b',', bytes);

    Ok((parse_util::trim_end(value.unwrap_or_default()), bytes))
}

/// Upper bound on the live cells of one file.
pub const MAX_CELLS: u64 = 1 << 26;

/// Run-length decoder for the pattern body. Runs may span line breaks.
struct Decoder {
    /// Column every row starts at
    left: Coord,
    x: Coord,
    y: Coord,
    run: Option<Coord>,

    /// Live cells emitted so far
    cells: u64,
}

impl Decoder {
    fn new((x, y): (Coord, Coord)) -> Self {
        Self {
            left: x,
            x,
            y,
            run: None,
            cells: 0,
        }
    }

    /// Returns `true` once the terminating `!` has been read.
    fn feed<F>(&mut self, bytes: &[u8], f: &mut F) -> Result<bool, RleErrorKind>
    where
        F: FnMut(Coord, Coord),
    {
        for &b in bytes {
            match b {
                b'0'..=b'9' => {
                    let digit = Coord::from(b - b'0');
                    let run = self
                        .run
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|r| r.checked_add(digit))
                        .ok_or(RleErrorKind::RunLength)?;

                    self.run = Some(run);
                }

                // End of pattern
                b'!' => return Ok(true),

                // End of row
                b'$' => {
                    self.y = advance(self.y, self.take_run())?;
                    self.x = self.left;
                }

                // Dead cells
                b'b' | b'.' => {
                    self.x = advance(self.x, self.take_run())?;
                }

                // Live cells, `o` or any named state of a multi-state rule
                b if b.is_ascii_alphabetic() => {
                    let n = self.take_run();
                    let end = advance(self.x, n)?;

                    self.cells = self
                        .cells
                        .saturating_add(n.unsigned_abs())
                        .min(MAX_CELLS + 1);
                    if self.cells > MAX_CELLS {
                        return Err(RleErrorKind::TooManyCells { max: MAX_CELLS });
                    }

                    for x in self.x..end {
                        f(x, self.y);
                    }

                    self.x = end;
                }

                b if b.is_ascii_whitespace() => {}

                b => return Err(RleErrorKind::UnrecognizedToken { got: b as char }),
            }
        }

        Ok(false)
    }

    fn take_run(&mut self) -> Coord {
        self.run.take().unwrap_or(1)
    }
}

fn advance(at: Coord, run: Coord) -> Result<Coord, RleErrorKind> {
    at.checked_add(run).ok_or(RleErrorKind::Coordinate)
}
