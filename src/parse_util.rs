use std::str::FromStr;

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of line, expected '{exp}'")]
    UnexpectedEof { exp: char },

    #[error("Expected '{exp}', but got '{got}'")]
    UnexpectedToken { exp: char, got: char },

    #[error("Expected \"{exp}\", but got \"{got}\"")]
    UnexpectedSlice { exp: String, got: String },

    #[error("Failed to convert \"{str}\"")]
    Convert { str: String },
}

/// Consumes the slice until a non-ascii whitespace character is reached.
pub fn take_ws(bytes: &[u8]) -> &[u8] {
    let i = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());

    &bytes[i..]
}

/// Takes the next character from the slice. If none is found, the slice is left as-is.
pub const fn take_1(bytes: &[u8]) -> (Option<u8>, &[u8]) {
    let [b, bytes @ ..] = bytes else {
        return (None, bytes);
    };

    (Some(*b), bytes)
}

/// Like `take_1`, but doesn't consume the token
pub const fn peek_1(bytes: &[u8]) -> Option<u8> {
    let [b, ..] = bytes else { return None };

    Some(*b)
}

/// Expects the next character in `bytes` to be `b`.
pub fn expect(b: u8, bytes: &[u8]) -> ParseResult<&[u8]> {
    let (Some(a), bytes) = take_1(bytes) else {
        return Err(ParseError::UnexpectedEof { exp: b as char });
    };

    if a != b {
        return Err(ParseError::UnexpectedToken {
            exp: b as char,
            got: a as char,
        });
    }

    Ok(bytes)
}

/// Expects `bytes` to start with `bs`.
pub fn expect_slice<'a>(bs: &[u8], bytes: &'a [u8]) -> ParseResult<&'a [u8]> {
    match bytes.strip_prefix(bs) {
        Some(rest) => Ok(rest),
        None => {
            let n = bs.len().min(bytes.len());

            Err(ParseError::UnexpectedSlice {
                exp: String::from_utf8_lossy(bs).into_owned(),
                got: String::from_utf8_lossy(&bytes[..n]).into_owned(),
            })
        }
    }
}

/// Advance the slice until `P` is satisfied, without consuming the matching byte. If `P` is never
/// satisfied the whole slice is taken.
///
/// Returns `None` if nothing was taken.
pub fn take_until_fn<P>(p: P, bytes: &[u8]) -> (Option<&[u8]>, &[u8])
where
    P: Fn(u8) -> bool,
{
    let i = bytes.iter().position(|&b| p(b)).unwrap_or(bytes.len());

    if i == 0 {
        (None, bytes)
    } else {
        let (res, bytes) = bytes.split_at(i);

        (Some(res), bytes)
    }
}

/// Like `take_until_fn`, but stops at byte `b`.
pub fn take_until(b: u8, bytes: &[u8]) -> (Option<&[u8]>, &[u8]) {
    take_until_fn(|a| a == b, bytes)
}

/// Takes everything up to the first ascii whitespace character.
pub fn take_until_ws(bytes: &[u8]) -> (Option<&[u8]>, &[u8]) {
    take_until_fn(|a| a.is_ascii_whitespace(), bytes)
}

/// The slice with trailing ascii whitespace removed.
pub fn trim_end(bytes: &[u8]) -> &[u8] {
    let i = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);

    &bytes[..i]
}

/// Converts `&[u8]` to `T` if `T: FromStr`. Surrounding whitespace is ignored.
pub fn convert<T: FromStr>(bytes: &[u8]) -> ParseResult<T> {
    let str = String::from_utf8_lossy(bytes);

    let res = str.trim().parse::<T>();

    res.map_err(|_| ParseError::Convert {
        str: str.into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::ParseError;

    #[test]
    fn take_ws_full_ws() {
        assert_eq!(super::take_ws(b"  \t"), b"");
        assert_eq!(super::take_ws(b"  x "), b"x ");
    }

    #[test]
    fn take_until_stops_before_match() {
        let (taken, rest) = super::take_until(b',', b"12, y");

        assert_eq!(taken, Some(b"12".as_slice()));
        assert_eq!(rest, b", y");
    }

    #[test]
    fn take_until_without_match_takes_everything() {
        let (taken, rest) = super::take_until(b',', b"12");

        assert_eq!(taken, Some(b"12".as_slice()));
        assert_eq!(rest, b"");
        assert_eq!(super::take_until(b',', b",x"), (None, b",x".as_slice()));
    }

    #[test]
    fn expect_reports_token() {
        assert_eq!(super::expect(b'x', b"x=1"), Ok(b"=1".as_slice()));
        assert_eq!(
            super::expect(b'x', b"y=1"),
            Err(ParseError::UnexpectedToken { exp: 'x', got: 'y' })
        );
        assert_eq!(
            super::expect(b'x', b""),
            Err(ParseError::UnexpectedEof { exp: 'x' })
        );
    }

    #[test]
    fn expect_slice_reports_prefix() {
        assert_eq!(super::expect_slice(b"rule", b"rule = B3"), Ok(b" = B3".as_slice()));
        assert_eq!(
            super::expect_slice(b"rule", b"ru"),
            Err(ParseError::UnexpectedSlice {
                exp: "rule".to_string(),
                got: "ru".to_string(),
            })
        );
    }

    #[test]
    fn convert_numbers() {
        assert_eq!(super::convert::<i64>(b" -12 "), Ok(-12));
        assert_eq!(
            super::convert::<i64>(b"twelve"),
            Err(ParseError::Convert {
                str: "twelve".to_string()
            })
        );
    }

    #[test]
    fn trim_end_keeps_leading() {
        assert_eq!(super::trim_end(b" ab \r\n"), b" ab");
        assert_eq!(super::trim_end(b"   "), b"");
    }
}
