//! Field decoders, one routine per record shape.
//!
//! A decoder receives a line its classification rule already picked and
//! either returns the full event or rejects the whole line. Decoders never
//! hand a line on to another decoder.

pub mod board;
pub mod codes;
pub mod echoes;
pub mod phrases;

use super::error::DecodeError;
use super::line::Line;
use std::ops::RangeInclusive;

/// Requires exactly `count` tokens.
#[track_caller]
pub(crate) fn exact(line: &Line, count: usize, expected: &'static str) -> Result<(), DecodeError> {
    if line.len() == count {
        Ok(())
    } else {
        Err(DecodeError::arity(expected, line.len()))
    }
}

/// Requires at least `count` tokens.
#[track_caller]
pub(crate) fn at_least(
    line: &Line,
    count: usize,
    expected: &'static str,
) -> Result<(), DecodeError> {
    if line.len() >= count {
        Ok(())
    } else {
        Err(DecodeError::arity(expected, line.len()))
    }
}

/// Requires token `index` to be exactly `expected`.
#[track_caller]
pub(crate) fn literal(line: &Line, index: usize, expected: &'static str) -> Result<(), DecodeError> {
    if line.token(index) == Some(expected) {
        Ok(())
    } else {
        Err(DecodeError::literal(expected, index))
    }
}

/// Requires token `index` to be one of `choices`, returning it.
#[track_caller]
pub(crate) fn one_of<'a>(
    line: &'a Line,
    index: usize,
    choices: &[&'static str],
    expected: &'static str,
) -> Result<&'a str, DecodeError> {
    match line.token(index) {
        Some(word) if choices.contains(&word) => Ok(word),
        _ => Err(DecodeError::literal(expected, index)),
    }
}

/// Raw text from token `index` on, without trailing whitespace.
#[track_caller]
pub(crate) fn remainder<'a>(line: &'a Line, index: usize) -> Result<&'a str, DecodeError> {
    line.rest(index)
        .map(str::trim_end)
        .ok_or_else(|| DecodeError::arity("more", line.len()))
}

/// Parses a signed integer within `range`.
#[track_caller]
pub(crate) fn integer(
    field: &'static str,
    text: &str,
    range: RangeInclusive<i64>,
) -> Result<i64, DecodeError> {
    let value: i64 = text
        .parse()
        .map_err(|_| DecodeError::malformed(field, text))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(DecodeError::out_of_range(field, value))
    }
}

/// Parses an unsigned integer within `range`.
#[track_caller]
pub(crate) fn unsigned(
    field: &'static str,
    text: &str,
    range: RangeInclusive<u64>,
) -> Result<u64, DecodeError> {
    let value: u64 = text
        .parse()
        .map_err(|_| DecodeError::malformed(field, text))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(DecodeError::out_of_range(
            field,
            i64::try_from(value).unwrap_or(i64::MAX),
        ))
    }
}

/// Parses a finite floating point number.
#[track_caller]
pub(crate) fn real(field: &'static str, text: &str) -> Result<f64, DecodeError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DecodeError::malformed(field, text)),
    }
}

/// Parses a `0`/`1` flag.
#[track_caller]
pub(crate) fn flag(field: &'static str, text: &str) -> Result<bool, DecodeError> {
    Ok(integer(field, text, 0..=1)? == 1)
}

/// Parses a match length where `unlimited` means 0.
#[track_caller]
pub(crate) fn match_length(field: &'static str, text: &str) -> Result<u64, DecodeError> {
    if text == "unlimited" {
        Ok(0)
    } else {
        unsigned(field, text, 1..=u64::MAX)
    }
}

/// Strips a pair of single quotes.
#[track_caller]
pub(crate) fn unquote<'a>(field: &'static str, text: &'a str) -> Result<&'a str, DecodeError> {
    text.strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .ok_or_else(|| DecodeError::malformed(field, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::DecodeErrorKind;

    #[test]
    fn test_integer_range_checked() {
        assert_eq!(integer("die", "6", 1..=6), Ok(6));
        assert_eq!(
            integer("die", "7", 1..=6).unwrap_err().kind,
            DecodeErrorKind::OutOfRange {
                field: "die",
                value: 7
            }
        );
        assert!(matches!(
            integer("die", "x", 1..=6).unwrap_err().kind,
            DecodeErrorKind::MalformedField { .. }
        ));
    }

    #[test]
    fn test_real_rejects_non_finite() {
        assert_eq!(real("rating", "1523.47"), Ok(1523.47));
        assert!(real("rating", "inf").is_err());
        assert!(real("rating", "NaN").is_err());
    }

    #[test]
    fn test_match_length_unlimited() {
        assert_eq!(match_length("length", "unlimited"), Ok(0));
        assert_eq!(match_length("length", "7"), Ok(7));
        assert!(match_length("length", "0").is_err());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("key", "'boardstyle'"), Ok("boardstyle"));
        assert!(unquote("key", "boardstyle'").is_err());
    }

    #[test]
    fn test_remainder_trims_trailing_space() {
        let line = Line::new("12 joe hi there  ");
        assert_eq!(remainder(&line, 2), Ok("hi there"));
        assert!(remainder(&line, 4).is_err());
    }
}
