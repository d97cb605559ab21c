//! Tagged scalar values produced by the field decoders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a [`Token`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Signed integer.
    Integer,
    /// Unsigned integer.
    Unsigned,
    /// Floating point number.
    Real,
    /// Boolean flag.
    Boolean,
    /// Short identifier such as a player name.
    Identifier,
    /// Free text.
    Text,
    /// Seconds since the Unix epoch.
    Timestamp,
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer.
    Unsigned(u64),
    /// Floating point number.
    Real(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Short identifier such as a player name.
    Identifier(String),
    /// Free text.
    Text(String),
    /// Seconds since the Unix epoch.
    Timestamp(i64),
}

impl Token {
    /// Returns the kind of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Integer(_) => TokenKind::Integer,
            Token::Unsigned(_) => TokenKind::Unsigned,
            Token::Real(_) => TokenKind::Real,
            Token::Boolean(_) => TokenKind::Boolean,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Text(_) => TokenKind::Text,
            Token::Timestamp(_) => TokenKind::Timestamp,
        }
    }

    /// Builds an identifier token.
    pub fn identifier(value: impl Into<String>) -> Self {
        Token::Identifier(value.into())
    }

    /// Builds a text token.
    pub fn text(value: impl Into<String>) -> Self {
        Token::Text(value.into())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Integer(value) | Token::Timestamp(value) => write!(f, "{}", value),
            Token::Unsigned(value) => write!(f, "{}", value),
            Token::Real(value) => write!(f, "{}", value),
            Token::Boolean(value) => write!(f, "{}", value),
            Token::Identifier(value) | Token::Text(value) => write!(f, "{}", value),
        }
    }
}

/// Error raised when a token sequence is read with the wrong schema.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TokenError {
    /// The next token has another kind.
    #[display("expected {} at position {} but found {}", expected, position, found)]
    KindMismatch {
        /// Requested kind.
        expected: TokenKind,
        /// Kind actually present.
        found: TokenKind,
        /// Index of the offending token.
        position: usize,
    },

    /// No tokens are left.
    #[display("expected {} at position {} but the event has ended", expected, position)]
    Exhausted {
        /// Requested kind.
        expected: TokenKind,
        /// Index that was requested.
        position: usize,
    },

    /// Tokens remain after the last expected one.
    #[display("{} unread tokens left at position {}", remaining, position)]
    Unconsumed {
        /// Number of unread tokens.
        remaining: usize,
        /// Index of the first unread token.
        position: usize,
    },

    /// A timestamp does not fit the calendar.
    #[display("timestamp {} is out of range", _0)]
    TimestampOutOfRange(i64),
}

impl std::error::Error for TokenError {}

/// Position-advancing typed reader over an event's tokens.
///
/// A failed read leaves the reader where it was.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> TokenReader<'a> {
    /// Starts reading at the first token.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn take<T>(
        &mut self,
        expected: TokenKind,
        extract: impl FnOnce(&'a Token) -> Option<T>,
    ) -> Result<T, TokenError> {
        let token = self
            .tokens
            .get(self.position)
            .ok_or(TokenError::Exhausted {
                expected,
                position: self.position,
            })?;
        let value = extract(token).ok_or(TokenError::KindMismatch {
            expected,
            found: token.kind(),
            position: self.position,
        })?;
        self.position += 1;
        Ok(value)
    }

    /// Reads a signed integer.
    pub fn next_integer(&mut self) -> Result<i64, TokenError> {
        self.take(TokenKind::Integer, |token| match token {
            Token::Integer(value) => Some(*value),
            _ => None,
        })
    }

    /// Reads an unsigned integer.
    pub fn next_unsigned(&mut self) -> Result<u64, TokenError> {
        self.take(TokenKind::Unsigned, |token| match token {
            Token::Unsigned(value) => Some(*value),
            _ => None,
        })
    }

    /// Reads a floating point number.
    pub fn next_real(&mut self) -> Result<f64, TokenError> {
        self.take(TokenKind::Real, |token| match token {
            Token::Real(value) => Some(*value),
            _ => None,
        })
    }

    /// Reads a boolean.
    pub fn next_boolean(&mut self) -> Result<bool, TokenError> {
        self.take(TokenKind::Boolean, |token| match token {
            Token::Boolean(value) => Some(*value),
            _ => None,
        })
    }

    /// Reads an identifier.
    pub fn next_identifier(&mut self) -> Result<&'a str, TokenError> {
        self.take(TokenKind::Identifier, |token| match token {
            Token::Identifier(value) => Some(value.as_str()),
            _ => None,
        })
    }

    /// Reads free text.
    pub fn next_text(&mut self) -> Result<&'a str, TokenError> {
        self.take(TokenKind::Text, |token| match token {
            Token::Text(value) => Some(value.as_str()),
            _ => None,
        })
    }

    /// Reads a timestamp as seconds since the epoch.
    pub fn next_timestamp(&mut self) -> Result<i64, TokenError> {
        self.take(TokenKind::Timestamp, |token| match token {
            Token::Timestamp(value) => Some(*value),
            _ => None,
        })
    }

    /// Reads a timestamp as a UTC date.
    pub fn next_datetime(&mut self) -> Result<DateTime<Utc>, TokenError> {
        let seconds = self.clone().next_timestamp()?;
        let date =
            DateTime::from_timestamp(seconds, 0).ok_or(TokenError::TimestampOutOfRange(seconds))?;
        self.position += 1;
        Ok(date)
    }

    /// Number of tokens not read yet.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// Index of the next token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Confirms every token was read.
    pub fn finish(self) -> Result<(), TokenError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(TokenError::Unconsumed {
                remaining,
                position: self.position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_advances_in_order() {
        let tokens = vec![
            Token::identifier("guido"),
            Token::Timestamp(1234567890),
            Token::text("foobar"),
        ];
        let mut reader = TokenReader::new(&tokens);
        assert_eq!(reader.next_identifier().unwrap(), "guido");
        assert_eq!(reader.next_timestamp().unwrap(), 1234567890);
        assert_eq!(reader.next_text().unwrap(), "foobar");
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_mismatch_does_not_advance() {
        let tokens = vec![Token::Unsigned(3)];
        let mut reader = TokenReader::new(&tokens);
        assert_eq!(
            reader.next_integer(),
            Err(TokenError::KindMismatch {
                expected: TokenKind::Integer,
                found: TokenKind::Unsigned,
                position: 0,
            })
        );
        assert_eq!(reader.next_unsigned(), Ok(3));
        assert_eq!(
            reader.next_boolean(),
            Err(TokenError::Exhausted {
                expected: TokenKind::Boolean,
                position: 1,
            })
        );
    }

    #[test]
    fn test_finish_reports_leftovers() {
        let tokens = vec![Token::Boolean(true), Token::Boolean(false)];
        let mut reader = TokenReader::new(&tokens);
        reader.next_boolean().unwrap();
        assert_eq!(
            reader.finish(),
            Err(TokenError::Unconsumed {
                remaining: 1,
                position: 1,
            })
        );
    }

    #[test]
    fn test_datetime_conversion() {
        let tokens = vec![Token::Timestamp(0)];
        let mut reader = TokenReader::new(&tokens);
        let date = reader.next_datetime().unwrap();
        assert_eq!(date.timestamp(), 0);
    }

    #[test]
    fn test_kind_display_is_snake_case() {
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
        assert_eq!(Token::Real(1.5).kind(), TokenKind::Real);
    }
}
