//! Decode errors.

use derive_more::{Display, Error};
use tracing::instrument;

/// What a field decoder objected to.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DecodeErrorKind {
    /// The record has the wrong number of tokens.
    #[display("expected {} tokens, found {}", expected, found)]
    Arity {
        /// Accepted token counts.
        expected: &'static str,
        /// Actual token count.
        found: usize,
    },

    /// A fixed word is missing or misspelled.
    #[display("expected '{}' at token {}", expected, index)]
    MissingLiteral {
        /// Required word.
        expected: &'static str,
        /// Token index.
        index: usize,
    },

    /// A field could not be parsed.
    #[display("field {} is not valid: '{}'", field, value)]
    MalformedField {
        /// Field name.
        field: &'static str,
        /// Offending text.
        value: String,
    },

    /// A numeric field is outside its documented bounds.
    #[display("field {} = {} is out of range", field, value)]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: i64,
    },

    /// The numeric code has no decoder.
    #[display("no decoder for message code {}", _0)]
    UnknownCode(u8),

    /// No classification rule matched.
    #[display("line matches no known record")]
    Unrecognized,
}

/// Decode error with the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Decode error: {} at {}:{}", kind, file, line)]
pub struct DecodeError {
    /// What went wrong.
    pub kind: DecodeErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DecodeError {
    /// Creates a new decode error.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: DecodeErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a wrong token count.
    #[track_caller]
    pub fn arity(expected: &'static str, found: usize) -> Self {
        Self::new(DecodeErrorKind::Arity { expected, found })
    }

    /// Shorthand for a missing fixed word.
    #[track_caller]
    pub fn literal(expected: &'static str, index: usize) -> Self {
        Self::new(DecodeErrorKind::MissingLiteral { expected, index })
    }

    /// Shorthand for an unparsable field.
    #[track_caller]
    pub fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::MalformedField {
            field,
            value: value.into(),
        })
    }

    /// Shorthand for an out-of-range field.
    #[track_caller]
    pub fn out_of_range(field: &'static str, value: i64) -> Self {
        Self::new(DecodeErrorKind::OutOfRange { field, value })
    }
}

impl PartialEq for DecodeError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}
