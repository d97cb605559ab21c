//! CLIP status line decoding.
//!
//! The server's client interface protocol has no grammar: every record is a
//! line of words whose shape is known only by example. A [`Classifier`]
//! walks a ranked table of [`Rule`]s, hands the line to the first decoder
//! that claims it and returns an [`Event`] holding typed [`Token`]s.
//!
//! ```
//! use strictly_fibs::{EventKind, Token, parse_line};
//!
//! let event = parse_line("JoeBlack rolls 3 and 4.");
//! assert_eq!(event.kind(), EventKind::Rolls);
//! assert_eq!(event.tokens()[1], Token::Unsigned(3));
//! ```

mod board_state;
mod classifier;
mod decoders;
mod error;
mod event;
mod line;
mod token;

pub use board_state::{BoardState, BoardStateError};
pub use classifier::{Category, Classifier, RULES, Rule, RuleGroup, classify, decode_line, parse_line};
pub use decoders::echoes::{SETTINGS, TOGGLES};
pub use decoders::phrases::movement;
pub use error::{DecodeError, DecodeErrorKind};
pub use event::{Event, EventKind};
pub use line::{Line, chomp};
pub use token::{Token, TokenError, TokenKind, TokenReader};
