//! Strictly FIBS library - typed CLIP decoding and backgammon move checks
//!
//! FIBS, the First Internet Backgammon Server, speaks a line-oriented
//! "client interface protocol" (CLIP). This library turns those lines into
//! typed events and reconstructs the move a player made between two board
//! dumps.
//!
//! # Architecture
//!
//! - **Clip**: ranked line classifier, field decoders, typed tokens
//! - **Games**: backgammon positions, move candidates and the move checker
//! - **Replay**: batch decoding of recorded sessions
//! - **Config**: TOML settings for the command-line tool
//!
//! # Example
//!
//! ```
//! use strictly_fibs::{MoveStatus, Position, Side, check_move};
//!
//! let mut before = Position::initial();
//! before.set_dice(3, 1);
//! let mut after = Position::initial();
//! after.set_point(8, 2)?;
//! after.set_point(6, 4)?;
//! after.set_point(5, 2)?;
//!
//! let checked = check_move(&before, &after, Side::White);
//! assert_eq!(checked.status(), MoveStatus::Legal);
//! assert_eq!(checked.to_string(), "31: 8/5 6/5");
//! # Ok::<(), strictly_fibs::PositionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clip;
mod config;
mod games;
mod replay;

// Crate-level exports - Tokens and events
pub use clip::{Event, EventKind, Token, TokenError, TokenKind, TokenReader};

// Crate-level exports - Line classification
pub use clip::{
    Category, Classifier, DecodeError, DecodeErrorKind, Line, RULES, Rule, RuleGroup, SETTINGS,
    TOGGLES, chomp, classify, decode_line, movement, parse_line,
};

// Crate-level exports - Board dumps
pub use clip::{BoardState, BoardStateError};

// Crate-level exports - Configuration
pub use config::{ConfigError, FibsConfig};

// Crate-level exports - Replay
pub use replay::{ReplayError, Transcript, check_boards, decode_reader, schema_listing};

// Crate-level exports - Backgammon types
pub use games::backgammon::{
    BAR, CHECKERS_PER_SIDE, Move, MoveStatus, Movement, OFF, POINT_COUNT, Position,
    PositionError, Side,
};

// Crate-level exports - Move checking
pub use games::backgammon::{
    Candidate, CheckerCountInvariant, CheckersConserved, Contract, ContractError,
    CubeValueInvariant, DiceRangeInvariant, DiceRolled, HOME_TOP, Invariant, InvariantSet,
    InvariantViolation, MoveCheckContract, MoverBoard, Origins, PositionInvariants,
    TooManyOrigins, check_move, generate,
};
