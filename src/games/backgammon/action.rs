//! First-class move types for backgammon.
//!
//! A move is what the checker reconstructed from two snapshots: the
//! half-moves it believes were played, and a verdict. Rejected moves keep
//! the half-moves that were under evaluation so a front end can show them.

use serde::{Deserialize, Serialize};

/// Index of the bar in the mover's orientation.
pub const BAR: u8 = 25;

/// Index used for borne-off checkers in the mover's orientation.
pub const OFF: u8 = 0;

/// One checker moved by one die.
///
/// Points are counted from the mover's side: 25 is the bar, 0 is off the
/// board, and checkers always travel towards lower numbers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new,
)]
pub struct Movement {
    /// Point the checker leaves.
    pub from: u8,
    /// Point the checker lands on.
    pub to: u8,
    /// Die value spent.
    pub die: u8,
}

impl Movement {
    /// Moves a checker `die` pips from `from`, bearing off past point 1.
    pub fn step(from: u8, die: u8) -> Self {
        Self::new(from, from.saturating_sub(die), die)
    }

    /// Whether the checker comes in from the bar.
    pub fn is_entry(&self) -> bool {
        self.from == BAR
    }

    /// Whether the checker leaves the board.
    pub fn is_bear_off(&self) -> bool {
        self.to == OFF
    }
}

impl std::fmt::Display for Movement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_entry() {
            write!(f, "bar")?;
        } else {
            write!(f, "{}", self.from)?;
        }
        if self.is_bear_off() {
            write!(f, "/off")
        } else {
            write!(f, "/{}", self.to)
        }
    }
}

/// Verdict on a reconstructed move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum MoveStatus {
    /// The move is legal.
    #[display("legal")]
    Legal,
    /// No sequence of half-moves explains the new position.
    #[display("illegal move")]
    Illegal,
    /// A checker would land on a point held by two or more opponents.
    #[display("point is blocked")]
    Blocked,
    /// More than four points lost checkers.
    #[display("too many checkers moved")]
    TooManyOrigins,
    /// More dice could have been played.
    #[display("you must use all dice")]
    MustUseAllDice,
    /// Only one die could be played and it should have been the higher one.
    #[display("you must use the higher die")]
    MustUseHigherDie,
    /// A checker was borne off while others were outside the home board.
    #[display("cannot bear off while checkers are outside the home board")]
    PrematureBearOff,
    /// A higher die bore off a checker while a higher point was occupied.
    #[display("bear off from the highest point first")]
    WastefulOrder,
    /// The mover could not enter from the bar but moved anyway.
    #[display("cannot enter from the bar")]
    Dancing,
}

impl MoveStatus {
    /// Whether the status accepts the move.
    pub fn is_legal(self) -> bool {
        matches!(self, MoveStatus::Legal)
    }
}

/// A reconstructed move with its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    dice: [u8; 2],
    movements: Vec<Movement>,
    status: MoveStatus,
}

impl Move {
    /// Creates a move.
    pub fn new(dice: [u8; 2], movements: Vec<Movement>, status: MoveStatus) -> Self {
        Self {
            dice,
            movements,
            status,
        }
    }

    /// Creates a move rejected before any half-move was evaluated.
    pub fn rejected(dice: [u8; 2], status: MoveStatus) -> Self {
        Self::new(dice, Vec::new(), status)
    }

    /// Dice the move was checked against.
    pub fn dice(&self) -> [u8; 2] {
        self.dice
    }

    /// Half-moves, back-most first.
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Verdict.
    pub fn status(&self) -> MoveStatus {
        self.status
    }

    /// Whether the move was accepted.
    pub fn is_legal(&self) -> bool {
        self.status.is_legal()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}:", self.dice[0], self.dice[1])?;
        if self.movements.is_empty() {
            write!(f, " -")?;
        }
        for movement in &self.movements {
            write!(f, " {}", movement)?;
        }
        Ok(())
    }
}
