//! Backgammon positions and move reconstruction.
//!
//! A front end hands over the position before and after a drag-and-drop
//! move; [`check_move`] works out which half-moves explain the difference
//! and whether they were legal with the dice on the board.

mod action;
mod candidates;
mod contracts;
mod invariants;
mod rules;
mod types;
mod validator;

pub use action::{BAR, Move, MoveStatus, Movement, OFF};
pub use candidates::{Candidate, Origins, TooManyOrigins, generate};
pub use contracts::{CheckersConserved, Contract, ContractError, DiceRolled, MoveCheckContract};
pub use invariants::{
    CheckerCountInvariant, CubeValueInvariant, DiceRangeInvariant, Invariant, InvariantSet,
    InvariantViolation, PositionInvariants,
};
pub use rules::{HOME_TOP, MoverBoard};
pub use types::{CHECKERS_PER_SIDE, POINT_COUNT, Position, PositionError, Side};
pub use validator::check_move;

impl Position {
    /// Checks every position invariant.
    pub fn validate(&self) -> Result<(), Vec<InvariantViolation>> {
        PositionInvariants::check_all(self)
    }
}
