//! Contract-based validation for move checking.
//!
//! Contracts state what must be true of the snapshots before the move
//! checker reasons about them: {P} move {Q}.

use super::invariants::{InvariantSet, InvariantViolation, PositionInvariants};
use super::{Position, Side};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before the action.
    fn pre(state: &S, action: &A) -> Result<(), ContractError>;

    /// Checks postconditions relating the state before and after.
    fn post(before: &S, after: &S) -> Result<(), ContractError>;
}

/// Why a pair of snapshots cannot describe a single move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ContractError {
    /// The mover has no dice to play.
    #[display("{} has not rolled", _0)]
    DiceNotRolled(Side),

    /// A snapshot breaks a position invariant.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// A side has more checkers in play after the move than before.
    #[display("{} gained checkers during the move", _0)]
    CheckersAppeared(Side),
}

impl std::error::Error for ContractError {}

fn describe(violations: Vec<InvariantViolation>) -> ContractError {
    let descriptions = violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    ContractError::InvariantViolation(descriptions)
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the mover has rolled.
pub struct DiceRolled;

impl DiceRolled {
    /// Checks that both dice are non-zero.
    #[instrument(skip(position))]
    pub fn check(position: &Position, side: Side) -> Result<(), ContractError> {
        if position.dice().contains(&0) {
            Err(ContractError::DiceNotRolled(side))
        } else {
            Ok(())
        }
    }
}

/// Postcondition: no side gains checkers.
///
/// Hits move checkers to the bar and bearing off removes them, so the
/// number of checkers in play can only stay equal or drop.
pub struct CheckersConserved;

impl CheckersConserved {
    /// Compares checkers in play for both sides.
    #[instrument(skip_all)]
    pub fn check(before: &Position, after: &Position) -> Result<(), ContractError> {
        for side in [Side::White, Side::Black] {
            if after.checkers_in_play(side) > before.checkers_in_play(side) {
                return Err(ContractError::CheckersAppeared(side));
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Check Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for checking a move made by `Side`.
///
/// Preconditions:
/// - The before snapshot satisfies every position invariant
/// - The mover has rolled
///
/// Postconditions:
/// - The after snapshot satisfies every position invariant
/// - No side gains checkers
pub struct MoveCheckContract;

impl Contract<Position, Side> for MoveCheckContract {
    fn pre(before: &Position, side: &Side) -> Result<(), ContractError> {
        PositionInvariants::check_all(before).map_err(describe)?;
        DiceRolled::check(before, *side)
    }

    fn post(before: &Position, after: &Position) -> Result<(), ContractError> {
        PositionInvariants::check_all(after).map_err(|violations| {
            let error = describe(violations);
            warn!(%error, "After snapshot is inconsistent");
            error
        })?;
        CheckersConserved::check(before, after)
    }
}
