//! Checker count invariant: nobody has more than fifteen checkers.

use super::super::{CHECKERS_PER_SIDE, Position, Side};
use super::Invariant;

/// Invariant: each side has at most fifteen checkers on points and bar.
pub struct CheckerCountInvariant;

impl Invariant<Position> for CheckerCountInvariant {
    fn holds(position: &Position) -> bool {
        [Side::White, Side::Black]
            .into_iter()
            .all(|side| position.checkers_in_play(side) <= CHECKERS_PER_SIDE)
    }

    fn description() -> &'static str {
        "Each side has at most 15 checkers in play"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_holds() {
        assert!(CheckerCountInvariant::holds(&Position::new()));
    }

    #[test]
    fn test_sixteenth_black_checker_fails() {
        let mut position = Position::initial();
        position.set_point(20, -1).unwrap();
        assert!(!CheckerCountInvariant::holds(&position));
    }
}
