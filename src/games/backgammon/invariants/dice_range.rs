//! Dice range invariant.

use super::super::Position;
use super::Invariant;

/// Invariant: dice are both unrolled, or both belong to one side and show 1-6.
pub struct DiceRangeInvariant;

impl Invariant<Position> for DiceRangeInvariant {
    fn holds(position: &Position) -> bool {
        match position.dice() {
            [0, 0] => true,
            [a, b] => {
                (1..=6).contains(&a.abs()) && (1..=6).contains(&b.abs()) && a.signum() == b.signum()
            }
        }
    }

    fn description() -> &'static str {
        "Dice show 1-6 and belong to the same side"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrolled_holds() {
        assert!(DiceRangeInvariant::holds(&Position::new()));
    }

    #[test]
    fn test_mixed_signs_fail() {
        let mut position = Position::new();
        position.set_dice(3, -4);
        assert!(!DiceRangeInvariant::holds(&position));
        position.set_dice(-3, -4);
        assert!(DiceRangeInvariant::holds(&position));
        position.set_dice(0, 4);
        assert!(!DiceRangeInvariant::holds(&position));
    }
}
