//! The board as seen by the side on roll.

use super::super::action::{BAR, Movement, OFF};
use super::super::types::{POINT_COUNT, Position, Side};
use tracing::instrument;

/// Highest point of the home board.
pub const HOME_TOP: usize = 6;

/// 26 slots in the mover's orientation.
///
/// Slot 0 counts opponent checkers on the bar, slots 1 to 24 hold signed
/// point counts with the mover positive, and slot 25 counts the mover's
/// own checkers on the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoverBoard([i32; 26]);

impl MoverBoard {
    /// Orients a position for `side`.
    pub fn from_position(position: &Position, side: Side) -> Self {
        let mut slots = [0; 26];
        let points = position.points();
        for (point, slot) in slots.iter_mut().enumerate().take(POINT_COUNT + 1).skip(1) {
            *slot = match side {
                Side::White => points[point - 1],
                Side::Black => -points[POINT_COUNT - point],
            };
        }
        slots[0] = bar_count(position, side.opponent());
        slots[usize::from(BAR)] = bar_count(position, side);
        Self(slots)
    }

    /// Builds a board from raw slots.
    pub fn from_slots(slots: [i32; 26]) -> Self {
        Self(slots)
    }

    /// Signed count at a slot.
    pub fn get(&self, slot: usize) -> i32 {
        self.0.get(slot).copied().unwrap_or(0)
    }

    /// Mover's checkers on the bar.
    pub fn on_bar(&self) -> i32 {
        self.0[usize::from(BAR)]
    }

    /// Highest slot holding a mover checker, 0 when none are left.
    pub fn backmost(&self) -> usize {
        (1..=usize::from(BAR))
            .rev()
            .find(|&slot| self.0[slot] > 0)
            .unwrap_or(0)
    }

    /// Whether every mover checker is in the home board.
    pub fn all_home(&self) -> bool {
        self.backmost() <= HOME_TOP
    }

    /// Moves one checker from `from` to `to`, hitting a lone opponent.
    ///
    /// Landing on slot 0 bears the checker off.
    pub fn step(&mut self, from: usize, to: usize) {
        if to != usize::from(OFF) {
            if self.0[to] == -1 {
                self.0[to] = 0;
                self.0[0] += 1;
            }
            self.0[to] += 1;
        }
        self.0[from] -= 1;
    }

    /// Whether a checker can come in from the bar with `die`.
    pub fn can_enter(&self, die: u8) -> bool {
        let target = usize::from(BAR.saturating_sub(die));
        target >= 1 && self.0[target] >= -1
    }

    /// Every half-move playable with `die`, one per origin point.
    pub fn single_moves(&self, die: u8) -> Vec<Movement> {
        if die == 0 {
            return Vec::new();
        }
        if self.on_bar() > 0 {
            return if self.can_enter(die) {
                vec![Movement::step(BAR, die)]
            } else {
                Vec::new()
            };
        }

        let backmost = self.backmost();
        let pips = usize::from(die);
        (1..=POINT_COUNT)
            .rev()
            .filter(|&from| self.0[from] > 0)
            .filter(|&from| {
                if from > pips {
                    self.0[from - pips] >= -1
                } else {
                    backmost <= HOME_TOP && (from == pips || from == backmost)
                }
            })
            .filter_map(|from| u8::try_from(from).ok())
            .map(|from| Movement::step(from, die))
            .collect()
    }

    /// Whether any half-move is playable with `die`.
    pub fn can_move(&self, die: u8) -> bool {
        !self.single_moves(die).is_empty()
    }

    /// Largest number of dice from `dice`, taken in order, that can be played.
    #[instrument(level = "trace", skip(self))]
    pub fn max_playable(&self, dice: &[u8]) -> usize {
        let Some((&die, rest)) = dice.split_first() else {
            return 0;
        };

        let mut best = 0;
        for movement in self.single_moves(die) {
            let mut next = *self;
            next.step(usize::from(movement.from), usize::from(movement.to));
            best = best.max(1 + next.max_playable(rest));
            if best == dice.len() {
                break;
            }
        }
        best
    }
}

fn bar_count(position: &Position, side: Side) -> i32 {
    i32::try_from(position.bar(side)).unwrap_or(i32::MAX)
}
