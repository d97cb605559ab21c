//! Reconstruction of a single move from two snapshots.
//!
//! Candidates are replayed in generation order against a private copy of
//! the before board. The first replay that lands exactly on the after board
//! without breaking a bearing-off rule wins, and is then checked for dice
//! usage.

use super::action::{BAR, Move, MoveStatus, Movement, OFF};
use super::candidates::{Candidate, Origins, generate};
use super::contracts::{Contract, MoveCheckContract};
use super::rules::MoverBoard;
use super::{Position, Side};
use tracing::{debug, instrument, warn};

/// Outcome of replaying one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Replay {
    /// Every half-move was applied; `flag` records a bearing-off breach.
    Reached {
        board: MoverBoard,
        flag: Option<MoveStatus>,
    },
    /// A half-move landed on a made point.
    Blocked,
    /// A half-move had no checker to move.
    Invalid,
}

/// Checks the move `side` made to get from `before` to `after`.
///
/// The dice are taken from `before`; their sign is ignored.
#[instrument(skip(before, after))]
pub fn check_move(before: &Position, after: &Position, side: Side) -> Move {
    let dice = before.dice().map(|die| u8::try_from(die.unsigned_abs()).unwrap_or(0));

    if let Err(error) = MoveCheckContract::pre(before, &side) {
        warn!(%error, "Before snapshot rejected");
        return Move::rejected(dice, MoveStatus::Illegal);
    }
    if let Err(error) = MoveCheckContract::post(before, after) {
        warn!(%error, "After snapshot rejected");
        return Move::rejected(dice, MoveStatus::Illegal);
    }

    let start = MoverBoard::from_position(before, side);
    let target = MoverBoard::from_position(after, side);

    let origins = match Origins::between(&start, &target) {
        Ok(origins) => origins,
        Err(error) => {
            debug!(%error, "Too many origins");
            return Move::rejected(dice, MoveStatus::TooManyOrigins);
        }
    };

    let mut flagged: Option<Move> = None;
    let mut blocked: Option<Candidate> = None;
    let mut tried: Option<Candidate> = None;

    for candidate in generate(&origins, dice[0], dice[1]) {
        if !enters_first(&start, &candidate) {
            debug!(?candidate, "Skipped: checkers left on the bar");
            tried.get_or_insert_with(|| candidate.clone());
            continue;
        }
        match replay(&start, &candidate) {
            Replay::Reached { board, flag: None } if board == target => {
                debug!(?candidate, "Candidate matches");
                return assess_dice_usage(&start, candidate, dice);
            }
            Replay::Reached {
                board,
                flag: Some(status),
            } if board == target => {
                debug!(?candidate, %status, "Candidate matches with a breach");
                flagged.get_or_insert_with(|| Move::new(dice, candidate, status));
            }
            Replay::Blocked => {
                blocked.get_or_insert(candidate);
            }
            Replay::Reached { .. } | Replay::Invalid => {
                tried.get_or_insert(candidate);
            }
        }
    }

    if let Some(mv) = flagged {
        return mv;
    }
    if start.on_bar() > 0 && !start.can_enter(dice[0]) && !start.can_enter(dice[1]) {
        return Move::new(dice, tried.unwrap_or_default(), MoveStatus::Dancing);
    }
    if let Some(candidate) = blocked {
        return Move::new(dice, candidate, MoveStatus::Blocked);
    }
    Move::new(dice, tried.unwrap_or_default(), MoveStatus::Illegal)
}

/// While the mover has checkers on the bar, nothing else may move.
fn enters_first(start: &MoverBoard, candidate: &[Movement]) -> bool {
    let mut waiting = start.on_bar();
    for movement in candidate {
        if waiting <= 0 {
            break;
        }
        if movement.from != BAR {
            return false;
        }
        waiting -= 1;
    }
    true
}

fn replay(start: &MoverBoard, candidate: &[Movement]) -> Replay {
    let mut board = *start;
    let mut flag = None;

    for movement in candidate {
        let from = usize::from(movement.from);
        let to = usize::from(movement.to);
        if from == usize::from(OFF) || to >= from || board.get(from) < 1 {
            return Replay::Invalid;
        }

        if to == usize::from(OFF) {
            let backmost = board.backmost();
            if !board.all_home() {
                flag.get_or_insert(MoveStatus::PrematureBearOff);
            } else if usize::from(movement.die) > from && backmost > from {
                flag.get_or_insert(MoveStatus::WastefulOrder);
            }
        } else if board.get(to) < -1 {
            return Replay::Blocked;
        }

        board.step(from, to);
    }

    Replay::Reached { board, flag }
}

/// Checks that the matching candidate played as many dice as possible.
fn assess_dice_usage(start: &MoverBoard, candidate: Candidate, dice: [u8; 2]) -> Move {
    let [die1, die2] = dice;
    let used = candidate.len();
    let playable = if die1 == die2 {
        start.max_playable(&[die1; 4])
    } else {
        start
            .max_playable(&[die1, die2])
            .max(start.max_playable(&[die2, die1]))
    };
    debug!(used, playable, "Dice usage");

    if used < playable {
        return Move::new(dice, candidate, MoveStatus::MustUseAllDice);
    }

    if die1 != die2 && used == 1 && playable == 1 {
        let higher = die1.max(die2);
        let played = candidate[0];
        if played.die < higher && start.can_move(higher) {
            // Bearing off the same checker with the higher die lands on the same board.
            let alternative = Movement::step(played.from, higher);
            if alternative.to == played.to && start.single_moves(higher).contains(&alternative) {
                debug!(%alternative, "Higher die explains the move");
                return Move::new(dice, vec![alternative], MoveStatus::Legal);
            }
            return Move::new(dice, candidate, MoveStatus::MustUseHigherDie);
        }
    }

    Move::new(dice, candidate, MoveStatus::Legal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolled(mut position: Position, die1: i32, die2: i32) -> Position {
        position.set_dice(die1, die2);
        position
    }

    fn with_points(points: &[(usize, i32)]) -> Position {
        let mut position = Position::new();
        for &(point, count) in points {
            position.set_point(point, count).unwrap();
        }
        position
    }

    #[test]
    fn test_enters_first_requires_bar_moves() {
        let board = MoverBoard::from_slots({
            let mut slots = [0; 26];
            slots[25] = 1;
            slots[13] = 2;
            slots
        });
        assert!(enters_first(&board, &[Movement::new(25, 22, 3), Movement::new(13, 12, 1)]));
        assert!(!enters_first(&board, &[Movement::new(13, 10, 3), Movement::new(25, 24, 1)]));
    }

    #[test]
    fn test_replay_flags_premature_bear_off() {
        let board = MoverBoard::from_position(&with_points(&[(8, 1), (2, 1)]), Side::White);
        let result = replay(&board, &[Movement::new(2, 0, 2)]);
        assert!(matches!(
            result,
            Replay::Reached {
                flag: Some(MoveStatus::PrematureBearOff),
                ..
            }
        ));
    }

    #[test]
    fn test_opening_move_legal() {
        let before = rolled(Position::initial(), 3, 1);
        let mut after = Position::initial();
        after.set_point(8, 2).unwrap();
        after.set_point(6, 4).unwrap();
        after.set_point(5, 2).unwrap();

        let mv = check_move(&before, &after, Side::White);
        assert_eq!(mv.status(), MoveStatus::Legal);
        assert_eq!(
            mv.movements(),
            &[Movement::new(8, 5, 3), Movement::new(6, 5, 1)]
        );
    }

    #[test]
    fn test_wasteful_bear_off() {
        // Bearing off from 3 with a 5 while a checker sits on 4.
        let before = with_points(&[(4, 1), (3, 1)]);
        let board = MoverBoard::from_position(&before, Side::White);
        let result = replay(&board, &[Movement::new(3, 0, 5)]);
        assert!(matches!(
            result,
            Replay::Reached {
                flag: Some(MoveStatus::WastefulOrder),
                ..
            }
        ));
    }
}
