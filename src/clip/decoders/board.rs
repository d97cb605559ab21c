//! The colon-separated board dump.
//!
//! ```text
//! board:You:someplayer:3:0:0:0:-2:0:0:0:0:5:0:3:0:0:0:-5:5:0:0:0:-3:0:-5:0:0:0:0:2:0:1:6:2:0:0:1:1:1:0:1:-1:0:25:0:0:0:0:2:0:0:0
//! ```
//!
//! Points are rewritten so that the local player always owns the positive
//! checkers and moves from point 24 down to point 1.

use super::{flag, integer, unsigned};
use crate::clip::error::DecodeError;
use crate::clip::event::{Event, EventKind};
use crate::clip::line::Line;
use crate::clip::token::Token;
use tracing::{debug, instrument};

/// Number of colon-separated fields in a board dump.
pub const FIELD_COUNT: usize = 53;

const PLAYER: usize = 1;
const OPPONENT: usize = 2;
const MATCH_LENGTH: usize = 3;
const PLAYER_SCORE: usize = 4;
const OPPONENT_SCORE: usize = 5;
const FIRST_POINT: usize = 7;
const LAST_POINT: usize = 30;
const TURN: usize = 32;
const PLAYER_DICE: usize = 33;
const OPPONENT_DICE: usize = 35;
const CUBE: usize = 37;
const PLAYER_MAY_DOUBLE: usize = 38;
const OPPONENT_MAY_DOUBLE: usize = 39;
const COLOR: usize = 41;
const DIRECTION: usize = 42;
const PLAYER_ON_BAR: usize = 47;
const OPPONENT_ON_BAR: usize = 48;
const POST_CRAWFORD: usize = 51;
const REDOUBLES: usize = 52;

/// Decodes a `board:` record.
#[instrument(skip(line))]
pub fn decode(line: &Line) -> Result<Event, DecodeError> {
    let raw = line.rest(0).unwrap_or_default().trim_end();
    let fields: Vec<&str> = raw.splitn(FIELD_COUNT, ':').collect();
    if fields.len() < FIELD_COUNT {
        return Err(DecodeError::arity("53 fields", fields.len()));
    }

    let redoubles = fields[REDOUBLES];
    if is_glued(redoubles) {
        debug!(redoubles, "Board dump has another record attached");
        return Ok(split_glued(raw, redoubles));
    }

    let color = integer("color", fields[COLOR], -1..=1)?;
    if color == 0 {
        return Err(DecodeError::out_of_range("color", color));
    }
    let direction = integer("direction", fields[DIRECTION], -1..=1)?;
    if direction == 0 {
        return Err(DecodeError::out_of_range("direction", direction));
    }

    let mut tokens = Vec::with_capacity(38);
    tokens.push(Token::identifier(fields[PLAYER]));
    tokens.push(Token::identifier(fields[OPPONENT]));
    tokens.push(Token::Unsigned(unsigned(
        "match length",
        fields[MATCH_LENGTH],
        0..=u64::MAX,
    )?));
    tokens.push(Token::Unsigned(unsigned(
        "score",
        fields[PLAYER_SCORE],
        0..=u64::MAX,
    )?));
    tokens.push(Token::Unsigned(unsigned(
        "score",
        fields[OPPONENT_SCORE],
        0..=u64::MAX,
    )?));

    let point_fields = &fields[FIRST_POINT..=LAST_POINT];
    let ordered: Vec<&str> = if direction == -1 {
        point_fields.to_vec()
    } else {
        point_fields.iter().rev().copied().collect()
    };
    for field in ordered {
        let count = integer("point", field, -15..=15)?;
        tokens.push(Token::Integer(count * color));
    }

    let turn = integer("turn", fields[TURN], -1..=1)? * color;
    tokens.push(Token::Integer(turn));
    let dice = match turn {
        1 => [
            integer("die", fields[PLAYER_DICE], 0..=6)?,
            integer("die", fields[PLAYER_DICE + 1], 0..=6)?,
        ],
        -1 => [
            -integer("die", fields[OPPONENT_DICE], 0..=6)?,
            -integer("die", fields[OPPONENT_DICE + 1], 0..=6)?,
        ],
        _ => [0, 0],
    };
    tokens.extend(dice.map(Token::Integer));

    tokens.push(Token::Unsigned(unsigned("cube", fields[CUBE], 1..=u64::MAX)?));
    tokens.push(Token::Boolean(flag("may double", fields[PLAYER_MAY_DOUBLE])?));
    tokens.push(Token::Boolean(flag("may double", fields[OPPONENT_MAY_DOUBLE])?));
    tokens.push(Token::Unsigned(unsigned("bar", fields[PLAYER_ON_BAR], 0..=15)?));
    tokens.push(Token::Unsigned(unsigned("bar", fields[OPPONENT_ON_BAR], 0..=15)?));
    tokens.push(Token::Boolean(flag("post crawford", fields[POST_CRAWFORD])?));

    Ok(Event::new(EventKind::Board, tokens))
}

/// The last field is a plain count unless the server glued the next record
/// onto it.
fn is_glued(field: &str) -> bool {
    let bytes = field.as_bytes();
    let zero_then_digit = bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit();
    zero_then_digit || bytes.iter().any(|byte| !byte.is_ascii_digit())
}

/// Cuts the text after the first character of the last field.
fn split_glued(raw: &str, redoubles: &str) -> Event {
    let first = redoubles.chars().next().map_or(0, char::len_utf8);
    let cut = raw.len() - redoubles.len() + first;
    let (board, rest) = raw.split_at(cut);
    Event::new(
        EventKind::BoardMalformed,
        vec![Token::text(board), Token::text(rest)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENING: &str = "board:You:someplayer:3:0:0:0:-2:0:0:0:0:5:0:3:0:0:0:-5:5:0:0:0:-3:0:-5:0:0:0:0:2:0:1:6:2:0:0:1:1:1:0:1:-1:0:25:0:0:0:0:2:0:0:0";

    #[test]
    fn test_opening_board() {
        let event = decode(&Line::new(OPENING)).unwrap();
        assert_eq!(event.kind(), EventKind::Board);
        assert!(event.conforms());
        let tokens = event.tokens();
        assert_eq!(tokens[0], Token::identifier("You"));
        assert_eq!(tokens[2], Token::Unsigned(3));
        // Direction -1 keeps field order: point 1 holds two opponent checkers.
        assert_eq!(tokens[5], Token::Integer(-2));
        assert_eq!(tokens[5 + 5], Token::Integer(5));
        assert_eq!(tokens[5 + 23], Token::Integer(2));
        // Player is on roll with 6-2.
        assert_eq!(tokens[29], Token::Integer(1));
        assert_eq!(tokens[30], Token::Integer(6));
        assert_eq!(tokens[31], Token::Integer(2));
    }

    #[test]
    fn test_glued_board_split() {
        let raw = format!("{}1 JoeBlack rolls 3 and 4.", &OPENING[..OPENING.len() - 1]);
        let event = decode(&Line::new(raw.as_str())).unwrap();
        assert_eq!(event.kind(), EventKind::BoardMalformed);
        assert_eq!(
            event.tokens()[1],
            Token::text(" JoeBlack rolls 3 and 4.")
        );
        match &event.tokens()[0] {
            Token::Text(board) => assert!(board.ends_with(":0:0:1")),
            other => panic!("unexpected token {:?}", other),
        }
    }

    #[test]
    fn test_zero_then_digit_is_glued() {
        assert!(is_glued("01"));
        assert!(is_glued("0x"));
        assert!(!is_glued("0"));
        assert!(!is_glued("12"));
        assert!(!is_glued(""));
    }

    #[test]
    fn test_short_board_rejected() {
        assert!(decode(&Line::new("board:You:someplayer:3")).is_err());
    }
}
