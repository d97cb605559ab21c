//! Records recognized by the words after the leading player name.

use super::{at_least, exact, integer, literal, one_of, unsigned};
use crate::clip::error::DecodeError;
use crate::clip::event::{Event, EventKind};
use crate::clip::line::{Line, chomp};
use crate::clip::token::Token;
use tracing::instrument;

/// Longest distance a single die can carry a checker.
const MAX_DIE: i64 = 6;

/// `X and Y start a 5 point match.` or `X and Y start an unlimited match.`
#[instrument(skip(line))]
pub fn start_match(line: &Line) -> Result<Event, DecodeError> {
    let length = match line.len() {
        7 => {
            literal(line, 4, "an")?;
            literal(line, 5, "unlimited")?;
            literal(line, 6, "match.")?;
            0
        }
        8 => {
            one_of(line, 4, &["a", "an"], "a")?;
            let length = unsigned("match length", line.word(5), 1..=u64::MAX)?;
            literal(line, 6, "point")?;
            one_of(line, 7, &["match.", "match"], "match.")?;
            length
        }
        found => return Err(DecodeError::arity("7 or 8", found)),
    };
    Ok(two_players(EventKind::StartMatch, line, length))
}

/// `X and Y are resuming their 5-point match.`
#[instrument(skip(line))]
pub fn resume_match(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 8, "8")?;
    literal(line, 5, "their")?;
    literal(line, 7, "match.")?;
    let length = match line.word(6) {
        "unlimited" => 0,
        word => match word.split_once('-') {
            Some((number, "point")) => unsigned("match length", number, 1..=u64::MAX)?,
            _ => return Err(DecodeError::malformed("match length", word)),
        },
    };
    Ok(two_players(EventKind::ResumeMatch, line, length))
}

fn two_players(kind: EventKind, line: &Line, length: u64) -> Event {
    Event::new(
        kind,
        vec![
            Token::identifier(line.word(0)),
            Token::identifier(line.word(2)),
            Token::Unsigned(length),
        ],
    )
}

/// `X has 3 saved games.` / `X has 1 saved game.` / `X has no saved games.`
#[instrument(skip(line))]
pub fn saved_count(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 5, "5")?;
    literal(line, 3, "saved")?;
    one_of(line, 4, &["games.", "game."], "games.")?;
    let count = match line.word(2) {
        "no" => 0,
        word => unsigned("saved games", word, 0..=u64::MAX)?,
    };
    Ok(Event::new(
        EventKind::ShowSavedCount,
        vec![Token::identifier(line.word(0)), Token::Unsigned(count)],
    ))
}

/// `X rolls 3 and 4.`
#[instrument(skip(line))]
pub fn rolls(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 5, "5")?;
    literal(line, 3, "and")?;
    let die1 = unsigned("die", line.word(2), 1..=6)?;
    let die2 = unsigned("die", chomp(line.word(4), '.'), 1..=6)?;
    Ok(Event::new(
        EventKind::Rolls,
        vec![
            Token::identifier(line.word(0)),
            Token::Unsigned(die1),
            Token::Unsigned(die2),
        ],
    ))
}

/// `X moves 8-5 6-5 .` with one to four movements.
#[instrument(skip(line))]
pub fn moves(line: &Line) -> Result<Event, DecodeError> {
    if !(4..=7).contains(&line.len()) {
        return Err(DecodeError::arity("4 to 7", line.len()));
    }
    let count = line.len() - 3;
    let mut tokens = Vec::with_capacity(2 + 2 * count);
    tokens.push(Token::identifier(line.word(0)));
    tokens.push(Token::Unsigned(count as u64));
    for index in 2..2 + count {
        let (from, to) = movement(line.word(index))?;
        tokens.push(Token::Unsigned(from));
        tokens.push(Token::Unsigned(to));
    }
    Ok(Event::new(EventKind::Moves, tokens))
}

/// Parses `from-to`, resolving `bar` and `off` by the direction of travel.
///
/// The bar is 25 for a checker entering on the high points and 0 for one
/// entering on the low points; `off` mirrors that.
pub fn movement(text: &str) -> Result<(u64, u64), DecodeError> {
    let (from, to) = text
        .split_once('-')
        .ok_or_else(|| DecodeError::malformed("movement", text))?;
    let mut from = point("from", from)?;
    let mut to = point("to", to)?;

    if from == 0 && to == 0 {
        return Err(DecodeError::malformed("movement", text));
    }
    if from == 0 {
        if to >= 19 {
            from = 25;
        } else if to > MAX_DIE {
            return Err(DecodeError::malformed("movement", text));
        }
    } else if to == 0 {
        if from >= 19 {
            to = 25;
        } else if from > MAX_DIE {
            return Err(DecodeError::malformed("movement", text));
        }
    }

    if from == to || (from - to).abs() > MAX_DIE {
        return Err(DecodeError::malformed("movement", text));
    }
    // Both values lie in 0..=25 here.
    Ok((from.unsigned_abs(), to.unsigned_abs()))
}

fn point(field: &'static str, text: &str) -> Result<i64, DecodeError> {
    match text {
        "bar" | "off" => Ok(0),
        _ => integer(field, text, 1..=24),
    }
}

/// `X wins a 5 point match against Y 5-2 .`
#[instrument(skip(line))]
pub fn win_match(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 10, "10")?;
    literal(line, 4, "point")?;
    literal(line, 5, "match")?;
    literal(line, 6, "against")?;
    literal(line, 9, ".")?;
    let length = unsigned("match length", line.word(3), 1..=u64::MAX)?;

    let score = line.word(8);
    let (winner, loser) = score
        .split_once('-')
        .ok_or_else(|| DecodeError::malformed("final score", score))?;
    let winner = unsigned("winner score", winner, length..=u64::MAX)?;
    let loser = unsigned("loser score", loser, 0..=length - 1)?;

    Ok(Event::new(
        EventKind::WinMatch,
        vec![
            Token::identifier(line.word(0)),
            Token::identifier(line.word(7)),
            Token::Unsigned(length),
            Token::Unsigned(winner),
            Token::Unsigned(loser),
        ],
    ))
}

/// `X wins the game and gets 2 points. Sorry.`
#[instrument(skip(line))]
pub fn win_game(line: &Line) -> Result<Event, DecodeError> {
    at_least(line, 8, "at least 8")?;
    literal(line, 4, "and")?;
    one_of(line, 5, &["gets", "get"], "gets")?;
    let points = unsigned("points", line.word(6), 1..=u64::MAX)?;
    one_of(line, 7, &["points.", "point."], "points.")?;
    Ok(Event::new(
        EventKind::WinGame,
        vec![Token::identifier(line.word(0)), Token::Unsigned(points)],
    ))
}

/// `X wants to play a 5 point match with you.` or `... an unlimited match with you.`
#[instrument(skip(line))]
pub fn invitation(line: &Line) -> Result<Event, DecodeError> {
    let length = match line.len() {
        9 => {
            literal(line, 4, "an")?;
            literal(line, 5, "unlimited")?;
            0
        }
        10 => {
            one_of(line, 4, &["a", "an"], "a")?;
            literal(line, 6, "point")?;
            unsigned("match length", line.word(5), 1..=u64::MAX)?
        }
        found => return Err(DecodeError::arity("9 or 10", found)),
    };
    let tail = line.len() - 3;
    literal(line, tail, "match")?;
    literal(line, tail + 1, "with")?;
    literal(line, tail + 2, "you.")?;
    Ok(Event::new(
        EventKind::Invitation,
        vec![Token::identifier(line.word(0)), Token::Unsigned(length)],
    ))
}

/// `X wants to resign. You will win 2 points. Type 'accept' or 'reject'.`
#[instrument(skip(line))]
pub fn resigns(line: &Line) -> Result<Event, DecodeError> {
    at_least(line, 9, "at least 9")?;
    literal(line, 4, "You")?;
    literal(line, 5, "will")?;
    one_of(line, 6, &["win", "lose"], "win")?;
    let points = unsigned("points", line.word(7), 1..=u64::MAX)?;
    one_of(line, 8, &["points.", "point."], "points.")?;
    Ok(Event::new(
        EventKind::Resigns,
        vec![Token::identifier(line.word(0)), Token::Unsigned(points)],
    ))
}

fn named(kind: EventKind, line: &Line) -> Result<Event, DecodeError> {
    Ok(Event::new(kind, vec![Token::identifier(line.word(0))]))
}

/// `X doubles. Type 'accept' or 'reject'.`
pub fn doubles(line: &Line) -> Result<Event, DecodeError> {
    at_least(line, 2, "at least 2")?;
    named(EventKind::Doubles, line)
}

/// `X accepts the double. The cube shows 2.`
pub fn accepts_double(line: &Line) -> Result<Event, DecodeError> {
    at_least(line, 4, "at least 4")?;
    named(EventKind::AcceptsDouble, line)
}

/// `X rejects. The game continues.`
pub fn rejects(line: &Line) -> Result<Event, DecodeError> {
    at_least(line, 2, "at least 2")?;
    named(EventKind::RejectsResignation, line)
}

/// `X can't move.`
pub fn cannot_move(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 3, "3")?;
    named(EventKind::CannotMove, line)
}
