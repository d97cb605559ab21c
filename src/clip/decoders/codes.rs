//! Records that start with a numeric message code.

use super::{at_least, exact, flag, integer, real, remainder, unsigned};
use crate::clip::error::{DecodeError, DecodeErrorKind};
use crate::clip::event::{Event, EventKind};
use crate::clip::line::Line;
use crate::clip::token::Token;
use tracing::instrument;

/// Decodes a coded record by dispatching on its code.
#[instrument(skip(line), fields(code = line.word(0)))]
pub fn decode(line: &Line) -> Result<Event, DecodeError> {
    let word = line.word(0);
    let code: u8 = word
        .parse()
        .map_err(|_| DecodeError::malformed("code", word))?;
    let kind = EventKind::from_code(code)
        .ok_or_else(|| DecodeError::new(DecodeErrorKind::UnknownCode(code)))?;

    match kind {
        EventKind::Welcome => welcome(line),
        EventKind::OwnInfo => own_info(line),
        EventKind::WhoInfo => who_info(line),
        EventKind::Motd | EventKind::MotdEnd | EventKind::WhoInfoEnd => {
            exact(line, 1, "1")?;
            Ok(Event::bare(kind))
        }
        EventKind::Login | EventKind::Logout => presence(line, kind),
        EventKind::Message => message(line),
        EventKind::MessageDelivered | EventKind::MessageSaved => {
            exact(line, 2, "2")?;
            Ok(Event::new(kind, vec![Token::identifier(line.word(1))]))
        }
        EventKind::YouShout | EventKind::YouWhisper | EventKind::YouKibitz => {
            at_least(line, 2, "at least 2")?;
            Ok(Event::new(kind, vec![Token::text(remainder(line, 1)?)]))
        }
        _ => chat(line, kind),
    }
}

fn timestamp(field: &'static str, text: &str) -> Result<Token, DecodeError> {
    Ok(Token::Timestamp(integer(field, text, 0..=i64::MAX)?))
}

/// `1 name last_login last_host`
fn welcome(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 4, "4")?;
    Ok(Event::new(
        EventKind::Welcome,
        vec![
            Token::identifier(line.word(1)),
            timestamp("last login", line.word(2))?,
            Token::text(line.word(3)),
        ],
    ))
}

const OWN_INFO_FLAGS_1: [&str; 8] = [
    "allowpip",
    "autoboard",
    "autodouble",
    "automove",
    "away",
    "bell",
    "crawford",
    "double",
];

const OWN_INFO_FLAGS_2: [&str; 4] = ["greedy", "moreboards", "moves", "notify"];

/// `2 name` followed by the user's settings.
fn own_info(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 22, "22")?;
    let mut tokens = Vec::with_capacity(21);
    tokens.push(Token::identifier(line.word(1)));
    for (offset, field) in OWN_INFO_FLAGS_1.iter().enumerate() {
        tokens.push(Token::Boolean(flag(field, line.word(2 + offset))?));
    }
    tokens.push(Token::Unsigned(unsigned("experience", line.word(10), 0..=u64::MAX)?));
    for (offset, field) in OWN_INFO_FLAGS_2.iter().enumerate() {
        tokens.push(Token::Boolean(flag(field, line.word(11 + offset))?));
    }
    tokens.push(Token::Real(real("rating", line.word(15))?));
    tokens.push(Token::Boolean(flag("ratings", line.word(16))?));
    tokens.push(Token::Boolean(flag("ready", line.word(17))?));
    let redoubles = match line.word(18) {
        "unlimited" => -1,
        text => integer("redoubles", text, 0..=i64::MAX)?,
    };
    tokens.push(Token::Integer(redoubles));
    tokens.push(Token::Boolean(flag("report", line.word(19))?));
    tokens.push(Token::Boolean(flag("silent", line.word(20))?));
    tokens.push(Token::text(line.word(21)));
    Ok(Event::new(EventKind::OwnInfo, tokens))
}

fn nobody(word: &str) -> &str {
    if word == "-" { "" } else { word }
}

/// `5 name opponent watching ready away rating experience idle login host client email`
fn who_info(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 13, "13")?;
    Ok(Event::new(
        EventKind::WhoInfo,
        vec![
            Token::identifier(line.word(1)),
            Token::identifier(nobody(line.word(2))),
            Token::identifier(nobody(line.word(3))),
            Token::Boolean(flag("ready", line.word(4))?),
            Token::Boolean(flag("away", line.word(5))?),
            Token::Real(real("rating", line.word(6))?),
            Token::Unsigned(unsigned("experience", line.word(7), 0..=u64::MAX)?),
            Token::Unsigned(unsigned("idle", line.word(8), 0..=u64::MAX)?),
            timestamp("login", line.word(9))?,
            Token::text(line.word(10)),
            Token::text(line.word(11)),
            Token::text(line.word(12)),
        ],
    ))
}

/// `7 name name logs in.` and `8 name name drops connection.`
fn presence(line: &Line, kind: EventKind) -> Result<Event, DecodeError> {
    at_least(line, 3, "at least 3")?;
    let text = remainder(line, 2)?.trim_end_matches(['.', ' ']);
    Ok(Event::new(
        kind,
        vec![Token::identifier(line.word(1)), Token::text(text)],
    ))
}

/// `9 from time text...`
fn message(line: &Line) -> Result<Event, DecodeError> {
    at_least(line, 4, "at least 4")?;
    Ok(Event::new(
        EventKind::Message,
        vec![
            Token::identifier(line.word(1)),
            timestamp("sent", line.word(2))?,
            Token::text(remainder(line, 3)?),
        ],
    ))
}

/// `12 name text...` and the other chat records with a speaker.
fn chat(line: &Line, kind: EventKind) -> Result<Event, DecodeError> {
    at_least(line, 3, "at least 3")?;
    Ok(Event::new(
        kind,
        vec![
            Token::identifier(line.word(1)),
            Token::text(remainder(line, 2)?),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(raw: &str) -> Result<Event, DecodeError> {
        decode(&Line::new(raw))
    }

    #[test]
    fn test_welcome() {
        let event = decoded("1 guido 1234567890 foobar").unwrap();
        assert_eq!(event.kind(), EventKind::Welcome);
        assert_eq!(
            event.tokens(),
            &[
                Token::identifier("guido"),
                Token::Timestamp(1234567890),
                Token::text("foobar"),
            ]
        );
    }

    #[test]
    fn test_welcome_wrong_arity() {
        assert!(decoded("1 guido 1234567890").is_err());
        assert!(decoded("1 guido 1234567890 foo bar").is_err());
    }

    #[test]
    fn test_unknown_code() {
        let error = decoded("42 something").unwrap_err();
        assert_eq!(error.kind, DecodeErrorKind::UnknownCode(42));
    }

    #[test]
    fn test_login_strips_trailing_dot() {
        let event = decoded("7 gflohr gflohr logs in.").unwrap();
        assert_eq!(event.tokens()[1], Token::text("gflohr logs in"));
    }

    #[test]
    fn test_chat_keeps_spacing() {
        let event = decoded("12 joe hello   there").unwrap();
        assert_eq!(event.kind(), EventKind::Says);
        assert_eq!(event.tokens()[1], Token::text("hello   there"));
    }

    #[test]
    fn test_you_shout() {
        let event = decoded("17 anyone for a game?").unwrap();
        assert_eq!(
            event,
            Event::new(EventKind::YouShout, vec![Token::text("anyone for a game?")])
        );
    }

    #[test]
    fn test_who_info_dash_is_nobody() {
        let event = decoded(
            "5 gflohr - barrack 0 1 1544.91 4129 9 1286550245 example.com Gibbon_0.1 gflohr@example.com",
        )
        .unwrap();
        assert!(event.conforms());
        assert_eq!(event.tokens()[1], Token::identifier(""));
        assert_eq!(event.tokens()[2], Token::identifier("barrack"));
    }

    #[test]
    fn test_own_info_unlimited_redoubles() {
        let event = decoded(
            "2 gflohr 1 1 0 0 0 0 1 1 2396 0 1 0 1 3457.85 0 0 unlimited 0 0 Europe/Berlin",
        )
        .unwrap();
        assert!(event.conforms());
        assert_eq!(event.tokens()[17], Token::Integer(-1));
        assert_eq!(event.tokens()[20], Token::text("Europe/Berlin"));
    }

    #[test]
    fn test_own_info_bad_flag() {
        let error = decoded(
            "2 gflohr 2 1 0 0 0 0 1 1 2396 0 1 0 1 3457.85 0 0 unlimited 0 0 Europe/Berlin",
        )
        .unwrap_err();
        assert!(matches!(
            error.kind,
            DecodeErrorKind::OutOfRange {
                field: "allowpip",
                ..
            }
        ));
    }
}
