//! Settings, toggles, saved games and address echoes.

use super::{exact, literal, match_length, unquote, unsigned};
use crate::clip::error::DecodeError;
use crate::clip::event::{Event, EventKind};
use crate::clip::line::{Line, chomp};
use crate::clip::token::Token;
use tracing::instrument;

/// Toggles the server echoes as `name YES|NO`.
pub const TOGGLES: [&str; 17] = [
    "allowpip",
    "autoboard",
    "autodouble",
    "automove",
    "bell",
    "crawford",
    "double",
    "greedy",
    "moreboards",
    "moves",
    "notify",
    "ratings",
    "ready",
    "report",
    "silent",
    "telnet",
    "wrap",
];

/// Settings the server echoes as `name: value`.
pub const SETTINGS: [&str; 6] = [
    "boardstyle:",
    "linelength:",
    "pagelength:",
    "redoubles:",
    "sortwho:",
    "timezone:",
];

/// `allowpip YES`
#[instrument(skip(line))]
pub fn toggle(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 2, "2")?;
    let value = match line.word(1) {
        "YES" => true,
        "NO" => false,
        other => return Err(DecodeError::malformed("toggle value", other)),
    };
    Ok(Event::new(
        EventKind::ShowToggle,
        vec![Token::text(line.word(0)), Token::Boolean(value)],
    ))
}

/// `boardstyle: 3`
#[instrument(skip(line))]
pub fn setting(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 2, "2")?;
    Ok(Event::new(
        EventKind::ShowSetting,
        vec![
            Token::text(chomp(line.word(0), ':')),
            Token::text(line.word(1)),
        ],
    ))
}

/// `Value of 'boardstyle' set to 3.`
#[instrument(skip(line))]
pub fn setting_value(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 6, "6")?;
    let key = unquote("setting", line.word(2))?;
    Ok(Event::new(
        EventKind::ShowSetting,
        vec![Token::text(key), Token::text(chomp(line.word(5), '.'))],
    ))
}

/// `Settings of variables:`
pub fn settings_header(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 3, "3")?;
    Ok(Event::bare(EventKind::StartSettings))
}

/// `The current settings are:`
pub fn toggles_header(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 4, "4")?;
    Ok(Event::bare(EventKind::StartToggles))
}

/// `opponent matchlength score (user's points first)`
pub fn saved_header(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 6, "6")?;
    Ok(Event::bare(EventKind::ShowStartSaved))
}

/// `no saved games.`
pub fn saved_none(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 3, "3")?;
    Ok(Event::bare(EventKind::ShowSavedNone))
}

/// `You're now watching someplayer.`
pub fn watching(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 4, "4")?;
    Ok(Event::new(
        EventKind::YoureWatching,
        vec![Token::identifier(chomp(line.word(3), '.'))],
    ))
}

/// `Your email address is 'someone@example.com'.`
#[instrument(skip(line))]
pub fn address(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 5, "5")?;
    let address = unquote("email address", chomp(line.word(4), '.'))?;
    Ok(Event::new(EventKind::ShowAddress, vec![Token::text(address)]))
}

const NOTICE_TOGGLES: [(&str, &str, bool); 4] = [
    ("You won't be notified when new users log in.", "notify", false),
    ("You'll be notified when new users log in.", "notify", true),
    ("You're now ready to invite or join someone.", "ready", true),
    ("You're now refusing to play with someone.", "ready", false),
];

/// Server notices starting with `**`.
#[instrument(skip(line))]
pub fn notice(line: &Line) -> Result<Event, DecodeError> {
    let text = super::remainder(line, 1)?;
    if let Some((_, name, value)) = NOTICE_TOGGLES
        .iter()
        .find(|(wording, _, _)| *wording == text)
    {
        return Ok(Event::new(
            EventKind::ShowToggle,
            vec![Token::text(*name), Token::Boolean(*value)],
        ));
    }

    // ** 'someone@example' is not an email address.
    exact(line, 7, "7")?;
    for (index, word) in ["is", "not", "an", "email", "address."].into_iter().enumerate() {
        literal(line, 2 + index, word)?;
    }
    let address = unquote("email address", line.word(1))?;
    Ok(Event::new(
        EventKind::ErrorNoEmailAddress,
        vec![Token::text(address)],
    ))
}

/// `  *opponent  5  2 - 1`, one line of the saved games listing.
#[instrument(skip(line))]
pub fn saved_match(line: &Line) -> Result<Event, DecodeError> {
    exact(line, 5, "5")?;
    literal(line, 3, "-")?;

    let word = line.word(0);
    let opponent = word.strip_prefix('*').unwrap_or(word);
    let opponent = opponent.strip_prefix('*').unwrap_or(opponent);

    let length = match_length("match length", line.word(1))?;
    let ceiling = if length == 0 { u64::MAX } else { length - 1 };
    let own = unsigned("score", line.word(2), 0..=ceiling)?;
    let other = unsigned("score", line.word(4), 0..=ceiling)?;

    Ok(Event::new(
        EventKind::ShowSaved,
        vec![
            Token::identifier(opponent),
            Token::Unsigned(length),
            Token::Unsigned(own),
            Token::Unsigned(other),
        ],
    ))
}
