//! Decoded events and their token schemas.

use super::token::{Token, TokenKind, TokenReader};
use serde::{Deserialize, Serialize};

/// Every record shape the decoder knows.
///
/// Kinds with a protocol code report it through [`EventKind::code`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Login banner (code 1).
    Welcome,
    /// Own settings after login (code 2).
    OwnInfo,
    /// Message of the day starts (code 3).
    Motd,
    /// Message of the day ends (code 4).
    MotdEnd,
    /// One user in the who list (code 5).
    WhoInfo,
    /// Who list ends (code 6).
    WhoInfoEnd,
    /// A user logged in (code 7).
    Login,
    /// A user logged out (code 8).
    Logout,
    /// A stored message (code 9).
    Message,
    /// A message was delivered (code 10).
    MessageDelivered,
    /// A message was saved for later (code 11).
    MessageSaved,
    /// Someone says something to you (code 12).
    Says,
    /// Someone shouts (code 13).
    Shouts,
    /// Someone whispers to watchers (code 14).
    Whispers,
    /// Someone kibitzes (code 15).
    Kibitzes,
    /// Echo of your own tell (code 16).
    YouSay,
    /// Echo of your own shout (code 17).
    YouShout,
    /// Echo of your own whisper (code 18).
    YouWhisper,
    /// Echo of your own kibitz (code 19).
    YouKibitz,
    /// A board dump.
    Board,
    /// A board dump with another record glued to its end.
    BoardMalformed,
    /// A player rolled.
    Rolls,
    /// A player moved checkers.
    Moves,
    /// Two players start a match.
    StartMatch,
    /// Two players resume a saved match.
    ResumeMatch,
    /// A match was won.
    WinMatch,
    /// A game was won.
    WinGame,
    /// Someone invites you to a match.
    Invitation,
    /// A player offers to resign.
    Resigns,
    /// A player rejects a resignation.
    RejectsResignation,
    /// A player doubles.
    Doubles,
    /// A player accepts the double.
    AcceptsDouble,
    /// A player cannot move.
    CannotMove,
    /// You started watching a player.
    YoureWatching,
    /// Header before the settings listing.
    StartSettings,
    /// One setting value.
    ShowSetting,
    /// Header before the toggles listing.
    StartToggles,
    /// One toggle value.
    ShowToggle,
    /// Header before the saved games listing.
    ShowStartSaved,
    /// One saved game.
    ShowSaved,
    /// The saved games listing is empty.
    ShowSavedNone,
    /// Number of saved games of a player.
    ShowSavedCount,
    /// Your email address.
    ShowAddress,
    /// An email address was refused.
    ErrorNoEmailAddress,
    /// A blank line.
    Empty,
    /// Anything else; carries the raw line.
    Unrecognized,
}

const CODES: [EventKind; 19] = [
    EventKind::Welcome,
    EventKind::OwnInfo,
    EventKind::Motd,
    EventKind::MotdEnd,
    EventKind::WhoInfo,
    EventKind::WhoInfoEnd,
    EventKind::Login,
    EventKind::Logout,
    EventKind::Message,
    EventKind::MessageDelivered,
    EventKind::MessageSaved,
    EventKind::Says,
    EventKind::Shouts,
    EventKind::Whispers,
    EventKind::Kibitzes,
    EventKind::YouSay,
    EventKind::YouShout,
    EventKind::YouWhisper,
    EventKind::YouKibitz,
];

use super::token::TokenKind::{
    Boolean as B, Identifier as Id, Integer as Int, Real as R, Text as T, Timestamp as Ts,
    Unsigned as U,
};

const OWN_INFO: &[TokenKind] = &[
    Id, B, B, B, B, B, B, B, B, U, B, B, B, B, R, B, B, Int, B, B, T,
];

const WHO_INFO: &[TokenKind] = &[Id, Id, Id, B, B, R, U, U, Ts, T, T, T];

const BOARD: &[TokenKind] = &[
    Id, Id, U, U, U, //
    Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, //
    Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, //
    Int, Int, Int, U, B, B, U, U, B,
];

impl EventKind {
    /// Kind registered for a numeric protocol code.
    pub fn from_code(code: u8) -> Option<Self> {
        let index = usize::from(code).checked_sub(1)?;
        CODES.get(index).copied()
    }

    /// Numeric protocol code, for kinds that have one.
    pub fn code(self) -> Option<u8> {
        CODES
            .iter()
            .position(|kind| *kind == self)
            .and_then(|index| u8::try_from(index + 1).ok())
    }

    /// Token kinds this event carries, in order.
    ///
    /// `Moves` has a variable length and returns `None`: an unsigned count
    /// followed by that many unsigned `from`/`to` pairs.
    pub fn schema(self) -> Option<&'static [TokenKind]> {
        let schema: &'static [TokenKind] = match self {
            EventKind::Welcome => &[Id, Ts, T],
            EventKind::OwnInfo => OWN_INFO,
            EventKind::WhoInfo => WHO_INFO,
            EventKind::Motd
            | EventKind::MotdEnd
            | EventKind::WhoInfoEnd
            | EventKind::StartSettings
            | EventKind::StartToggles
            | EventKind::ShowStartSaved
            | EventKind::ShowSavedNone
            | EventKind::Empty => &[],
            EventKind::Login
            | EventKind::Logout
            | EventKind::Says
            | EventKind::Shouts
            | EventKind::Whispers
            | EventKind::Kibitzes
            | EventKind::YouSay => &[Id, T],
            EventKind::Message => &[Id, Ts, T],
            EventKind::MessageDelivered
            | EventKind::MessageSaved
            | EventKind::YoureWatching
            | EventKind::Doubles
            | EventKind::AcceptsDouble
            | EventKind::RejectsResignation
            | EventKind::CannotMove => &[Id],
            EventKind::YouShout
            | EventKind::YouWhisper
            | EventKind::YouKibitz
            | EventKind::ShowAddress
            | EventKind::ErrorNoEmailAddress
            | EventKind::Unrecognized => &[T],
            EventKind::Board => BOARD,
            EventKind::BoardMalformed => &[T, T],
            EventKind::Rolls => &[Id, U, U],
            EventKind::Moves => return None,
            EventKind::StartMatch | EventKind::ResumeMatch => &[Id, Id, U],
            EventKind::WinMatch => &[Id, Id, U, U, U],
            EventKind::WinGame | EventKind::Resigns | EventKind::Invitation => &[Id, U],
            EventKind::ShowSetting => &[T, T],
            EventKind::ShowToggle => &[T, B],
            EventKind::ShowSaved => &[Id, U, U, U],
            EventKind::ShowSavedCount => &[Id, U],
        };
        Some(schema)
    }
}

/// One decoded line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    kind: EventKind,
    tokens: Vec<Token>,
}

impl Event {
    /// Creates an event from its kind and tokens.
    pub fn new(kind: EventKind, tokens: Vec<Token>) -> Self {
        Self { kind, tokens }
    }

    /// An event without tokens.
    pub fn bare(kind: EventKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// A line nothing could decode, kept verbatim.
    pub fn unrecognized(raw: impl Into<String>) -> Self {
        Self::new(EventKind::Unrecognized, vec![Token::text(raw)])
    }

    /// Kind of the event.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Tokens in schema order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Typed reader over the tokens.
    pub fn reader(&self) -> TokenReader<'_> {
        TokenReader::new(&self.tokens)
    }

    /// Consumes the event, returning its tokens.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Whether the tokens match the schema of the kind.
    pub fn conforms(&self) -> bool {
        let kinds = self.tokens.iter().map(Token::kind);
        match self.kind.schema() {
            Some(schema) => kinds.eq(schema.iter().copied()),
            None => match self.tokens.as_slice() {
                [Token::Identifier(_), Token::Unsigned(count), pairs @ ..] => {
                    pairs.len() % 2 == 0
                        && u64::try_from(pairs.len() / 2).is_ok_and(|half| half == *count)
                        && pairs.iter().all(|token| token.kind() == TokenKind::Unsigned)
                }
                _ => false,
            },
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for token in &self.tokens {
            write!(f, " [{}]", token)?;
        }
        Ok(())
    }
}
