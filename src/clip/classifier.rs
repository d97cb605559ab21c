//! Ranked rule table that picks a decoder for each line.
//!
//! Rules are tried top to bottom and the first whose predicate accepts the
//! line owns it. When that rule's decoder rejects the line the line is
//! reported as unrecognized; later rules are never consulted.

use super::decoders::{board, codes, echoes, phrases};
use super::error::{DecodeError, DecodeErrorKind};
use super::event::{Event, EventKind};
use super::line::Line;
use serde::Serialize;
use tracing::{debug, instrument, trace};

/// Record shape a rule selects.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Blank line.
    Empty,
    /// Line starting with a numeric message code.
    Code,
    /// `board:` dump.
    Board,
    /// Toggle echo.
    Toggle,
    /// Setting echo.
    Setting,
    /// `Value of 'x' set to y.`
    SettingValue,
    /// Settings listing header.
    SettingsHeader,
    /// Toggles listing header.
    TogglesHeader,
    /// Saved games listing header.
    SavedHeader,
    /// Empty saved games listing.
    SavedNone,
    /// Start of watching a player.
    Watching,
    /// Email address echo.
    Address,
    /// `**` server notice.
    Notice,
    /// Match start.
    StartMatch,
    /// Match resumption.
    ResumeMatch,
    /// Saved games count.
    SavedCount,
    /// Checker movements.
    Moves,
    /// Dice roll.
    Rolls,
    /// Match won.
    WinMatch,
    /// Game won.
    WinGame,
    /// Match invitation.
    Invitation,
    /// Resignation offer.
    Resignation,
    /// Double offered.
    Doubles,
    /// Double accepted.
    AcceptsDouble,
    /// Resignation rejected.
    RejectsResignation,
    /// No legal move.
    CannotMove,
    /// One saved game, recognized by its token count.
    SavedMatch,
    /// No rule accepted the line.
    Unrecognized,
}

/// Heuristic family a rule belongs to, in priority order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    /// First token is a one or two digit code.
    NumericCode,
    /// First tokens are a fixed keyword or phrase.
    Keyword,
    /// Words after the leading player name.
    Phrase,
    /// Token count alone.
    Arity,
}

type Predicate = fn(&Line) -> bool;
type Decoder = fn(&Line) -> Result<Event, DecodeError>;

/// One entry of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    category: Category,
    group: RuleGroup,
    predicate: Predicate,
    decoder: Decoder,
}

impl Rule {
    /// Pairs a predicate with the decoder it selects.
    pub const fn new(
        category: Category,
        group: RuleGroup,
        predicate: Predicate,
        decoder: Decoder,
    ) -> Self {
        Self {
            category,
            group,
            predicate,
            decoder,
        }
    }

    /// Category this rule selects.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Heuristic family of the rule.
    pub fn group(&self) -> RuleGroup {
        self.group
    }

    /// Whether the rule claims the line.
    pub fn matches(&self, line: &Line) -> bool {
        (self.predicate)(line)
    }

    /// Runs the rule's decoder.
    pub fn decode(&self, line: &Line) -> Result<Event, DecodeError> {
        (self.decoder)(line)
    }
}

// ─────────────────────────────────────────────────────────────
//  Predicates
// ─────────────────────────────────────────────────────────────

fn numeric_code(line: &Line) -> bool {
    let word = line.word(0);
    (1..=2).contains(&word.len()) && word.bytes().all(|byte| byte.is_ascii_digit())
}

fn board_dump(line: &Line) -> bool {
    line.word(0).starts_with("board:")
}

fn toggle(line: &Line) -> bool {
    echoes::TOGGLES.contains(&line.word(0))
}

fn setting(line: &Line) -> bool {
    echoes::SETTINGS.contains(&line.word(0))
}

fn setting_value(line: &Line) -> bool {
    line.has_words(0, &["Value", "of"]) && line.has_words(3, &["set", "to"])
}

fn settings_header(line: &Line) -> bool {
    line.has_words(0, &["Settings", "of", "variables:"])
}

fn toggles_header(line: &Line) -> bool {
    line.has_words(0, &["The", "current", "settings", "are:"])
}

fn saved_header(line: &Line) -> bool {
    line.has_words(0, &["opponent", "matchlength", "score"])
}

fn saved_none(line: &Line) -> bool {
    line.has_words(0, &["no", "saved", "games."])
}

fn watching(line: &Line) -> bool {
    line.has_words(0, &["You're", "now", "watching"])
}

fn address(line: &Line) -> bool {
    line.has_words(0, &["Your", "email", "address", "is"])
}

fn notice(line: &Line) -> bool {
    line.word(0) == "**"
}

fn start_match(line: &Line) -> bool {
    line.word(1) == "and" && line.word(3) == "start"
}

fn resume_match(line: &Line) -> bool {
    line.word(1) == "and" && line.has_words(3, &["are", "resuming"])
}

fn saved_count(line: &Line) -> bool {
    line.word(1) == "has" && line.word(3) == "saved"
}

fn moves(line: &Line) -> bool {
    line.word(1) == "moves"
}

fn rolls(line: &Line) -> bool {
    line.word(1) == "rolls"
}

fn win_match(line: &Line) -> bool {
    line.has_words(1, &["wins", "a"])
}

fn win_game(line: &Line) -> bool {
    matches!(line.word(1), "wins" | "win") && line.has_words(2, &["the", "game"])
}

fn invitation(line: &Line) -> bool {
    line.has_words(1, &["wants", "to", "play"])
}

fn resignation(line: &Line) -> bool {
    line.has_words(1, &["wants", "to", "resign."])
}

fn doubles(line: &Line) -> bool {
    line.word(1) == "doubles."
}

fn accepts_double(line: &Line) -> bool {
    line.has_words(1, &["accepts", "the", "double."])
}

fn rejects(line: &Line) -> bool {
    line.word(1) == "rejects."
}

fn cannot_move(line: &Line) -> bool {
    line.has_words(1, &["can't", "move."])
}

fn saved_match(line: &Line) -> bool {
    line.len() == 5
}

// ─────────────────────────────────────────────────────────────
//  Rule table
// ─────────────────────────────────────────────────────────────

use Category as C;
use RuleGroup as G;

/// The rule table in priority order.
pub static RULES: &[Rule] = &[
    Rule::new(C::Code, G::NumericCode, numeric_code, codes::decode),
    Rule::new(C::Board, G::Keyword, board_dump, board::decode),
    Rule::new(C::Toggle, G::Keyword, toggle, echoes::toggle),
    Rule::new(C::Setting, G::Keyword, setting, echoes::setting),
    Rule::new(C::SettingValue, G::Keyword, setting_value, echoes::setting_value),
    Rule::new(C::SettingsHeader, G::Keyword, settings_header, echoes::settings_header),
    Rule::new(C::TogglesHeader, G::Keyword, toggles_header, echoes::toggles_header),
    Rule::new(C::SavedHeader, G::Keyword, saved_header, echoes::saved_header),
    Rule::new(C::SavedNone, G::Keyword, saved_none, echoes::saved_none),
    Rule::new(C::Watching, G::Keyword, watching, echoes::watching),
    Rule::new(C::Address, G::Keyword, address, echoes::address),
    Rule::new(C::Notice, G::Keyword, notice, echoes::notice),
    Rule::new(C::StartMatch, G::Phrase, start_match, phrases::start_match),
    Rule::new(C::ResumeMatch, G::Phrase, resume_match, phrases::resume_match),
    Rule::new(C::SavedCount, G::Phrase, saved_count, phrases::saved_count),
    Rule::new(C::Moves, G::Phrase, moves, phrases::moves),
    Rule::new(C::Rolls, G::Phrase, rolls, phrases::rolls),
    Rule::new(C::WinMatch, G::Phrase, win_match, phrases::win_match),
    Rule::new(C::WinGame, G::Phrase, win_game, phrases::win_game),
    Rule::new(C::Invitation, G::Phrase, invitation, phrases::invitation),
    Rule::new(C::Resignation, G::Phrase, resignation, phrases::resigns),
    Rule::new(C::Doubles, G::Phrase, doubles, phrases::doubles),
    Rule::new(C::AcceptsDouble, G::Phrase, accepts_double, phrases::accepts_double),
    Rule::new(C::RejectsResignation, G::Phrase, rejects, phrases::rejects),
    Rule::new(C::CannotMove, G::Phrase, cannot_move, phrases::cannot_move),
    Rule::new(C::SavedMatch, G::Arity, saved_match, echoes::saved_match),
];

// ─────────────────────────────────────────────────────────────
//  Classifier
// ─────────────────────────────────────────────────────────────

/// Applies a rule table to lines.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    rules: &'static [Rule],
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(RULES)
    }
}

impl Classifier {
    /// A classifier over a custom rule table.
    pub fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// The rules in priority order.
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    fn rule_for(&self, line: &Line) -> Option<&'static Rule> {
        self.rules.iter().find(|rule| rule.matches(line))
    }

    /// Category of the first rule that claims the line.
    pub fn classify(&self, line: &Line) -> Category {
        if line.is_empty() {
            return Category::Empty;
        }
        self.rule_for(line)
            .map_or(Category::Unrecognized, Rule::category)
    }

    /// Decodes a line with the first rule that claims it.
    ///
    /// A blank line decodes to [`EventKind::Empty`]. A line no rule claims
    /// fails with [`DecodeErrorKind::Unrecognized`].
    #[instrument(skip(self, line), fields(raw = line.raw()))]
    pub fn decode(&self, line: &Line) -> Result<Event, DecodeError> {
        if line.is_empty() {
            return Ok(Event::bare(EventKind::Empty));
        }
        let Some(rule) = self.rule_for(line) else {
            trace!("No rule claims line");
            return Err(DecodeError::new(DecodeErrorKind::Unrecognized));
        };
        trace!(category = %rule.category(), "Rule selected");
        rule.decode(line).inspect_err(|error| {
            debug!(category = %rule.category(), %error, "Decoder rejected line");
        })
    }

    /// Decodes a raw line, reporting any failure as an unrecognized event.
    pub fn parse(&self, raw: &str) -> Event {
        let line = Line::new(raw);
        self.decode(&line)
            .unwrap_or_else(|_| Event::unrecognized(line.raw()))
    }
}

/// Classifies pre-split tokens with the default rule table.
pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Category {
    Classifier::default().classify(&Line::from_tokens(tokens))
}

/// Decodes one line with the default rule table.
pub fn decode_line(raw: &str) -> Result<Event, DecodeError> {
    Classifier::default().decode(&Line::new(raw))
}

/// Decodes one line, never failing.
pub fn parse_line(raw: &str) -> Event {
    Classifier::default().parse(raw)
}
