//! Batch decoding of recorded sessions and board-pair move checks.

use crate::clip::{BoardState, BoardStateError, Classifier, Event, EventKind};
use crate::config::FibsConfig;
use crate::games::backgammon::{Move, Position, Side, check_move};
use derive_more::Display;
use std::collections::BTreeMap;
use std::io::BufRead;
use tracing::{debug, instrument, warn};

/// Error raised while replaying input.
#[derive(Debug, Display)]
pub enum ReplayError {
    /// Reading the input failed.
    #[display("Failed to read line {}: {}", line, source)]
    Io {
        /// One-based line number.
        line: usize,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A board line did not decode to a board.
    #[display("Not a board dump: {}", _0)]
    NotABoard(String),

    /// A board could not become a position.
    #[display("Board cannot be checked: {}", _0)]
    Board(BoardStateError),
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io { source, .. } => Some(source),
            ReplayError::Board(error) => Some(error),
            ReplayError::NotABoard(_) => None,
        }
    }
}

impl From<BoardStateError> for ReplayError {
    fn from(error: BoardStateError) -> Self {
        ReplayError::Board(error)
    }
}

/// Decoded events of a session with a count per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    /// Events kept by the filter, in input order.
    pub events: Vec<Event>,
    /// Number of lines decoded per kind, including skipped ones.
    pub summary: BTreeMap<EventKind, usize>,
}

/// Decodes every line of `input`, honoring the skip settings of `config`.
///
/// Line endings are removed before classification.
#[instrument(skip_all)]
pub fn decode_reader(input: impl BufRead, config: &FibsConfig) -> Result<Transcript, ReplayError> {
    let classifier = Classifier::default();
    let mut transcript = Transcript::default();
    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(|source| ReplayError::Io {
            line: index + 1,
            source,
        })?;
        let event = classifier.parse(line.trim_end_matches('\r'));
        *transcript.summary.entry(event.kind()).or_default() += 1;

        let skipped = match event.kind() {
            EventKind::Empty => *config.skip_empty(),
            EventKind::Unrecognized => *config.skip_unrecognized(),
            _ => false,
        };
        if skipped {
            debug!(line = index + 1, kind = %event.kind(), "Skipping event");
        } else {
            transcript.events.push(event);
        }
    }
    Ok(transcript)
}

fn board_position(raw: &str) -> Result<Position, ReplayError> {
    let event = Classifier::default().parse(raw);
    if event.kind() != EventKind::Board {
        warn!(kind = %event.kind(), "Expected a board dump");
        return Err(ReplayError::NotABoard(raw.to_string()));
    }
    Ok(BoardState::from_event(&event)?.to_position()?)
}

/// Reconstructs the move `side` made between two board dumps.
///
/// The dice are taken from the `before` board.
#[instrument(skip(before, after))]
pub fn check_boards(before: &str, after: &str, side: Side) -> Result<Move, ReplayError> {
    let before = board_position(before)?;
    let after = board_position(after)?;
    let checked = check_move(&before, &after, side);
    debug!(%checked, status = %checked.status(), "Move checked");
    Ok(checked)
}

/// One line per event kind with its token schema.
pub fn schema_listing() -> Vec<String> {
    use strum::IntoEnumIterator;

    EventKind::iter()
        .map(|kind| match kind.schema() {
            Some(schema) => {
                let kinds: Vec<String> = schema.iter().map(ToString::to_string).collect();
                format!("{}: [{}]", kind, kinds.join(", "))
            }
            None => format!("{}: [identifier, unsigned, (unsigned, unsigned)...]", kind),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::backgammon::MoveStatus;

    const SESSION: &str = "1 guido 1234567890 foobar\r\n\nJoeBlack rolls 3 and 4.\nsomething odd\n";

    #[test]
    fn test_decode_reader_counts_and_skips() {
        let transcript = decode_reader(SESSION.as_bytes(), &FibsConfig::default()).unwrap();
        assert_eq!(transcript.events.len(), 3);
        assert_eq!(transcript.summary[&EventKind::Empty], 1);
        assert_eq!(transcript.summary[&EventKind::Welcome], 1);
        assert_eq!(transcript.summary[&EventKind::Unrecognized], 1);
        assert_eq!(transcript.events[0].tokens()[2].to_string(), "foobar");
    }

    #[test]
    fn test_check_boards_rejects_non_board() {
        let result = check_boards("JoeBlack rolls 3 and 4.", "JoeBlack rolls 3 and 4.", Side::White);
        assert!(matches!(result, Err(ReplayError::NotABoard(_))));
    }

    #[test]
    fn test_check_boards_opening_move() {
        let before = "board:You:someplayer:3:0:0:0:-2:0:0:0:0:5:0:3:0:0:0:-5:5:0:0:0:-3:0:-5:0:0:0:0:2:0:1:3:1:0:0:1:1:1:0:1:-1:0:25:0:0:0:0:2:0:0:0";
        let after = "board:You:someplayer:3:0:0:0:-2:0:0:0:2:4:0:2:0:0:0:-5:5:0:0:0:-3:0:-5:0:0:0:0:2:0:1:3:1:0:0:1:1:1:0:1:-1:0:25:0:0:0:0:2:0:0:0";
        let checked = check_boards(before, after, Side::White).unwrap();
        assert_eq!(checked.status(), MoveStatus::Legal);
        assert_eq!(checked.to_string(), "31: 8/5 6/5");
    }

    #[test]
    fn test_schema_listing_covers_every_kind() {
        use strum::IntoEnumIterator;
        assert_eq!(schema_listing().len(), EventKind::iter().count());
        assert!(schema_listing().contains(&"rolls: [identifier, unsigned, unsigned]".to_string()));
    }
}
