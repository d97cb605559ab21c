//! Typed view over a decoded board dump.

use super::event::{Event, EventKind};
use super::token::TokenError;
use crate::games::backgammon::{POINT_COUNT, Position, Side};
use serde::Serialize;
use tracing::instrument;

/// Match lengths above this are the server's way of saying "unlimited".
const LONGEST_MATCH: u64 = 99;

/// Error raised when an event cannot be read as a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardStateError {
    /// The event is some other record.
    #[display("expected a board event, found {}", _0)]
    NotABoard(EventKind),

    /// The tokens do not follow the board schema.
    #[display("board tokens: {}", _0)]
    Token(TokenError),

    /// A value does not fit the position model.
    #[display("{} = {} does not fit a position", field, value)]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: i64,
    },
}

impl std::error::Error for BoardStateError {}

impl From<TokenError> for BoardStateError {
    fn from(error: TokenError) -> Self {
        BoardStateError::Token(error)
    }
}

/// A board dump with named fields, from the local player's point of view.
///
/// Points are indexed 0..24 for points 1 to 24. Positive counts belong to the
/// player, who moves towards point 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardState {
    /// Local player name.
    pub player: String,
    /// Opponent name.
    pub opponent: String,
    /// Match length; 0 for unlimited.
    pub match_length: u64,
    /// Scores of player and opponent.
    pub scores: [u64; 2],
    /// Checker counts on points 1 to 24.
    pub points: [i64; POINT_COUNT],
    /// 1 if the player is on roll, -1 for the opponent, 0 for nobody.
    pub turn: i64,
    /// Dice of the side on roll, negative for the opponent.
    pub dice: [i64; 2],
    /// Cube value.
    pub cube: u64,
    /// Doubling rights of player and opponent.
    pub may_double: [bool; 2],
    /// Checkers on the bar for player and opponent.
    pub bar: [u64; 2],
    /// Whether the Crawford game is over.
    pub post_crawford: bool,
}

impl BoardState {
    /// Reads a board event.
    #[instrument(skip(event), fields(kind = %event.kind()))]
    pub fn from_event(event: &Event) -> Result<Self, BoardStateError> {
        if event.kind() != EventKind::Board {
            return Err(BoardStateError::NotABoard(event.kind()));
        }
        let mut reader = event.reader();
        let player = reader.next_identifier()?.to_string();
        let opponent = reader.next_identifier()?.to_string();
        let match_length = reader.next_unsigned()?;
        let scores = [reader.next_unsigned()?, reader.next_unsigned()?];
        let mut points = [0; POINT_COUNT];
        for point in &mut points {
            *point = reader.next_integer()?;
        }
        let turn = reader.next_integer()?;
        let dice = [reader.next_integer()?, reader.next_integer()?];
        let cube = reader.next_unsigned()?;
        let may_double = [reader.next_boolean()?, reader.next_boolean()?];
        let bar = [reader.next_unsigned()?, reader.next_unsigned()?];
        let post_crawford = reader.next_boolean()?;
        reader.finish()?;

        Ok(Self {
            player,
            opponent,
            match_length,
            scores,
            points,
            turn,
            dice,
            cube,
            may_double,
            bar,
            post_crawford,
        })
    }

    /// Side on roll, if any.
    pub fn side_on_roll(&self) -> Option<Side> {
        Side::from_sign(self.turn)
    }

    /// Converts into a position with the player on the White side.
    #[instrument(skip(self), fields(player = %self.player))]
    pub fn to_position(&self) -> Result<Position, BoardStateError> {
        let mut position = Position::new();
        position.set_players(self.player.as_str(), self.opponent.as_str());

        let length = if self.match_length > LONGEST_MATCH {
            0
        } else {
            self.match_length
        };
        position.set_match_length(narrow_unsigned("match length", length)?);

        for side in [Side::White, Side::Black] {
            let index = side.index();
            position.set_score(side, narrow_unsigned("score", self.scores[index])?);
            position.set_bar(side, narrow_unsigned("bar", self.bar[index])?);
            position.set_may_double(side, self.may_double[index]);
        }

        let mut points = [0; POINT_COUNT];
        for (slot, count) in points.iter_mut().zip(self.points) {
            *slot = narrow_signed("point", count)?;
        }
        position.set_points(points);

        position.set_dice(
            narrow_signed("die", self.dice[0])?,
            narrow_signed("die", self.dice[1])?,
        );
        position.set_cube(narrow_unsigned("cube", self.cube)?);
        position.set_turn(self.side_on_roll());
        position.set_post_crawford(self.post_crawford);
        Ok(position)
    }
}

impl TryFrom<&Event> for BoardState {
    type Error = BoardStateError;

    fn try_from(event: &Event) -> Result<Self, Self::Error> {
        Self::from_event(event)
    }
}

fn narrow_unsigned(field: &'static str, value: u64) -> Result<u32, BoardStateError> {
    u32::try_from(value).map_err(|_| BoardStateError::OutOfRange {
        field,
        value: i64::try_from(value).unwrap_or(i64::MAX),
    })
}

fn narrow_signed(field: &'static str, value: i64) -> Result<i32, BoardStateError> {
    i32::try_from(value).map_err(|_| BoardStateError::OutOfRange { field, value })
}
