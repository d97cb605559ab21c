//! Core domain types for backgammon.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of checkers each side starts with.
pub const CHECKERS_PER_SIDE: u32 = 15;

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

/// Side of the board.
///
/// White's checkers are stored as positive counts and move from point 24
/// towards point 1. Black's checkers are negative and move the other way.
/// A decoded board always puts the local player on the White side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Side {
    /// Positive checkers.
    White,
    /// Negative checkers.
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Sign of this side's checker counts.
    pub fn sign(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Index into per-side arrays (scores, bar, doubling rights).
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Maps a signed indicator to a side; zero means nobody.
    pub fn from_sign(value: i64) -> Option<Self> {
        match value.signum() {
            1 => Some(Side::White),
            -1 => Some(Side::Black),
            _ => None,
        }
    }
}

/// Error returned when a position is edited out of bounds.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PositionError {
    /// Point numbers run from 1 to 24.
    #[display("Point {} is off the board", _0)]
    PointOutOfRange(usize),

    /// A point cannot hold more than every checker of a side.
    #[display("Point {} cannot hold {} checkers", point, count)]
    Overfull {
        /// Point number.
        point: usize,
        /// Requested signed count.
        count: i32,
    },
}

impl std::error::Error for PositionError {}

/// A backgammon position snapshot.
///
/// Points are indexed 1 to 24 from White's point of view. Positions are
/// plain values: the move checker only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    players: [String; 2],
    match_length: u32,
    scores: [u32; 2],
    points: [i32; POINT_COUNT],
    bar: [u32; 2],
    dice: [i32; 2],
    cube: u32,
    turn: Option<Side>,
    may_double: [bool; 2],
    post_crawford: bool,
}

impl Position {
    /// Creates an empty board with a centered cube.
    pub fn new() -> Self {
        Self {
            players: [String::new(), String::new()],
            match_length: 0,
            scores: [0, 0],
            points: [0; POINT_COUNT],
            bar: [0, 0],
            dice: [0, 0],
            cube: 1,
            turn: None,
            may_double: [true, true],
            post_crawford: false,
        }
    }

    /// Creates the standard starting position.
    #[instrument]
    pub fn initial() -> Self {
        let mut position = Self::new();
        position.points = [
            -2, 0, 0, 0, 0, 5, 0, 3, 0, 0, 0, -5, 5, 0, 0, 0, -3, 0, -5, 0, 0, 0, 0, 2,
        ];
        position
    }

    /// Player names, White first.
    pub fn players(&self) -> &[String; 2] {
        &self.players
    }

    /// Name of the player on the given side.
    pub fn player(&self, side: Side) -> &str {
        &self.players[side.index()]
    }

    /// Match length, 0 for unlimited matches.
    pub fn match_length(&self) -> u32 {
        self.match_length
    }

    /// Score of the given side.
    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// All 24 signed point counts, point 1 first.
    pub fn points(&self) -> &[i32; POINT_COUNT] {
        &self.points
    }

    /// Signed checker count on a point (1-24), 0 for anything else.
    pub fn point(&self, point: usize) -> i32 {
        match point {
            1..=POINT_COUNT => self.points[point - 1],
            _ => 0,
        }
    }

    /// Checkers of the given side waiting on the bar.
    pub fn bar(&self, side: Side) -> u32 {
        self.bar[side.index()]
    }

    /// Dice as rolled; negative values belong to Black.
    pub fn dice(&self) -> [i32; 2] {
        self.dice
    }

    /// Current cube value.
    pub fn cube(&self) -> u32 {
        self.cube
    }

    /// Side on roll, if any.
    pub fn turn(&self) -> Option<Side> {
        self.turn
    }

    /// Whether the given side may offer a double.
    pub fn may_double(&self, side: Side) -> bool {
        self.may_double[side.index()]
    }

    /// Whether the Crawford game of this match has already been played.
    pub fn post_crawford(&self) -> bool {
        self.post_crawford
    }

    /// Sets both player names, White first.
    pub fn set_players(&mut self, white: impl Into<String>, black: impl Into<String>) {
        self.players = [white.into(), black.into()];
    }

    /// Sets the match length (0 for unlimited).
    pub fn set_match_length(&mut self, length: u32) {
        self.match_length = length;
    }

    /// Sets the score of one side.
    pub fn set_score(&mut self, side: Side, score: u32) {
        self.scores[side.index()] = score;
    }

    /// Sets the signed checker count of a point.
    pub fn set_point(&mut self, point: usize, count: i32) -> Result<(), PositionError> {
        if !(1..=POINT_COUNT).contains(&point) {
            return Err(PositionError::PointOutOfRange(point));
        }
        if count.unsigned_abs() > CHECKERS_PER_SIDE {
            return Err(PositionError::Overfull { point, count });
        }
        self.points[point - 1] = count;
        Ok(())
    }

    /// Replaces all 24 points at once.
    pub fn set_points(&mut self, points: [i32; POINT_COUNT]) {
        self.points = points;
    }

    /// Sets the number of checkers a side has on the bar.
    pub fn set_bar(&mut self, side: Side, count: u32) {
        self.bar[side.index()] = count;
    }

    /// Sets the dice; use negative values for a Black roll.
    pub fn set_dice(&mut self, die1: i32, die2: i32) {
        self.dice = [die1, die2];
    }

    /// Sets the cube value.
    pub fn set_cube(&mut self, cube: u32) {
        self.cube = cube;
    }

    /// Sets the side on roll.
    pub fn set_turn(&mut self, turn: Option<Side>) {
        self.turn = turn;
    }

    /// Sets a side's doubling right.
    pub fn set_may_double(&mut self, side: Side, may_double: bool) {
        self.may_double[side.index()] = may_double;
    }

    /// Marks whether the Crawford game has been played.
    pub fn set_post_crawford(&mut self, post_crawford: bool) {
        self.post_crawford = post_crawford;
    }

    /// Checkers of a side still in play (points plus bar).
    pub fn checkers_in_play(&self, side: Side) -> u32 {
        let sign = side.sign();
        let on_points: u32 = self
            .points
            .iter()
            .filter(|&&count| count * sign > 0)
            .map(|count| count.unsigned_abs())
            .sum();
        on_points + self.bar(side)
    }

    /// Checkers a side has already borne off.
    pub fn borne_off(&self, side: Side) -> u32 {
        CHECKERS_PER_SIDE.saturating_sub(self.checkers_in_play(side))
    }

    /// Pip count of a side: total distance left to bear everything off.
    pub fn pip_count(&self, side: Side) -> u32 {
        let on_points: u32 = self
            .points
            .iter()
            .enumerate()
            .filter(|(_, count)| **count * side.sign() > 0)
            .map(|(index, count)| {
                let distance = match side {
                    Side::White => index as u32 + 1,
                    Side::Black => (POINT_COUNT - index) as u32,
                };
                distance * count.unsigned_abs()
            })
            .sum();
        on_points + 25 * self.bar(side)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
