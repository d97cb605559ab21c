//! Enumeration of structurally plausible half-move sequences.
//!
//! Candidates only depend on which points lost checkers and on the dice.
//! Whether a candidate is actually playable is decided by replaying it.

use super::action::{Movement, OFF};
use super::rules::MoverBoard;
use tracing::{debug, instrument};

/// A half-move sequence proposed for replay.
pub type Candidate = Vec<Movement>;

/// `(origin index, consecutive steps)` pairs; each pair starts a fresh
/// checker from the indexed origin.
type Pattern = &'static [(usize, u8)];

// ─────────────────────────────────────────────────────────────
//  Double-roll patterns
// ─────────────────────────────────────────────────────────────

// Longest plays come first within each table.

const ONE_ORIGIN: &[Pattern] = &[
    &[(0, 4)],
    &[(0, 3), (0, 1)],
    &[(0, 2), (0, 2)],
    &[(0, 2), (0, 1), (0, 1)],
    &[(0, 1), (0, 1), (0, 1), (0, 1)],
    &[(0, 3)],
    &[(0, 2), (0, 1)],
    &[(0, 1), (0, 1), (0, 1)],
    &[(0, 2)],
    &[(0, 1), (0, 1)],
    &[(0, 1)],
];

const TWO_ORIGINS: &[Pattern] = &[
    &[(0, 1), (1, 3)],
    &[(0, 1), (1, 2), (1, 1)],
    &[(0, 1), (1, 1), (1, 1), (1, 1)],
    &[(0, 2), (1, 2)],
    &[(0, 2), (1, 1), (1, 1)],
    &[(0, 1), (0, 1), (1, 2)],
    &[(0, 1), (0, 1), (1, 1), (1, 1)],
    &[(0, 3), (1, 1)],
    &[(0, 2), (0, 1), (1, 1)],
    &[(0, 1), (0, 1), (0, 1), (1, 1)],
    &[(0, 1), (1, 2)],
    &[(0, 1), (1, 1), (1, 1)],
    &[(0, 2), (1, 1)],
    &[(0, 1), (0, 1), (1, 1)],
    &[(0, 1), (1, 1)],
];

const THREE_ORIGINS: &[Pattern] = &[
    &[(0, 2), (1, 1), (2, 1)],
    &[(0, 1), (0, 1), (1, 1), (2, 1)],
    &[(0, 1), (1, 2), (2, 1)],
    &[(0, 1), (1, 1), (1, 1), (2, 1)],
    &[(0, 1), (1, 1), (2, 2)],
    &[(0, 1), (1, 1), (2, 1), (2, 1)],
    &[(0, 1), (1, 1), (2, 1)],
];

const FOUR_ORIGINS: &[Pattern] = &[&[(0, 1), (1, 1), (2, 1), (3, 1)]];

/// Error for a diff that touched too many points to be one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{} points lost checkers, at most {} can", count, Origins::MAX)]
pub struct TooManyOrigins {
    /// Number of points that lost checkers.
    pub count: usize,
}

impl std::error::Error for TooManyOrigins {}

/// Distinct points that lost checkers, back-most first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Origins(Vec<u8>);

impl Origins {
    /// No move touches more than four points.
    pub const MAX: usize = 4;

    /// Builds an origin set from point numbers in the mover's orientation.
    pub fn new(points: &[u8]) -> Result<Self, TooManyOrigins> {
        let mut points = points.to_vec();
        points.sort_unstable_by(|a, b| b.cmp(a));
        points.dedup();
        if points.len() > Self::MAX {
            return Err(TooManyOrigins {
                count: points.len(),
            });
        }
        Ok(Self(points))
    }

    /// Collects every slot from the bar down to point 1 that lost checkers.
    #[instrument(skip_all)]
    pub fn between(before: &MoverBoard, after: &MoverBoard) -> Result<Self, TooManyOrigins> {
        let points: Vec<u8> = (1..=25u8)
            .rev()
            .filter(|&slot| after.get(usize::from(slot)) < before.get(usize::from(slot)))
            .collect();
        debug!(?points, "Origins found");
        Self::new(&points)
    }

    /// Origin points, back-most first.
    pub fn points(&self) -> &[u8] {
        &self.0
    }

    /// Number of origins.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no checker left any point.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Enumerates candidate half-move sequences for the given origins and dice.
///
/// Zero origins yields one empty candidate. Non-doubles touching more than
/// two points yield nothing.
#[instrument(fields(origins = ?origins.points()))]
pub fn generate(origins: &Origins, die1: u8, die2: u8) -> Vec<Candidate> {
    let candidates = if die1 == die2 {
        double_candidates(origins, die1)
    } else {
        mixed_candidates(origins, die1, die2)
    };
    debug!(count = candidates.len(), "Candidates generated");
    candidates
}

fn double_candidates(origins: &Origins, die: u8) -> Vec<Candidate> {
    let table = match origins.len() {
        0 => return vec![Vec::new()],
        1 => ONE_ORIGIN,
        2 => TWO_ORIGINS,
        3 => THREE_ORIGINS,
        _ => FOUR_ORIGINS,
    };
    table
        .iter()
        .filter_map(|pattern| expand(pattern, origins.points(), die))
        .collect()
}

fn expand(pattern: Pattern, origins: &[u8], die: u8) -> Option<Candidate> {
    let mut movements = Vec::with_capacity(4);
    for &(index, steps) in pattern {
        let mut from = *origins.get(index)?;
        for _ in 0..steps {
            // A borne-off checker cannot move on.
            if from == OFF {
                return None;
            }
            let movement = Movement::step(from, die);
            from = movement.to;
            movements.push(movement);
        }
    }
    movements.sort_by(|a, b| b.from.cmp(&a.from));
    Some(movements)
}

fn mixed_candidates(origins: &Origins, die1: u8, die2: u8) -> Vec<Candidate> {
    match *origins.points() {
        [] => vec![Vec::new()],
        [from] => {
            let mut candidates = Vec::with_capacity(5);
            if from > die1 {
                candidates.push(vec![
                    Movement::step(from, die1),
                    Movement::step(from - die1, die2),
                ]);
            }
            if from > die2 {
                candidates.push(vec![
                    Movement::step(from, die2),
                    Movement::step(from - die2, die1),
                ]);
            }
            candidates.push(vec![Movement::step(from, die1)]);
            candidates.push(vec![Movement::step(from, die2)]);
            candidates.push(vec![Movement::step(from, die1), Movement::step(from, die2)]);
            candidates
        }
        [first, second] => vec![
            vec![Movement::step(first, die1), Movement::step(second, die2)],
            vec![Movement::step(first, die2), Movement::step(second, die1)],
        ],
        _ => Vec::new(),
    }
}
