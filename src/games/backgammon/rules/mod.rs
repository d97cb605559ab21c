//! Game rules for backgammon.
//!
//! Rules operate on the board oriented towards the side on roll, so that
//! entering, hitting and bearing off read the same for both colors.

pub mod mover;

pub use mover::{HOME_TOP, MoverBoard};
