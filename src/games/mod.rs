//! Game engines.

pub mod backgammon;
