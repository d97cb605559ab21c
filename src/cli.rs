//! Command-line interface for strictly_fibs.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strictly_fibs::Side;

/// Strictly FIBS - CLIP status line decoder and backgammon move checker
#[derive(Parser, Debug)]
#[command(name = "strictly_fibs")]
#[command(about = "Decode FIBS CLIP output and check backgammon moves", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "strictly_fibs.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode CLIP lines into JSON events, one per line
    Decode {
        /// File to read; standard input if omitted
        file: Option<PathBuf>,
    },

    /// Reconstruct the move between two board dumps
    Check {
        /// Board dump before the move
        #[arg(long)]
        before: String,

        /// Board dump after the move
        #[arg(long)]
        after: String,

        /// Side that moved; overrides the configuration
        #[arg(long, value_enum)]
        side: Option<SideArg>,
    },

    /// List every event kind with its token schema
    Schema,
}

/// Side selector on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SideArg {
    /// The local player
    White,
    /// The opponent
    Black,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::White => Side::White,
            SideArg::Black => Side::Black,
        }
    }
}
