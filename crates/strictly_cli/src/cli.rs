//! Command-line interface for the strictly game driver.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly - create, inspect and advance board games stored as JSON
#[derive(Parser, Debug)]
#[command(name = "strictly")]
#[command(about = "Drive abstract strategy games from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional; defaults apply when missing)
    #[arg(short, long, global = true, default_value = "strictly.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List bundled games with their variants
    List,

    /// Start a new game and write its state file
    New {
        /// Game id (see `list`)
        game: String,

        /// State file to create
        #[arg(short, long)]
        out: PathBuf,

        /// Number of players (config or game minimum when omitted)
        #[arg(short, long)]
        players: Option<usize>,

        /// Variant id; repeat for several
        #[arg(short, long = "variant")]
        variants: Vec<String>,

        /// Seed for the game's random draws
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print legal moves
    Moves {
        /// State file
        state: PathBuf,

        /// List for this player instead of the player to move
        #[arg(long)]
        player: Option<usize>,
    },

    /// Check a (possibly partial) move without applying it
    Validate {
        /// State file
        state: PathBuf,

        /// Move string
        #[arg(value_name = "MOVE")]
        mv: String,
    },

    /// Apply a move and save the result
    Play {
        /// State file
        state: PathBuf,

        /// Move string
        #[arg(value_name = "MOVE")]
        mv: String,

        /// Show the outcome without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Draw the board
    Render {
        /// State file
        state: PathBuf,

        /// Show the snapshot at this history index (negative counts from the end)
        #[arg(long, allow_hyphen_values = true)]
        at: Option<isize>,

        /// Emit the render description as JSON
        #[arg(long)]
        json: bool,
    },
}
