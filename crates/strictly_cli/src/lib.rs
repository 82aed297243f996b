//! Command-line driver for the strictly game engine.
//!
//! Games live in JSON state files. Each subcommand loads a file, runs one
//! engine operation and, for `new` and `play`, writes the file back.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use config::{ConfigError, ConfigErrorKind, EngineConfig, GameDefaults};

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber on stderr.
///
/// `RUST_LOG` wins over `filter` when set.
pub fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();
}
