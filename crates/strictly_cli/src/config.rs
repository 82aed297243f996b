//! TOML configuration for the command-line driver.
//!
//! ```toml
//! seed = 42
//! log_filter = "info,strictly_engine=debug"
//!
//! [games.hex]
//! players = 2
//! variants = ["size-9"]
//! ```

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use strictly_boardgames::GameId;
use tracing::{debug, info, instrument};

/// Log filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Driver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for new games. Random when absent.
    seed: Option<u64>,

    /// `tracing` filter directive, e.g. `"info"`.
    log_filter: Option<String>,

    /// Per-game defaults keyed by game uid.
    games: BTreeMap<String, GameDefaults>,
}

/// Defaults applied when creating a game of one kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameDefaults {
    /// Player count.
    players: Option<usize>,

    /// Variant ids.
    variants: Vec<String>,
}

impl EngineConfig {
    /// Loads configuration from a TOML file and checks every `[games.*]`
    /// section against the bundled games.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let shown = path.as_ref().display().to_string();
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Read {
                path: shown.clone(),
                reason: e.to_string(),
            })
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Parse {
                path: shown,
                reason: e.message().to_string(),
            })
        })?;
        config.check_games()?;

        info!(games = config.games.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Rejects sections for unknown games, player counts a game cannot
    /// seat and variants it does not declare.
    pub fn check_games(&self) -> Result<(), ConfigError> {
        for (uid, defaults) in &self.games {
            let id = GameId::parse(uid).map_err(|_| ConfigError::new(ConfigErrorKind::UnknownGame(uid.clone())))?;
            let info = id.info();
            if let Some(players) = defaults.players
                && !(info.min_players..=info.max_players).contains(&players)
            {
                return Err(ConfigError::new(ConfigErrorKind::Players {
                    game: uid.clone(),
                    players,
                    min: info.min_players,
                    max: info.max_players,
                }));
            }
            info.resolve_variants(defaults.variants.as_slice()).map_err(|e| {
                ConfigError::new(ConfigErrorKind::Variants {
                    game: uid.clone(),
                    reason: e.kind.to_string(),
                })
            })?;
        }
        Ok(())
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Defaults for game `uid`; empty when the config has none.
    pub fn game(&self, uid: &str) -> GameDefaults {
        self.games.get(uid).cloned().unwrap_or_default()
    }

    /// The log filter to install.
    pub fn log_filter_or_default(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

/// What was wrong with the config file.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    /// The file exists but could not be read.
    #[display("cannot read {}: {}", path, reason)]
    Read {
        /// Config path.
        path: String,
        /// I/O error text.
        reason: String,
    },

    /// The file is not valid TOML for [`EngineConfig`].
    #[display("cannot parse {}: {}", path, reason)]
    Parse {
        /// Config path.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// A `[games.<uid>]` section for a game that is not bundled.
    #[display("[games.{}] names no bundled game", _0)]
    UnknownGame(String),

    /// `players` outside what the game seats.
    #[display("[games.{}] players = {} but the game seats {}..={}", game, players, min, max)]
    Players {
        /// Game uid.
        game: String,
        /// Configured count.
        players: usize,
        /// Fewest players.
        min: usize,
        /// Most players.
        max: usize,
    },

    /// `variants` the game rejects.
    #[display("[games.{}] variants: {}", game, reason)]
    Variants {
        /// Game uid.
        game: String,
        /// Why they were rejected.
        reason: String,
    },
}

/// Config error with the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", kind, file, line)]
pub struct ConfigError {
    /// What went wrong.
    pub kind: ConfigErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a config error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
