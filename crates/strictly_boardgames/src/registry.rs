//! Runtime dispatch over the bundled games.
//!
//! Front ends that pick a game at run time hold an [`AnyGame`]; the
//! per-game types stay statically typed underneath.

use crate::games::claim::Claim;
use crate::games::hex::Hex;
use crate::games::ninarow::NinARow;
use serde::{Deserialize, Serialize};
use strictly_engine::{
    ClickResult, EngineError, EngineErrorKind, GameEngine, GameInfo, GameStatus, GameTag, MoveError, MoveOptions,
    RenderData, SimultaneousGame, ValidationResult,
};
use tracing::{info, instrument};

/// Identifier of a bundled game.
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
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameId {
    /// N-in-a-row.
    NinARow,
    /// Hex.
    Hex,
    /// Claim (simultaneous).
    Claim,
}

impl GameId {
    /// Every bundled game.
    pub fn all() -> impl Iterator<Item = GameId> {
        <GameId as strum::IntoEnumIterator>::iter()
    }

    /// Parses a game id, reporting unknown ids as an engine error.
    pub fn parse(uid: &str) -> Result<Self, EngineError> {
        uid.parse()
            .map_err(|_| EngineError::new(EngineErrorKind::UnknownGame(uid.to_string())))
    }
}

/// A game of any bundled kind.
#[derive(Debug, Clone, derive_more::From)]
pub enum AnyGame {
    /// N-in-a-row.
    NinARow(NinARow),
    /// Hex.
    Hex(Hex),
    /// Claim.
    Claim(Claim),
}

macro_rules! impl_game_dispatch {
    ($($variant:ident),*) => {
        impl GameId {
            /// Static metadata.
            pub fn info(self) -> GameInfo {
                match self {
                    $(GameId::$variant => $variant::INFO,)*
                }
            }
        }

        impl AnyGame {
            /// Starts a game. A missing seed is drawn at random and recorded.
            #[instrument(skip(variants))]
            pub fn create<S: AsRef<str> + std::fmt::Debug>(
                id: GameId,
                numplayers: usize,
                variants: &[S],
                seed: Option<u64>,
            ) -> Result<Self, EngineError> {
                let game = match (id, seed) {
                    $(
                        (GameId::$variant, Some(seed)) => Self::$variant($variant::with_seed(numplayers, variants, seed)?),
                        (GameId::$variant, None) => Self::$variant($variant::new(numplayers, variants)?),
                    )*
                };
                info!(game = %id, numplayers, "Game started");
                Ok(game)
            }

            /// Restores any bundled game from JSON, dispatching on its `game` field.
            #[instrument(skip(json))]
            pub fn from_json(json: &str) -> Result<Self, EngineError> {
                let tag = GameTag::peek(json)?;
                match GameId::parse(&tag.game)? {
                    $(GameId::$variant => Ok(Self::$variant($variant::from_json(json)?)),)*
                }
            }

            /// Which game this is.
            pub fn id(&self) -> GameId {
                match self {
                    $(Self::$variant(_) => GameId::$variant,)*
                }
            }

            /// Static metadata.
            pub fn info(&self) -> GameInfo {
                self.id().info()
            }

            /// Legal moves for the player to move.
            pub fn moves(&self) -> Vec<String> {
                match self {
                    $(Self::$variant(g) => g.moves(),)*
                }
            }

            /// Legal moves for `player`.
            pub fn moves_for(&self, player: usize) -> Vec<String> {
                match self {
                    $(Self::$variant(g) => g.moves_for(player),)*
                }
            }

            /// Validates a possibly partial move.
            pub fn validate_move(&self, mv: &str) -> ValidationResult {
                let mv = strictly_engine::normalize_move(mv);
                match self {
                    $(Self::$variant(g) => g.validate_move(&mv),)*
                }
            }

            /// Translates a click into a candidate move.
            pub fn handle_click(&self, mv: &str, row: usize, col: usize, piece: Option<&str>) -> ClickResult {
                match self {
                    $(Self::$variant(g) => g.handle_click(mv, row, col, piece),)*
                }
            }

            /// Applies a move.
            pub fn move_(&mut self, mv: &str, options: MoveOptions) -> Result<(), MoveError> {
                match self {
                    $(Self::$variant(g) => g.move_(mv, options).map(|_| ()),)*
                }
            }

            /// Plays `mv` on a copy.
            pub fn simulate(&self, mv: &str) -> Result<Self, MoveError> {
                match self {
                    $(Self::$variant(g) => g.simulate(mv).map(Self::$variant),)*
                }
            }

            /// Rewinds live state to snapshot `index`.
            pub fn load(&mut self, index: isize) -> Result<(), EngineError> {
                match self {
                    $(Self::$variant(g) => g.load(index),)*
                }
            }

            /// Board description.
            pub fn render(&self) -> RenderData {
                match self {
                    $(Self::$variant(g) => g.render(),)*
                }
            }

            /// In progress or complete.
            pub fn status(&self) -> GameStatus {
                match self {
                    $(Self::$variant(g) => g.status(),)*
                }
            }

            /// Serialized state as JSON.
            pub fn state_json(&self) -> Result<String, EngineError> {
                match self {
                    $(Self::$variant(g) => g.state_json(),)*
                }
            }

            /// Player to move.
            pub fn currplayer(&self) -> usize {
                match self {
                    $(Self::$variant(g) => *g.core().currplayer(),)*
                }
            }

            /// Seated players.
            pub fn numplayers(&self) -> usize {
                match self {
                    $(Self::$variant(g) => *g.core().numplayers(),)*
                }
            }

            /// Winners, empty while in progress.
            pub fn winner(&self) -> Vec<usize> {
                match self {
                    $(Self::$variant(g) => g.core().winner().clone(),)*
                }
            }

            /// Resolved variants.
            pub fn variants(&self) -> Vec<String> {
                match self {
                    $(Self::$variant(g) => g.core().variants().clone(),)*
                }
            }

            /// Moves committed so far, oldest first.
            pub fn moves_played(&self) -> Vec<String> {
                match self {
                    $(Self::$variant(g) => g.core().stack().moves_played().into_iter().map(str::to_string).collect(),)*
                }
            }

            /// Number of snapshots in the history.
            pub fn ply(&self) -> usize {
                match self {
                    $(Self::$variant(g) => g.core().stack().len(),)*
                }
            }
        }
    };
}

impl_game_dispatch!(NinARow, Hex, Claim);

impl AnyGame {
    /// Click on behalf of a specific seat.
    ///
    /// Simultaneous games rewrite only that seat's slot; turn-based games
    /// ignore the seat.
    pub fn handle_click_as(
        &self,
        mv: &str,
        row: usize,
        col: usize,
        player: usize,
        piece: Option<&str>,
    ) -> ClickResult {
        match self {
            Self::Claim(g) => g.handle_click_simultaneous(mv, row, col, player, piece),
            _ => self.handle_click(mv, row, col, piece),
        }
    }

    /// Per-player scores, for games that keep them.
    pub fn scores(&self) -> Option<Vec<usize>> {
        match self {
            Self::Claim(g) => Some(g.scores()),
            _ => None,
        }
    }
}
