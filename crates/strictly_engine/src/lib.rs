//! Game state-machine contract for abstract strategy games.
//!
//! Every game implements [`GameEngine`]: a handful of rule hooks (legal
//! moves, validation, application, end-of-game detection, rendering) on top
//! of which the trait provides the shared lifecycle.
//!
//! # Architecture
//!
//! - **Core**: [`GameCore`] holds player bookkeeping and the append-only
//!   [`History`] of immutable [`MoveState`] snapshots
//! - **Pipeline**: [`GameEngine::move_`] normalizes, validates, re-checks
//!   the move against the move list (failsafe), applies, snapshots
//! - **Simultaneous play**: [`SimultaneousGame`] for comma-separated
//!   one-slot-per-player moves
//! - **Contracts**: commit pre/postconditions and [`invariants`] checked in
//!   debug builds
//! - **Utilities**: seeded randomness and container wire codecs in [`utils`]
//!
//! # Errors
//!
//! Player mistakes surface as [`MoveError`] carrying a localizable
//! [`UserMessage`]. Structural problems (bad state, bad variant, bad
//! history index) are [`EngineError`]s with the location they were raised.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod engine;
mod error;
mod game_core;
mod message;
mod render;
mod results;
mod simultaneous;
mod state;
mod validation;
mod variants;

pub mod invariants;
pub mod utils;

pub use contracts::{CommitContract, Contract, GameNotOver, HistoryAppendOnly};
pub use engine::{GameEngine, MoveOptions, normalize_move};
pub use error::{EngineError, EngineErrorKind, MoveError};
pub use game_core::GameCore;
pub use message::{UserMessage, keys};
pub use render::{Annotation, AnnotationKind, BoardStyle, EMPTY_GLYPH, RenderData};
pub use results::MoveResult;
pub use simultaneous::{SimultaneousGame, split_moves, submitted};
pub use state::{GameStatus, GameTag, History, MoveState, SerializedGame};
pub use validation::{ClickResult, Completeness, ValidationResult};
pub use variants::{GameFlag, GameInfo, VariantDef};
