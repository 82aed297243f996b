//! Error types for the game engine.
//!
//! Two families live here. [`MoveError`] is what a player sees: the move was
//! rejected, the game is over, or the engine tripped its own failsafe.
//! [`EngineError`] covers structural problems (bad serialized state, bad
//! variant, bad history index) and records where it was raised.

use crate::UserMessage;
use derive_more::{Display, Error};
use strictly_geometry::GeometryError;
use tracing::instrument;

/// Kinds of structural engine failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// A cell label could not be resolved on the board.
    #[display("malformed cell: {}", _0)]
    MalformedCell(String),

    /// `load` was asked for a snapshot that does not exist.
    #[display("history index {} out of range for {} snapshots", index, len)]
    HistoryIndex {
        /// Requested index (negative counts from the end).
        index: isize,
        /// Number of snapshots on the stack.
        len: usize,
    },

    /// A variant id the game does not declare.
    #[display("unknown variant: {}", _0)]
    UnknownVariant(String),

    /// Two variants from the same exclusive group.
    #[display("variants {} and {} are mutually exclusive", _0, _1)]
    ConflictingVariants(String, String),

    /// Serialized state belongs to a different game.
    #[display("state is for game {:?}, expected {:?}", found, expected)]
    GameMismatch {
        /// The game id this engine implements.
        expected: String,
        /// The game id found in the state.
        found: String,
    },

    /// No registered game has this id.
    #[display("unknown game: {}", _0)]
    UnknownGame(String),

    /// Player count outside the game's supported range.
    #[display("{} players requested, game supports {}..={}", requested, min, max)]
    PlayerCount {
        /// Requested count.
        requested: usize,
        /// Minimum supported.
        min: usize,
        /// Maximum supported.
        max: usize,
    },

    /// Serialized state could not be read or written.
    #[display("serialization failed: {}", _0)]
    Serialization(String),

    /// Stored variants differ from what resolving them yields.
    #[display("stored variants {:?} do not resolve to themselves ({:?})", stored, resolved)]
    VariantMismatch {
        /// Variants as serialized.
        stored: Vec<String>,
        /// The same list after resolution.
        resolved: Vec<String>,
    },

    /// A snapshot names a player the game does not have.
    #[display("snapshot has player {} to move in a {}-player game", player, numplayers)]
    PlayerOutOfRange {
        /// Player recorded in the snapshot.
        player: usize,
        /// Player count of the game.
        numplayers: usize,
    },

    /// Serialized state had no snapshots.
    #[display("serialized state has an empty history")]
    EmptyHistory,

    /// Board construction failed.
    #[display("board setup failed: {}", _0)]
    Setup(String),
}

/// Structural engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// What went wrong.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<GeometryError> for EngineError {
    #[track_caller]
    fn from(err: GeometryError) -> Self {
        Self::new(EngineErrorKind::MalformedCell(err.to_string()))
    }
}

impl From<serde_json::Error> for EngineError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(EngineErrorKind::Serialization(err.to_string()))
    }
}

/// Error returned by [`GameEngine::move_`](crate::GameEngine::move_).
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The move was malformed or illegal. The message is meant for the player.
    #[display("{}", _0)]
    Rejected(UserMessage),

    /// The game has ended; nothing further may be played.
    #[display("{}", _0)]
    GameOver(UserMessage),

    /// The validator accepted a move the move generator does not list.
    ///
    /// This is an engine defect, not a player mistake.
    #[display("Failsafe tripped: {:?} passed validation but is not a legal move", _0)]
    Failsafe(String),

    /// A post-move consistency check failed.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

impl MoveError {
    /// The player-facing message, if this error carries one.
    pub fn user_message(&self) -> Option<&UserMessage> {
        match self {
            Self::Rejected(msg) | Self::GameOver(msg) => Some(msg),
            Self::Failsafe(_) | Self::InvariantViolation(_) => None,
        }
    }

    /// True for errors that indicate a bug in the engine rather than bad input.
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Failsafe(_) | Self::InvariantViolation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_records_location() {
        let err = EngineError::new(EngineErrorKind::EmptyHistory);
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains("empty history"));
    }

    #[test]
    fn test_geometry_error_converts() {
        let err: EngineError = GeometryError::malformed("zz99").into();
        assert!(matches!(err.kind, EngineErrorKind::MalformedCell(_)));
    }

    #[test]
    fn test_defect_classification() {
        assert!(MoveError::Failsafe("a1".into()).is_defect());
        let rejected = MoveError::Rejected(UserMessage::new(crate::message::keys::INVALID_MOVE));
        assert!(!rejected.is_defect());
        assert!(rejected.user_message().is_some());
    }
}
