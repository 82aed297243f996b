//! Snapshots, the history stack, and the serialized game envelope.

use crate::{EngineError, EngineErrorKind, MoveResult};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Lifecycle of a game as observed from outside.
///
/// There is no observable "not started" state: construction pushes the
/// first snapshot before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameStatus {
    /// Moves are being accepted.
    InProgress,
    /// The game has ended; terminal.
    Complete,
}

/// One ply of history: everything needed to rebuild live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct MoveState<B> {
    /// Player to move after this ply.
    currplayer: usize,
    /// Game-specific board.
    board: B,
    /// The move that produced this state; absent for the initial state.
    lastmove: Option<String>,
    /// What the move did.
    results: Vec<MoveResult>,
    /// When the snapshot was taken.
    #[new(value = "Utc::now()")]
    timestamp: DateTime<Utc>,
}

/// Append-only stack of immutable snapshots.
///
/// Snapshots are shared behind [`Arc`]; nothing hands out a mutable
/// reference to one once pushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History<B> {
    stack: Vec<Arc<MoveState<B>>>,
}

impl<B> Default for History<B> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<B> History<B> {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot.
    pub fn push(&mut self, state: MoveState<B>) {
        self.stack.push(Arc::new(state));
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no snapshot has been pushed.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&Arc<MoveState<B>>> {
        self.stack.last()
    }

    /// Converts a possibly negative index into a position in the stack.
    pub fn resolve_index(&self, index: isize) -> Option<usize> {
        let len = self.stack.len() as isize;
        let pos = if index < 0 { len + index } else { index };
        (0..len).contains(&pos).then_some(pos as usize)
    }

    /// Snapshot at `index`; negative counts from the end (`-1` is current).
    #[track_caller]
    pub fn get(&self, index: isize) -> Result<&Arc<MoveState<B>>, EngineError> {
        self.resolve_index(index)
            .and_then(|pos| self.stack.get(pos))
            .ok_or_else(|| {
                EngineError::new(EngineErrorKind::HistoryIndex {
                    index,
                    len: self.stack.len(),
                })
            })
    }

    /// Snapshots oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<MoveState<B>>> {
        self.stack.iter()
    }

    /// Move strings played so far, oldest first.
    pub fn moves_played(&self) -> Vec<&str> {
        self.stack.iter().filter_map(|s| s.lastmove().as_deref()).collect()
    }
}

/// Serialized form of a whole game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct SerializedGame<B> {
    /// Game identifier.
    game: String,
    /// Player count.
    numplayers: usize,
    /// Selected variants.
    #[serde(default)]
    variants: Vec<String>,
    /// Whether the game has ended.
    gameover: bool,
    /// Winning players.
    #[serde(default)]
    winner: Vec<usize>,
    /// Seed for derived randomness.
    #[serde(default)]
    seed: u64,
    /// Full history.
    stack: History<B>,
}

impl<B> SerializedGame<B> {
    /// Assembles a serialized game.
    pub fn new(
        game: impl Into<String>,
        numplayers: usize,
        variants: Vec<String>,
        gameover: bool,
        winner: Vec<usize>,
        seed: u64,
        stack: History<B>,
    ) -> Self {
        Self {
            game: game.into(),
            numplayers,
            variants,
            gameover,
            winner,
            seed,
            stack,
        }
    }

    /// Splits the envelope into its parts.
    pub fn into_parts(self) -> (String, usize, Vec<String>, bool, Vec<usize>, u64, History<B>) {
        (
            self.game,
            self.numplayers,
            self.variants,
            self.gameover,
            self.winner,
            self.seed,
            self.stack,
        )
    }
}

impl<B: Serialize> SerializedGame<B> {
    /// Renders as JSON.
    #[instrument(skip(self), fields(game = %self.game))]
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Reads only the `game` field of a serialized state.
#[derive(Debug, Deserialize)]
pub struct GameTag {
    /// Game identifier.
    pub game: String,
}

impl GameTag {
    /// Peeks at a JSON state.
    #[instrument(skip(json))]
    pub fn peek(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> History<Vec<u8>> {
        let mut history = History::new();
        for i in 0..n {
            let lastmove = (i > 0).then(|| format!("m{i}"));
            history.push(MoveState::new(1, vec![i as u8], lastmove, Vec::new()));
        }
        history
    }

    #[test]
    fn test_negative_indices() {
        let h = history(3);
        assert_eq!(h.get(-1).unwrap().board(), &vec![2]);
        assert_eq!(h.get(-3).unwrap().board(), &vec![0]);
        assert_eq!(h.get(1).unwrap().board(), &vec![1]);
        assert!(h.get(3).is_err());
        assert!(h.get(-4).is_err());
    }

    #[test]
    fn test_moves_played_skips_initial() {
        assert_eq!(history(3).moves_played(), vec!["m1", "m2"]);
    }

    #[test]
    fn test_history_serializes_as_plain_array() {
        let json = serde_json::to_value(history(2)).unwrap();
        let stack = json.as_array().unwrap();
        assert_eq!(stack.len(), 2);
        assert!(stack[0]["lastmove"].is_null());
        assert_eq!(stack[1]["lastmove"], "m1");
    }

    #[test]
    fn test_peek_game_tag() {
        let tag = GameTag::peek(r#"{"game":"hex","numplayers":2}"#).unwrap();
        assert_eq!(tag.game, "hex");
        assert!(GameTag::peek("not json").is_err());
    }
}
