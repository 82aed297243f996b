//! The state-machine contract every game implements.
//!
//! A game supplies its rules through the required hooks of [`GameEngine`];
//! the provided methods implement the shared lifecycle on top of them:
//! construction, loading, the validate-then-failsafe move pipeline,
//! snapshotting and serialization.
//!
//! ```text
//! construct ──► InProgress ──move_──► InProgress ──move_ + check_eog──► Complete
//!                                                                        │
//!                                               move_ ──► MoveError::GameOver
//! ```

use crate::contracts::{CommitContract, Contract};
use crate::{
    ClickResult, Completeness, EngineError, EngineErrorKind, GameCore, GameInfo, GameStatus, GameTag,
    MoveError, MoveState, RenderData, SerializedGame, ValidationResult,
};
use derive_setters::Setters;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Options for [`GameEngine::move_`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Setters)]
#[setters(prefix = "with_")]
pub struct MoveOptions {
    /// Apply an unfinished move to live state only; no snapshot is pushed.
    pub partial: bool,
    /// Skip validation and the failsafe check.
    pub trusted: bool,
}

/// Canonical form of a move string: whitespace removed, lowercased.
pub fn normalize_move(mv: &str) -> String {
    mv.split_whitespace().collect::<String>().to_lowercase()
}

/// A game: rules plus the shared lifecycle.
///
/// Implementors keep their live board in their own fields and embed a
/// [`GameCore`] for the bookkeeping. `Clone` must produce an independent
/// copy; the shared history is immutable, so cloning it is safe.
pub trait GameEngine: Clone + Sized {
    /// Snapshot of the game-specific board.
    type Board: Clone + Debug + PartialEq + Serialize + DeserializeOwned;

    /// Static metadata.
    const INFO: GameInfo;

    // ─────────────────────────────────────────────────────────────
    //  Required hooks
    // ─────────────────────────────────────────────────────────────

    /// Builds live state for `core`. Must not push snapshots.
    ///
    /// For a fresh game this is the initial position. When restoring from
    /// serialized state, `load(-1)` overwrites the live fields afterwards.
    fn setup(core: GameCore<Self::Board>) -> Result<Self, EngineError>;

    /// Shared bookkeeping.
    fn core(&self) -> &GameCore<Self::Board>;

    /// Shared bookkeeping, mutable.
    fn core_mut(&mut self) -> &mut GameCore<Self::Board>;

    /// Deep copy of live board fields.
    fn snapshot_board(&self) -> Self::Board;

    /// Replaces live board fields with a deep copy of `board`.
    fn restore_board(&mut self, board: &Self::Board);

    /// Every legal complete move for `player`, sorted and deduplicated.
    ///
    /// Must not mutate. Called only while the game is in progress.
    fn legal_moves(&self, player: usize) -> Vec<String>;

    /// Validates a possibly partial, already normalized move string.
    ///
    /// Never panics; every failure is reported in the result.
    fn validate_move(&self, mv: &str) -> ValidationResult;

    /// Turns a click on `(row, col)` into a new candidate move string.
    fn handle_click(&self, mv: &str, row: usize, col: usize, piece: Option<&str>) -> ClickResult;

    /// Mutates live state for a validated move and records results.
    ///
    /// Player rotation, end-of-game checks and snapshotting happen after.
    fn apply(&mut self, mv: &str, partial: bool) -> Result<(), MoveError>;

    /// Decides whether the game has ended, calling [`GameCore::end_game`] if so.
    fn check_eog(&mut self);

    /// Board description for an external renderer.
    fn render(&self) -> RenderData;

    // ─────────────────────────────────────────────────────────────
    //  Overridable defaults
    // ─────────────────────────────────────────────────────────────

    /// Hands the turn on after a committed move.
    fn advance_player(&mut self) {
        self.core_mut().advance_player();
    }

    /// Second, independent legality check run after validation.
    fn failsafe(&self, mv: &str) -> bool {
        self.moves().iter().any(|m| m == mv)
    }

    // ─────────────────────────────────────────────────────────────
    //  Construction
    // ─────────────────────────────────────────────────────────────

    /// A fresh game with a random seed. The seed is recorded in state.
    fn new<S: AsRef<str> + Debug>(numplayers: usize, variants: &[S]) -> Result<Self, EngineError> {
        Self::with_seed(numplayers, variants, rand::random())
    }

    /// A fresh game with an explicit seed.
    #[instrument(skip(variants), fields(game = Self::INFO.uid))]
    fn with_seed<S: AsRef<str> + Debug>(
        numplayers: usize,
        variants: &[S],
        seed: u64,
    ) -> Result<Self, EngineError> {
        Self::INFO.check_players(numplayers)?;
        let variants = Self::INFO.resolve_variants(variants)?;
        let mut game = Self::setup(GameCore::new(numplayers, variants, seed))?;
        game.save_state();
        info!(numplayers, seed, "Game created");
        Ok(game)
    }

    /// Restores a game from its serialized form and loads the latest snapshot.
    #[instrument(skip(state), fields(game = Self::INFO.uid))]
    fn from_state(state: SerializedGame<Self::Board>) -> Result<Self, EngineError> {
        let (game, numplayers, variants, gameover, winner, seed, stack) = state.into_parts();
        if game != Self::INFO.uid {
            return Err(EngineError::new(EngineErrorKind::GameMismatch {
                expected: Self::INFO.uid.to_string(),
                found: game,
            }));
        }
        Self::INFO.check_players(numplayers)?;
        let resolved = Self::INFO.resolve_variants(&variants)?;
        if resolved != variants {
            return Err(EngineError::new(EngineErrorKind::VariantMismatch {
                stored: variants,
                resolved,
            }));
        }
        if stack.is_empty() {
            return Err(EngineError::new(EngineErrorKind::EmptyHistory));
        }
        let core = GameCore::restored(numplayers, variants, gameover, winner, seed, stack);
        let mut game = Self::setup(core)?;
        game.load(-1)?;
        debug!(ply = game.core().stack().len(), "Game restored");
        Ok(game)
    }

    /// Restores a game from JSON.
    #[instrument(skip(json), fields(game = Self::INFO.uid))]
    fn from_json(json: &str) -> Result<Self, EngineError> {
        let tag = GameTag::peek(json)?;
        if tag.game != Self::INFO.uid {
            return Err(EngineError::new(EngineErrorKind::GameMismatch {
                expected: Self::INFO.uid.to_string(),
                found: tag.game,
            }));
        }
        let state: SerializedGame<Self::Board> = serde_json::from_str(json)?;
        Self::from_state(state)
    }

    /// Populates live fields from snapshot `index` (negative counts from the end).
    #[instrument(skip(self), fields(game = Self::INFO.uid))]
    fn load(&mut self, index: isize) -> Result<(), EngineError> {
        let snapshot = Arc::clone(self.core().stack().get(index)?);
        let numplayers = *self.core().numplayers();
        if !(1..=numplayers).contains(snapshot.currplayer()) {
            return Err(EngineError::new(EngineErrorKind::PlayerOutOfRange {
                player: *snapshot.currplayer(),
                numplayers,
            }));
        }
        let core = self.core_mut();
        core.set_currplayer(*snapshot.currplayer());
        core.set_lastmove(snapshot.lastmove().clone());
        core.set_results(snapshot.results().clone());
        self.restore_board(snapshot.board());
        debug!(currplayer = snapshot.currplayer(), "Snapshot loaded");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Legal moves for the player to move; empty once the game is over.
    fn moves(&self) -> Vec<String> {
        self.moves_for(*self.core().currplayer())
    }

    /// Legal moves for `player`; empty once the game is over.
    fn moves_for(&self, player: usize) -> Vec<String> {
        if *self.core().gameover() {
            return Vec::new();
        }
        self.legal_moves(player)
    }

    /// In progress or complete.
    fn status(&self) -> GameStatus {
        self.core().status()
    }

    /// How many earlier snapshots show the current position with the same player to move.
    fn repetitions(&self) -> usize {
        let stack = self.core().stack();
        let Some(current) = stack.last() else {
            return 0;
        };
        stack
            .iter()
            .take(stack.len() - 1)
            .filter(|s| s.board() == current.board() && s.currplayer() == current.currplayer())
            .count()
    }

    /// Serialized form of the whole game.
    fn state(&self) -> SerializedGame<Self::Board> {
        let core = self.core();
        SerializedGame::new(
            Self::INFO.uid,
            *core.numplayers(),
            core.variants().clone(),
            *core.gameover(),
            core.winner().clone(),
            *core.seed(),
            core.stack().clone(),
        )
    }

    /// Serialized form as JSON.
    fn state_json(&self) -> Result<String, EngineError> {
        self.state().to_json()
    }

    /// Snapshot of live state, as `save_state` would push it.
    fn move_state(&self) -> MoveState<Self::Board> {
        let core = self.core();
        MoveState::new(
            *core.currplayer(),
            self.snapshot_board(),
            core.lastmove().clone(),
            core.results().clone(),
        )
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Pushes a snapshot of live state onto the history.
    fn save_state(&mut self) {
        let state = self.move_state();
        self.core_mut().push_snapshot(state);
    }

    /// Applies a move.
    ///
    /// Untrusted input is normalized, validated, and then checked against
    /// the move list as a failsafe. A partial move mutates live state
    /// only. A full move advances the player, checks for the end of the
    /// game and pushes a snapshot.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] once the game is complete,
    /// [`MoveError::Rejected`] for bad input, and [`MoveError::Failsafe`]
    /// when the validator and move generator disagree.
    #[instrument(skip(self), fields(game = Self::INFO.uid))]
    fn move_(&mut self, mv: &str, options: MoveOptions) -> Result<&mut Self, MoveError> {
        let mv = normalize_move(mv);
        CommitContract::pre(self.core(), mv.as_str())?;

        if !options.trusted {
            let result = self.validate_move(&mv);
            if !result.valid() {
                debug!(message = %result.message(), "Move rejected");
                return Err(MoveError::Rejected(result.message().clone()));
            }
            if !options.partial {
                if result.complete() == Completeness::Incomplete {
                    return Err(MoveError::Rejected(result.message().clone()));
                }
                if !self.failsafe(&mv) {
                    warn!(%mv, "Validator accepted a move the generator does not list");
                    return Err(MoveError::Failsafe(mv));
                }
            }
        }

        let before = (cfg!(debug_assertions) && !options.partial).then(|| self.core().clone());

        // Live results keep describing the last committed move until this
        // one commits.
        let committed = self.core_mut().begin_move();
        if let Err(err) = self.apply(&mv, options.partial) {
            self.core_mut().set_results(committed);
            return Err(err);
        }
        if options.partial {
            self.core_mut().set_results(committed);
            debug!(%mv, "Partial move applied");
            return Ok(self);
        }

        self.core_mut().set_lastmove(Some(mv.clone()));
        self.advance_player();
        self.check_eog();
        self.save_state();

        if let Some(before) = before
            && let Err(violation) = CommitContract::post(&before, self.core())
        {
            *self.core_mut() = before;
            if let Err(err) = self.load(-1) {
                warn!(%err, "Reload after rollback failed");
            }
            return Err(violation);
        }

        debug!(%mv, ply = self.core().stack().len(), "Move committed");
        Ok(self)
    }

    /// Plays `mv` on an independent copy and returns the copy.
    ///
    /// Used to test a hypothetical move's consequences; the original is
    /// untouched. The move is trusted, so callers pass moves from `moves()`.
    fn simulate(&self, mv: &str) -> Result<Self, MoveError> {
        let mut copy = self.clone();
        copy.move_(mv, MoveOptions::default().with_trusted(true))?;
        Ok(copy)
    }
}
