//! State every game carries regardless of its rules.

use crate::utils::GameRng;
use crate::{GameStatus, History, MoveResult, MoveState};
use derive_getters::Getters;
use tracing::{debug, info, instrument};

/// Bookkeeping shared by all games.
///
/// Games embed one of these and expose it through
/// [`GameEngine::core`](crate::GameEngine::core). Rule code reads it freely
/// but mutates it only through the methods below.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct GameCore<B> {
    /// Number of seated players.
    numplayers: usize,
    /// Player to move, one-based.
    currplayer: usize,
    /// Whether the game has ended.
    gameover: bool,
    /// Winners, ascending. Several entries mean a shared win.
    winner: Vec<usize>,
    /// Resolved variant ids.
    variants: Vec<String>,
    /// Seed for derived randomness.
    seed: u64,
    /// Move that produced the live state.
    lastmove: Option<String>,
    /// Effects of the move in progress.
    results: Vec<MoveResult>,
    /// Snapshot history.
    stack: History<B>,
}

impl<B> GameCore<B> {
    /// Bookkeeping for a brand-new game. Player 1 moves first.
    #[instrument(skip(variants))]
    pub fn new(numplayers: usize, variants: Vec<String>, seed: u64) -> Self {
        Self {
            numplayers,
            currplayer: 1,
            gameover: false,
            winner: Vec::new(),
            variants,
            seed,
            lastmove: None,
            results: Vec::new(),
            stack: History::new(),
        }
    }

    /// Bookkeeping restored from serialized state.
    pub fn restored(
        numplayers: usize,
        variants: Vec<String>,
        gameover: bool,
        winner: Vec<usize>,
        seed: u64,
        stack: History<B>,
    ) -> Self {
        Self {
            numplayers,
            currplayer: 1,
            gameover,
            winner,
            variants,
            seed,
            lastmove: None,
            results: Vec::new(),
            stack,
        }
    }

    /// Whether `uid` was selected.
    pub fn has_variant(&self, uid: &str) -> bool {
        self.variants.iter().any(|v| v == uid)
    }

    /// In progress or complete.
    pub fn status(&self) -> GameStatus {
        if self.gameover {
            GameStatus::Complete
        } else {
            GameStatus::InProgress
        }
    }

    /// The generator for the ply about to be played.
    ///
    /// Depends only on the seed and the history length, so the same ply of a
    /// reloaded game draws the same numbers.
    pub fn rng(&self) -> GameRng {
        GameRng::for_ply(self.seed, self.stack.len())
    }

    /// Player who moves after `player`, wrapping.
    pub fn next_player(&self, player: usize) -> usize {
        player % self.numplayers + 1
    }

    /// Hands the turn to the next player.
    pub fn advance_player(&mut self) {
        self.currplayer = self.next_player(self.currplayer);
    }

    /// Sets the player to move.
    pub fn set_currplayer(&mut self, player: usize) {
        self.currplayer = player;
    }

    /// Records an effect of the move in progress.
    pub fn push_result(&mut self, result: MoveResult) {
        self.results.push(result);
    }

    /// Ends the game, recording `eog` and `winners` results.
    #[instrument(skip(self))]
    pub fn end_game(&mut self, mut winners: Vec<usize>, reason: Option<&str>) {
        winners.sort_unstable();
        winners.dedup();
        info!(?winners, ?reason, "Game over");
        self.gameover = true;
        self.results.push(MoveResult::Eog {
            reason: reason.map(str::to_string),
        });
        self.results.push(MoveResult::Winners {
            players: winners.clone(),
        });
        self.winner = winners;
    }

    /// Clears live results for the move in progress, returning the old ones.
    pub(crate) fn begin_move(&mut self) -> Vec<MoveResult> {
        std::mem::take(&mut self.results)
    }

    pub(crate) fn set_lastmove(&mut self, mv: Option<String>) {
        self.lastmove = mv;
    }

    pub(crate) fn set_results(&mut self, results: Vec<MoveResult>) {
        self.results = results;
    }

    pub(crate) fn push_snapshot(&mut self, state: MoveState<B>) {
        debug!(ply = self.stack.len(), "Snapshot pushed");
        self.stack.push(state);
    }

    #[cfg(test)]
    pub(crate) fn stack_mut(&mut self) -> &mut History<B> {
        &mut self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_rotation_wraps() {
        let mut core: GameCore<()> = GameCore::new(3, Vec::new(), 0);
        assert_eq!(*core.currplayer(), 1);
        core.advance_player();
        core.advance_player();
        assert_eq!(*core.currplayer(), 3);
        core.advance_player();
        assert_eq!(*core.currplayer(), 1);
    }

    #[test]
    fn test_end_game_records_results() {
        let mut core: GameCore<()> = GameCore::new(2, Vec::new(), 0);
        core.end_game(vec![2, 1, 2], Some("board full"));
        assert_eq!(core.status(), GameStatus::Complete);
        assert_eq!(core.winner(), &vec![1, 2]);
        assert_eq!(core.results().len(), 2);
        assert_eq!(
            core.results()[1],
            MoveResult::Winners { players: vec![1, 2] }
        );
    }

    #[test]
    fn test_rng_tracks_ply() {
        let mut core: GameCore<()> = GameCore::new(2, Vec::new(), 9);
        let before = core.rng().random_int(0, i64::MAX);
        core.push_snapshot(MoveState::new(1, (), None, Vec::new()));
        let after = core.rng().random_int(0, i64::MAX);
        assert_ne!(before, after);
    }
}
