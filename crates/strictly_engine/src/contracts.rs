//! Contract-based checks around committing a move.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, action)} commit {Q(before, after)}.

use crate::invariants::{CoreInvariants, InvariantSet};
use crate::message::keys;
use crate::{GameCore, MoveError, UserMessage};
use std::sync::Arc;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A: ?Sized> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with the game-over message once the game is complete.
    #[instrument(skip(core))]
    pub fn check<B>(core: &GameCore<B>) -> Result<(), MoveError> {
        if *core.gameover() {
            Err(MoveError::GameOver(UserMessage::new(keys::GAME_OVER)))
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: exactly one snapshot was appended and every earlier
/// snapshot is the very same shared value as before.
pub struct HistoryAppendOnly;

impl HistoryAppendOnly {
    /// Compares the stacks before and after a commit.
    #[instrument(skip_all)]
    pub fn check<B>(before: &GameCore<B>, after: &GameCore<B>) -> Result<(), MoveError> {
        let (old, new) = (before.stack(), after.stack());
        if new.len() != old.len() + 1 {
            return Err(MoveError::InvariantViolation(format!(
                "history grew from {} to {} snapshots",
                old.len(),
                new.len()
            )));
        }
        if old.iter().zip(new.iter()).any(|(a, b)| !Arc::ptr_eq(a, b)) {
            return Err(MoveError::InvariantViolation("an earlier snapshot was replaced".into()));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Commit Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for committing a full (non-partial) move.
///
/// Preconditions:
/// - The game is not over
///
/// Postconditions:
/// - History grew by one and earlier snapshots are untouched
/// - Core invariants hold
pub struct CommitContract;

impl<B> Contract<GameCore<B>, str> for CommitContract {
    fn pre(core: &GameCore<B>, _action: &str) -> Result<(), MoveError> {
        GameNotOver::check(core)
    }

    fn post(before: &GameCore<B>, after: &GameCore<B>) -> Result<(), MoveError> {
        HistoryAppendOnly::check(before, after)?;
        CoreInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoveState;

    fn started() -> GameCore<u8> {
        let mut core = GameCore::new(2, Vec::new(), 0);
        core.push_snapshot(MoveState::new(1, 0, None, Vec::new()));
        core
    }

    #[test]
    fn test_pre_rejects_finished_game() {
        let mut core = started();
        assert!(CommitContract::pre(&core, "a1").is_ok());
        core.end_game(vec![1], None);
        assert!(matches!(CommitContract::pre(&core, "a1"), Err(MoveError::GameOver(_))));
    }

    #[test]
    fn test_post_accepts_single_append() {
        let before = started();
        let mut after = before.clone();
        after.push_snapshot(MoveState::new(1, 1, Some("a1".into()), Vec::new()));
        assert!(CommitContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_post_detects_rewritten_history() {
        let before = started();
        let mut after = before.clone();
        *after.stack_mut() = crate::History::new();
        after.push_snapshot(MoveState::new(1, 9, None, Vec::new()));
        after.push_snapshot(MoveState::new(1, 1, Some("a1".into()), Vec::new()));
        assert!(CommitContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_post_detects_missing_snapshot() {
        let before = started();
        let after = before.clone();
        assert!(CommitContract::post(&before, &after).is_err());
    }
}
