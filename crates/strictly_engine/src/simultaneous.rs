//! Games where every player commits a move each round and all are resolved together.
//!
//! A combined move is one comma-separated slot per player, in seat order:
//! `"c2,a1"` means player 1 chose `c2` and player 2 chose `a1`. A slot may be
//! empty while a player is still choosing.
//!
//! Implementors route the [`GameEngine`] hooks through this trait:
//! `validate_move` to [`validate_simultaneous`](SimultaneousGame::validate_simultaneous),
//! `handle_click` to [`handle_click_simultaneous`](SimultaneousGame::handle_click_simultaneous),
//! `failsafe` to [`simultaneous_failsafe`](SimultaneousGame::simultaneous_failsafe),
//! and `advance_player` to a no-op, since nobody waits for a turn.

use crate::message::keys;
use crate::{ClickResult, Completeness, GameEngine, UserMessage, ValidationResult};
use tracing::instrument;

/// Splits a combined move into exactly one slot per player.
///
/// Missing trailing slots are empty. Extra slots are kept so the caller can
/// reject them.
pub fn split_moves(mv: &str, numplayers: usize) -> Vec<String> {
    let mut slots: Vec<String> = if mv.is_empty() {
        Vec::new()
    } else {
        mv.split(',').map(|s| s.trim().to_string()).collect()
    };
    if slots.len() < numplayers {
        slots.resize(numplayers, String::new());
    }
    slots
}

/// Non-empty slots paired with their one-based player.
pub fn submitted(mv: &str, numplayers: usize) -> Vec<(usize, String)> {
    split_moves(mv, numplayers)
        .into_iter()
        .enumerate()
        .filter(|(_, slot)| !slot.is_empty())
        .map(|(i, slot)| (i + 1, slot))
        .collect()
}

/// The simultaneous-move specialization of [`GameEngine`].
pub trait SimultaneousGame: GameEngine {
    /// Validates one player's slot without looking at anyone else's.
    fn validate_sub_move(&self, player: usize, mv: &str) -> ValidationResult;

    /// Turns a click into `player`'s new slot contents.
    ///
    /// Returns the rejection when the click cannot become a sub-move.
    fn sub_move_for_click(
        &self,
        player: usize,
        current: &str,
        row: usize,
        col: usize,
        piece: Option<&str>,
    ) -> Result<String, ValidationResult>;

    /// Validates a combined move.
    ///
    /// Every present slot must be valid on its own. The result is complete
    /// only when no slot is missing or unfinished.
    #[instrument(skip(self))]
    fn validate_simultaneous(&self, mv: &str) -> ValidationResult {
        let numplayers = *self.core().numplayers();
        let slots = split_moves(mv, numplayers);
        if slots.len() > numplayers {
            return ValidationResult::invalid(
                UserMessage::new(keys::WRONG_SLOT_COUNT)
                    .with("expected", numplayers)
                    .with("got", slots.len()),
            );
        }
        let mut waiting = 0;
        for (i, slot) in slots.iter().enumerate() {
            if slot.is_empty() {
                waiting += 1;
                continue;
            }
            let result = self.validate_sub_move(i + 1, slot);
            if !result.valid() {
                return result;
            }
            if result.complete() != Completeness::Complete {
                waiting += 1;
            }
        }
        if waiting > 0 {
            ValidationResult::incomplete(UserMessage::new(keys::WAITING).with("count", waiting))
        } else {
            ValidationResult::ready()
        }
    }

    /// Applies a click by `player`, rewriting only that player's slot.
    ///
    /// The returned validation covers the clicking player's slot alone.
    #[instrument(skip(self))]
    fn handle_click_simultaneous(
        &self,
        mv: &str,
        row: usize,
        col: usize,
        player: usize,
        piece: Option<&str>,
    ) -> ClickResult {
        let numplayers = *self.core().numplayers();
        if !(1..=numplayers).contains(&player) {
            let message = UserMessage::new(keys::NOT_A_PLAYER).with("player", player);
            return ClickResult::new(mv, ValidationResult::invalid(message));
        }
        let mut slots = split_moves(mv, numplayers);
        match self.sub_move_for_click(player, &slots[player - 1], row, col, piece) {
            Ok(slot) => {
                let validation = self.validate_sub_move(player, &slot);
                slots[player - 1] = slot;
                ClickResult::new(slots.join(","), validation)
            }
            Err(rejection) => ClickResult::new(mv, rejection),
        }
    }

    /// Failsafe for a combined move: every slot is in that player's move list.
    fn simultaneous_failsafe(&self, mv: &str) -> bool {
        let numplayers = *self.core().numplayers();
        let slots = split_moves(mv, numplayers);
        slots.len() == numplayers
            && slots
                .iter()
                .enumerate()
                .all(|(i, slot)| self.moves_for(i + 1).iter().any(|m| m == slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pads_missing_slots() {
        assert_eq!(split_moves("", 2), vec!["", ""]);
        assert_eq!(split_moves("a1", 3), vec!["a1", "", ""]);
        assert_eq!(split_moves(",b2", 2), vec!["", "b2"]);
        assert_eq!(split_moves("a1,b2,c3", 2).len(), 3);
    }

    #[test]
    fn test_submitted_skips_empty_slots() {
        assert_eq!(submitted(",b2,", 3), vec![(2, "b2".to_string())]);
    }
}
