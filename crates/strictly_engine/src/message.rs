//! Localizable player-facing messages.
//!
//! A [`UserMessage`] is a catalogue key plus named parameters. Front ends
//! translate the key; [`UserMessage::render`] produces the English fallback.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Message catalogue keys understood by the English fallback.
pub mod keys {
    /// The game has ended.
    pub const GAME_OVER: &str = "move.game_over";
    /// Generic rejection; `{move}`.
    pub const INVALID_MOVE: &str = "validation.invalid_move";
    /// A label that is not on the board; `{cell}`.
    pub const INVALID_CELL: &str = "validation.invalid_cell";
    /// Target already taken; `{cell}`.
    pub const OCCUPIED: &str = "validation.occupied";
    /// Empty input on a placement game.
    pub const PLACE_INSTRUCTIONS: &str = "validation.place_instructions";
    /// Valid, ready to submit.
    pub const VALID_MOVE: &str = "validation.valid_move";
    /// Valid so far but unfinished.
    pub const INCOMPLETE: &str = "validation.incomplete";
    /// Swap offered outside the second player's first turn.
    pub const SWAP_UNAVAILABLE: &str = "validation.swap_unavailable";
    /// Simultaneous move missing slots; `{count}`.
    pub const WAITING: &str = "validation.waiting";
    /// Simultaneous move with the wrong slot count; `{expected}`, `{got}`.
    pub const WRONG_SLOT_COUNT: &str = "validation.wrong_slot_count";
    /// Clicking player outside the game; `{player}`.
    pub const NOT_A_PLAYER: &str = "validation.not_a_player";
}

fn fallback(key: &str) -> Option<&'static str> {
    let text = match key {
        keys::GAME_OVER => "The game is over. No further moves can be made.",
        keys::INVALID_MOVE => "'{move}' is not a valid move.",
        keys::INVALID_CELL => "'{cell}' is not a cell on this board.",
        keys::OCCUPIED => "{cell} is already occupied.",
        keys::PLACE_INSTRUCTIONS => "Select an empty cell to place a piece.",
        keys::VALID_MOVE => "Valid move. Submit when ready.",
        keys::INCOMPLETE => "The move is not finished yet.",
        keys::SWAP_UNAVAILABLE => "Swapping is only possible on the second player's first turn.",
        keys::WAITING => "Waiting for {count} more player(s) to choose.",
        keys::WRONG_SLOT_COUNT => "Expected {expected} comma-separated moves but found {got}.",
        keys::NOT_A_PLAYER => "Player {player} is not in this game.",
        _ => return None,
    };
    Some(text)
}

/// A localizable message: catalogue key plus interpolation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct UserMessage {
    /// Catalogue key.
    key: String,
    /// Named parameters substituted into `{name}` placeholders.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<String, String>,
}

impl UserMessage {
    /// Creates a message with no parameters.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: BTreeMap::new(),
        }
    }

    /// Adds a parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// English text for this message.
    ///
    /// Unknown keys render as the key followed by their parameters, so a
    /// game-specific message is never silently lost.
    pub fn render(&self) -> String {
        match fallback(&self.key) {
            Some(template) => self
                .params
                .iter()
                .fold(template.to_string(), |text, (name, value)| {
                    text.replace(&format!("{{{name}}}"), value)
                }),
            None if self.params.is_empty() => self.key.clone(),
            None => {
                let params: Vec<String> = self.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
                format!("{} ({})", self.key, params.join(", "))
            }
        }
    }
}

impl std::fmt::Display for UserMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
