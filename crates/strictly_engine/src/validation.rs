//! Structured feedback for incremental move entry.

use crate::UserMessage;
use crate::message::keys;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// How finished a move string is.
///
/// Serialized as the integers `-1`, `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Completeness {
    /// Valid so far; more input is required before it can be submitted.
    Incomplete,
    /// A valid intermediate state with no further action implied.
    Intermediate,
    /// Ready to submit.
    Complete,
}

impl From<Completeness> for i8 {
    fn from(value: Completeness) -> Self {
        match value {
            Completeness::Incomplete => -1,
            Completeness::Intermediate => 0,
            Completeness::Complete => 1,
        }
    }
}

impl TryFrom<i8> for Completeness {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Incomplete),
            0 => Ok(Self::Intermediate),
            1 => Ok(Self::Complete),
            other => Err(format!("completeness must be -1, 0 or 1, got {other}")),
        }
    }
}

/// Result of validating a (possibly partial) move string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the input is acceptable so far.
    valid: bool,
    /// How finished the input is. Meaningless when `valid` is false.
    complete: Completeness,
    /// Explanation for the player.
    message: UserMessage,
    /// Whether a front end may render the partial move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    canrender: Option<bool>,
}

impl ValidationResult {
    /// A rejected move.
    pub fn invalid(message: UserMessage) -> Self {
        Self {
            valid: false,
            complete: Completeness::Incomplete,
            message,
            canrender: None,
        }
    }

    /// A move ready to submit, with the standard message.
    pub fn ready() -> Self {
        Self::accepted(Completeness::Complete, UserMessage::new(keys::VALID_MOVE))
    }

    /// Valid so far, needs more input.
    pub fn incomplete(message: UserMessage) -> Self {
        Self::accepted(Completeness::Incomplete, message)
    }

    /// A valid result with explicit completeness.
    pub fn accepted(complete: Completeness, message: UserMessage) -> Self {
        Self {
            valid: true,
            complete,
            message,
            canrender: None,
        }
    }

    /// Marks whether the partial move can be drawn.
    pub fn with_canrender(mut self, canrender: bool) -> Self {
        self.canrender = Some(canrender);
        self
    }

    /// Whether the input is acceptable so far.
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// How finished the input is. Meaningless when invalid.
    pub fn complete(&self) -> Completeness {
        self.complete
    }

    /// Explanation for the player.
    pub fn message(&self) -> &UserMessage {
        &self.message
    }

    /// Whether a front end may render the partial move.
    pub fn canrender(&self) -> Option<bool> {
        self.canrender
    }

    /// True when the move is valid and ready to submit.
    pub fn is_submittable(&self) -> bool {
        self.valid && self.complete == Completeness::Complete
    }
}

/// Result of translating a board click into a move string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ClickResult {
    /// The new candidate move string.
    #[serde(rename = "move")]
    candidate: String,
    /// Validation of the candidate.
    validation: ValidationResult,
}

impl ClickResult {
    /// Pairs a candidate move with its validation.
    pub fn new(candidate: impl Into<String>, validation: ValidationResult) -> Self {
        Self {
            candidate: candidate.into(),
            validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness_wire_format() {
        let json = serde_json::to_string(&ValidationResult::ready()).unwrap();
        assert!(json.contains(r#""complete":1"#));
        let incomplete = ValidationResult::incomplete(UserMessage::new(keys::INCOMPLETE));
        let json = serde_json::to_string(&incomplete).unwrap();
        assert!(json.contains(r#""complete":-1"#));
        let back: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, incomplete);
    }

    #[test]
    fn test_completeness_rejects_other_integers() {
        assert!(serde_json::from_str::<Completeness>("2").is_err());
        assert_eq!(serde_json::from_str::<Completeness>("0").unwrap(), Completeness::Intermediate);
    }

    #[test]
    fn test_submittable() {
        assert!(ValidationResult::ready().is_submittable());
        assert!(!ValidationResult::invalid(UserMessage::new(keys::INVALID_MOVE)).is_submittable());
    }
}
