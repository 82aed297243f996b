//! Semantic effects of a move, used for move annotations and game logs.

use serde::{Deserialize, Serialize};

/// One thing that happened during a move.
///
/// Serialized with a `type` tag: `{"type":"place","where":"c3"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MoveResult {
    /// A piece entered the board.
    Place {
        /// Target cell.
        #[serde(rename = "where")]
        cell: String,
        /// Piece description, if the game has more than one kind.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        what: Option<String>,
        /// Owning player, when not the mover.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        who: Option<usize>,
    },
    /// A piece moved between cells.
    Move {
        /// Origin cell.
        from: String,
        /// Destination cell.
        to: String,
        /// Piece description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        what: Option<String>,
    },
    /// A piece left the board.
    Capture {
        /// Cell it was taken from.
        #[serde(rename = "where")]
        cell: String,
        /// Piece description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        what: Option<String>,
    },
    /// A cell became unusable for everyone.
    Block {
        /// The blocked cell.
        #[serde(rename = "where")]
        cell: String,
    },
    /// The pie rule was invoked.
    Swap,
    /// The player passed.
    Pass,
    /// A score changed.
    DeltaScore {
        /// Player whose score changed.
        who: usize,
        /// Amount added (may be negative).
        delta: i64,
    },
    /// The game ended.
    Eog {
        /// Short reason, e.g. `"connection"` or `"board full"`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// Final winners (several on a tie).
    Winners {
        /// Winning players, ascending.
        players: Vec<usize>,
    },
}

impl MoveResult {
    /// A plain placement.
    pub fn place(cell: impl Into<String>) -> Self {
        Self::Place {
            cell: cell.into(),
            what: None,
            who: None,
        }
    }

    /// Cells this result touches, for highlighting.
    pub fn cells(&self) -> Vec<&str> {
        match self {
            Self::Place { cell, .. } | Self::Capture { cell, .. } | Self::Block { cell } => vec![cell.as_str()],
            Self::Move { from, to, .. } => vec![from.as_str(), to.as_str()],
            Self::Swap | Self::Pass | Self::DeltaScore { .. } | Self::Eog { .. } | Self::Winners { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_wire_format() {
        let json = serde_json::to_string(&MoveResult::place("c3")).unwrap();
        assert_eq!(json, r#"{"type":"place","where":"c3"}"#);
        let json = serde_json::to_string(&MoveResult::DeltaScore { who: 2, delta: -1 }).unwrap();
        assert_eq!(json, r#"{"type":"deltaScore","who":2,"delta":-1}"#);
        let back: MoveResult = serde_json::from_str(r#"{"type":"winners","players":[1,2]}"#).unwrap();
        assert_eq!(back, MoveResult::Winners { players: vec![1, 2] });
        assert_eq!(serde_json::to_string(&MoveResult::Pass).unwrap(), r#"{"type":"pass"}"#);
    }

    #[test]
    fn test_cells() {
        let mv = MoveResult::Move {
            from: "a1".into(),
            to: "a2".into(),
            what: None,
        };
        assert_eq!(mv.cells(), vec!["a1", "a2"]);
        assert!(MoveResult::Pass.cells().is_empty());
    }
}
