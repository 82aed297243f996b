//! Geometry error types.

use derive_more::Display;

/// Error raised by coordinate conversion and graph queries.
///
/// These are programmer errors from the engine's point of view: a game asked
/// for a cell that cannot exist on its board. Callers that take labels from
/// user input translate them into a user-facing "invalid cell" message.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GeometryError {
    /// The label could not be parsed for this topology.
    #[display("Malformed cell label: {:?}", label)]
    MalformedLabel {
        /// The offending label.
        label: String,
    },

    /// The coordinates fall outside the board.
    #[display("Coordinates ({}, {}) are outside the board", x, y)]
    OutOfBounds {
        /// Column (zero-based).
        x: i64,
        /// Row (zero-based, top row is 0).
        y: i64,
    },

    /// A graph query named a node that is not in the graph.
    #[display("Cell {:?} is not in the graph", label)]
    MissingNode {
        /// The missing node.
        label: String,
    },

    /// The direction has no meaning on this board shape (e.g. north on a hex row).
    #[display("Direction {} is not available on this board", _0)]
    UnsupportedDirection(crate::Direction),

    /// Board dimensions were invalid (zero, or too large for the label scheme).
    #[display("Invalid board dimensions: {}", _0)]
    InvalidDimensions(String),
}

impl std::error::Error for GeometryError {}

impl GeometryError {
    /// Shorthand for [`GeometryError::MalformedLabel`].
    pub fn malformed(label: impl Into<String>) -> Self {
        Self::MalformedLabel {
            label: label.into(),
        }
    }

    /// Shorthand for [`GeometryError::OutOfBounds`].
    pub fn out_of_bounds(x: impl TryInto<i64>, y: impl TryInto<i64>) -> Self {
        Self::OutOfBounds {
            x: x.try_into().unwrap_or(i64::MAX),
            y: y.try_into().unwrap_or(i64::MAX),
        }
    }

    /// Shorthand for [`GeometryError::MissingNode`].
    pub fn missing(label: impl Into<String>) -> Self {
        Self::MissingNode {
            label: label.into(),
        }
    }
}
