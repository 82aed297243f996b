//! Board descriptions handed to an external renderer.
//!
//! The engine only promises that a [`RenderData`] is a pure function of
//! live state. The layout is deliberately small: one string per row, a
//! legend mapping glyphs to piece names, and highlight annotations.

use crate::MoveResult;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Glyph used for an empty cell in [`RenderData::pieces`].
pub const EMPTY_GLYPH: char = '-';

/// Board shape hint for the renderer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BoardStyle {
    /// Square cells.
    Squares,
    /// Rhombus of hexes, each row offset half a cell.
    HexSlanted,
    /// Hexagonal board of hexes.
    HexOfHex,
}

/// Kind of highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationKind {
    /// A piece entered these cells.
    Enter,
    /// A piece travelled along these cells.
    Move,
    /// These cells left play.
    Exit,
    /// Winning line or group.
    Path,
}

/// A set of highlighted cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Annotation {
    /// What the highlight means.
    kind: AnnotationKind,
    /// Cell labels.
    targets: Vec<String>,
}

impl Annotation {
    /// Creates an annotation.
    pub fn new(kind: AnnotationKind, targets: Vec<String>) -> Self {
        Self { kind, targets }
    }

    /// Highlights derived from the results of the last move.
    pub fn from_results(results: &[MoveResult]) -> Vec<Self> {
        results
            .iter()
            .filter_map(|result| {
                let kind = match result {
                    MoveResult::Place { .. } => AnnotationKind::Enter,
                    MoveResult::Move { .. } => AnnotationKind::Move,
                    MoveResult::Capture { .. } | MoveResult::Block { .. } => AnnotationKind::Exit,
                    _ => return None,
                };
                let targets = result.cells().into_iter().map(str::to_string).collect();
                Some(Self::new(kind, targets))
            })
            .collect()
    }
}

/// A renderable snapshot of live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RenderData {
    /// Board shape.
    style: BoardStyle,
    /// One string per row, top row first, one glyph per cell.
    pieces: Vec<String>,
    /// Glyph meanings.
    #[serde(with = "crate::utils::codec::pairs")]
    legend: BTreeMap<char, String>,
    /// Highlights.
    annotations: Vec<Annotation>,
}

impl RenderData {
    /// Creates a render description.
    pub fn new(style: BoardStyle, pieces: Vec<String>, legend: BTreeMap<char, String>) -> Self {
        Self {
            style,
            pieces,
            legend,
            annotations: Vec::new(),
        }
    }

    /// Adds highlights.
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    /// Glyph at row `y`, column `x`, if the row is long enough.
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        self.pieces.get(y)?.chars().nth(x)
    }

    /// Plain-text drawing for terminals.
    ///
    /// Hex boards are indented so neighbouring rows interlock.
    pub fn to_text(&self) -> String {
        let widest = self.pieces.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for (y, row) in self.pieces.iter().enumerate() {
            let indent = match self.style {
                BoardStyle::Squares => 0,
                BoardStyle::HexSlanted => y,
                BoardStyle::HexOfHex => widest - row.chars().count(),
            };
            out.push_str(&" ".repeat(indent));
            let cells: Vec<String> = row.chars().map(String::from).collect();
            out.push_str(&cells.join(" "));
            out.push('\n');
        }
        out
    }
}
