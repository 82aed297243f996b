//! N-in-a-row: two players alternately claim cells on a rectangular board;
//! the first to make an unbroken line of the required length wins.
//!
//! The default is 3×3 with lines of three. A full board with no line is a
//! draw, reported as both players winning.

pub mod rules;

use super::{click_label, glyph, glyph_rows, open_cells, parse_cell, player_legend};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strictly_engine::utils::codec;
use strictly_engine::{
    Annotation, AnnotationKind, BoardStyle, ClickResult, EMPTY_GLYPH, EngineError, EngineErrorKind, GameCore,
    GameEngine, GameFlag, GameInfo, MoveError, MoveResult, RenderData, UserMessage, ValidationResult,
    VariantDef, keys,
};
use strictly_geometry::{RectGrid, Topology};
use tracing::{debug, instrument};

/// Contents of an occupied cell.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    /// A player's stone.
    #[display("player {}", _0)]
    Player(usize),
    /// A neutral blocker placed at setup.
    #[display("blocker")]
    Neutral,
}

/// Snapshot board: occupied cells only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBoard {
    /// Occupied cells.
    #[serde(with = "codec::pairs")]
    pub cells: BTreeMap<String, Stone>,
}

/// A game of n-in-a-row.
#[derive(Debug, Clone)]
pub struct NinARow {
    core: GameCore<LineBoard>,
    grid: RectGrid,
    line: usize,
    cells: BTreeMap<String, Stone>,
}

const BLOCKERS: usize = 2;

impl NinARow {
    /// The board.
    pub fn grid(&self) -> &RectGrid {
        &self.grid
    }

    /// Required line length.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Live cell contents.
    pub fn cells(&self) -> &BTreeMap<String, Stone> {
        &self.cells
    }

    /// Stone on `label`, if any.
    pub fn stone(&self, label: &str) -> Option<Stone> {
        self.cells.get(label).copied()
    }

    /// Board size and line length for the chosen variants.
    fn dimensions(core: &GameCore<LineBoard>) -> (usize, usize) {
        if core.has_variant("size-15") {
            (15, 5)
        } else if core.has_variant("size-9") {
            (9, 5)
        } else {
            (3, 3)
        }
    }

    fn check_cell(&self, mv: &str) -> Result<String, UserMessage> {
        parse_cell(&self.grid, mv)?;
        if self.cells.contains_key(mv) {
            return Err(UserMessage::new(keys::OCCUPIED).with("cell", mv));
        }
        Ok(mv.to_string())
    }
}

impl GameEngine for NinARow {
    type Board = LineBoard;

    const INFO: GameInfo = GameInfo {
        uid: "ninarow",
        name: "N-in-a-row",
        min_players: 2,
        max_players: 2,
        variants: &[
            VariantDef {
                uid: "size-9",
                name: "9×9, five in a row",
                group: Some("board"),
                description: "A 9×9 board where five in a row wins",
            },
            VariantDef {
                uid: "size-15",
                name: "15×15, five in a row",
                group: Some("board"),
                description: "A 15×15 board where five in a row wins",
            },
            VariantDef {
                uid: "blockers",
                name: "Blockers",
                group: None,
                description: "Two neutral stones are placed at random before play",
            },
        ],
        flags: &[GameFlag::Random],
    };

    #[instrument(skip(core))]
    fn setup(core: GameCore<LineBoard>) -> Result<Self, EngineError> {
        let (size, line) = Self::dimensions(&core);
        let grid = RectGrid::square(size).map_err(|e| EngineError::new(EngineErrorKind::Setup(e.to_string())))?;
        let mut cells = BTreeMap::new();
        if core.has_variant("blockers") {
            let mut rng = core.rng();
            for label in rng.sample(&grid.list_cells(), BLOCKERS) {
                cells.insert(label, Stone::Neutral);
            }
            debug!(blockers = ?cells.keys().collect::<Vec<_>>(), "Blockers placed");
        }
        Ok(Self {
            core,
            grid,
            line,
            cells,
        })
    }

    fn core(&self) -> &GameCore<LineBoard> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GameCore<LineBoard> {
        &mut self.core
    }

    fn snapshot_board(&self) -> LineBoard {
        LineBoard {
            cells: self.cells.clone(),
        }
    }

    fn restore_board(&mut self, board: &LineBoard) {
        self.cells = board.cells.clone();
    }

    fn legal_moves(&self, _player: usize) -> Vec<String> {
        open_cells(&self.grid, |label| self.cells.contains_key(label))
    }

    fn validate_move(&self, mv: &str) -> ValidationResult {
        if mv.is_empty() {
            return ValidationResult::incomplete(UserMessage::new(keys::PLACE_INSTRUCTIONS)).with_canrender(true);
        }
        match self.check_cell(mv) {
            Ok(_) => ValidationResult::ready(),
            Err(message) => ValidationResult::invalid(message),
        }
    }

    fn handle_click(&self, mv: &str, row: usize, col: usize, _piece: Option<&str>) -> ClickResult {
        match click_label(&self.grid, row, col) {
            Ok(label) => {
                let validation = self.validate_move(&label);
                ClickResult::new(label, validation)
            }
            Err(message) => ClickResult::new(mv, ValidationResult::invalid(message)),
        }
    }

    #[instrument(skip(self))]
    fn apply(&mut self, mv: &str, _partial: bool) -> Result<(), MoveError> {
        let cell = self.check_cell(mv).map_err(MoveError::Rejected)?;
        let player = *self.core.currplayer();
        self.cells.insert(cell.clone(), Stone::Player(player));
        self.core.push_result(MoveResult::place(cell));
        Ok(())
    }

    fn check_eog(&mut self) {
        if let Some((player, line)) = rules::check_winner(&self.grid, &self.cells, self.line) {
            debug!(player, ?line, "Line completed");
            self.core.end_game(vec![player], Some("line"));
        } else if rules::board_full(&self.grid, &self.cells) {
            let everyone = (1..=*self.core.numplayers()).collect();
            self.core.end_game(everyone, Some("board full"));
        }
    }

    fn render(&self) -> RenderData {
        let pieces = glyph_rows(&self.grid, self.grid.height(), |label| match self.cells.get(label) {
            Some(Stone::Player(p)) => glyph(*p),
            Some(Stone::Neutral) => 'X',
            None => EMPTY_GLYPH,
        });
        let mut legend = player_legend(*self.core.numplayers());
        legend.insert('X', Stone::Neutral.to_string());

        let mut annotations = Annotation::from_results(self.core.results());
        if *self.core.gameover()
            && let Some((_, line)) = rules::check_winner(&self.grid, &self.cells, self.line)
        {
            annotations.push(Annotation::new(AnnotationKind::Path, line));
        }
        RenderData::new(BoardStyle::Squares, pieces, legend).with_annotations(annotations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_engine::{GameStatus, MoveOptions};

    fn fresh() -> NinARow {
        NinARow::with_seed(2, &[] as &[&str], 0).unwrap()
    }

    #[test]
    fn test_default_dimensions() {
        let game = fresh();
        assert_eq!(game.grid().width(), 3);
        assert_eq!(game.line(), 3);
        assert_eq!(game.moves().len(), 9);
    }

    #[test]
    fn test_size_variants() {
        let game = NinARow::with_seed(2, &["size-15"], 0).unwrap();
        assert_eq!(game.moves().len(), 225);
        assert_eq!(game.line(), 5);
        assert!(NinARow::with_seed(2, &["size-9", "size-15"], 0).is_err());
    }

    #[test]
    fn test_blockers_are_seeded() {
        let a = NinARow::with_seed(2, &["size-9", "blockers"], 11).unwrap();
        let b = NinARow::with_seed(2, &["size-9", "blockers"], 11).unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.cells().len(), 2);
        assert_eq!(a.moves().len(), 79);
        // Blockers are part of the initial snapshot.
        assert_eq!(a.core().stack().get(0).unwrap().board().cells.len(), 2);
    }

    #[test]
    fn test_validation_messages() {
        let mut game = fresh();
        let empty = game.validate_move("");
        assert!(empty.valid());
        assert!(!empty.is_submittable());
        assert_eq!(empty.message().key(), keys::PLACE_INSTRUCTIONS);
        assert_eq!(game.validate_move("d1").message().key(), keys::INVALID_CELL);
        game.move_("b2", MoveOptions::default()).unwrap();
        assert_eq!(game.validate_move("b2").message().key(), keys::OCCUPIED);
        assert!(game.validate_move("a1").is_submittable());
    }

    #[test]
    fn test_draw_lists_both_players() {
        let mut game = fresh();
        // a3 b3 c3 / a2 b2 c2 / a1 b1 c1 filled without a line:
        // X O X / X O O / O X X
        for mv in ["a3", "b3", "c3", "b2", "a2", "c2", "b1", "a1", "c1"] {
            game.move_(mv, MoveOptions::default()).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Complete);
        assert_eq!(game.core().winner(), &vec![1, 2]);
    }

    #[test]
    fn test_render_marks_winning_line() {
        let mut game = fresh();
        for mv in ["a1", "a2", "b1", "b2", "c1"] {
            game.move_(mv, MoveOptions::default()).unwrap();
        }
        assert_eq!(game.core().winner(), &vec![1]);
        let render = game.render();
        assert_eq!(render.pieces(), &vec!["---".to_string(), "BB-".into(), "AAA".into()]);
        assert!(
            render
                .annotations()
                .iter()
                .any(|a| *a.kind() == AnnotationKind::Path && a.targets().len() == 3)
        );
    }

    #[test]
    fn test_click_translates_coordinates() {
        let game = fresh();
        let click = game.handle_click("", 2, 0, None);
        assert_eq!(click.candidate(), "a1");
        assert!(click.validation().is_submittable());
        let click = game.handle_click("a1", 5, 5, None);
        assert_eq!(click.candidate(), "a1");
        assert!(!click.validation().valid());
    }
}
