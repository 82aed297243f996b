//! Hex on a rhombus of hexagons.
//!
//! Player 1 joins the top edge to the bottom edge, player 2 the left edge
//! to the right edge. The board cannot fill up without one of them
//! connecting, so there are no draws. With the pie rule on, player 2 may
//! answer the opening stone with `swap` and take it over.

use super::{click_label, glyph, glyph_rows, open_cells, parse_cell, player_legend};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strictly_engine::utils::codec;
use strictly_engine::{
    Annotation, AnnotationKind, BoardStyle, ClickResult, EMPTY_GLYPH, EngineError, EngineErrorKind, GameCore,
    GameEngine, GameFlag, GameInfo, MoveError, MoveResult, RenderData, UserMessage, ValidationResult,
    VariantDef, keys,
};
use strictly_geometry::{HexSlantedGrid, Topology, build_owned_graph};
use tracing::{debug, instrument};

/// The pie-rule move.
pub const SWAP: &str = "swap";

const DEFAULT_SIZE: usize = 11;

/// Snapshot board: stones by cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexBoard {
    /// Owner of each occupied cell.
    #[serde(with = "codec::pairs")]
    pub stones: BTreeMap<String, usize>,
}

/// A game of Hex.
#[derive(Debug, Clone)]
pub struct Hex {
    core: GameCore<HexBoard>,
    grid: HexSlantedGrid,
    stones: BTreeMap<String, usize>,
}

impl Hex {
    /// The board.
    pub fn grid(&self) -> &HexSlantedGrid {
        &self.grid
    }

    /// Owner of `label`, if occupied.
    pub fn owner(&self, label: &str) -> Option<usize> {
        self.stones.get(label).copied()
    }

    /// Whether `swap` is legal right now: player 2's first turn, pie rule on.
    pub fn swap_available(&self) -> bool {
        !self.core.has_variant("no-swap") && *self.core.currplayer() == 2 && self.core.stack().len() == 2
    }

    /// The edges `player` must join, as label lists.
    fn edges(&self, player: usize) -> (Vec<String>, Vec<String>) {
        let (w, h) = (self.grid.width(), self.grid.height());
        let label = |c: (usize, usize)| self.grid.coords_to_label(c).ok();
        if player == 1 {
            (
                (0..w).filter_map(|x| label((x, 0))).collect(),
                (0..w).filter_map(|x| label((x, h - 1))).collect(),
            )
        } else {
            (
                (0..h).filter_map(|y| label((0, y))).collect(),
                (0..h).filter_map(|y| label((w - 1, y))).collect(),
            )
        }
    }

    /// A chain of `player`'s stones joining their two edges, if one exists.
    #[instrument(skip(self))]
    pub fn winning_chain(&self, player: usize) -> Option<Vec<String>> {
        let graph = build_owned_graph(&self.grid, |cell| self.owner(cell) == Some(player));
        let (from, to) = self.edges(player);
        graph.shortest_path_between(from.as_slice(), to.as_slice())
    }

    fn check_cell(&self, mv: &str) -> Result<(), UserMessage> {
        parse_cell(&self.grid, mv)?;
        if self.stones.contains_key(mv) {
            return Err(UserMessage::new(keys::OCCUPIED).with("cell", mv));
        }
        Ok(())
    }
}

impl GameEngine for Hex {
    type Board = HexBoard;

    const INFO: GameInfo = GameInfo {
        uid: "hex",
        name: "Hex",
        min_players: 2,
        max_players: 2,
        variants: &[
            VariantDef {
                uid: "size-7",
                name: "7×7",
                group: Some("board"),
                description: "A small 7×7 board",
            },
            VariantDef {
                uid: "size-9",
                name: "9×9",
                group: Some("board"),
                description: "A 9×9 board",
            },
            VariantDef {
                uid: "no-swap",
                name: "No pie rule",
                group: None,
                description: "Player 2 may not take over the opening stone",
            },
        ],
        flags: &[GameFlag::PieRule],
    };

    #[instrument(skip(core))]
    fn setup(core: GameCore<HexBoard>) -> Result<Self, EngineError> {
        let size = if core.has_variant("size-7") {
            7
        } else if core.has_variant("size-9") {
            9
        } else {
            DEFAULT_SIZE
        };
        let grid =
            HexSlantedGrid::new(size, size).map_err(|e| EngineError::new(EngineErrorKind::Setup(e.to_string())))?;
        Ok(Self {
            core,
            grid,
            stones: BTreeMap::new(),
        })
    }

    fn core(&self) -> &GameCore<HexBoard> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GameCore<HexBoard> {
        &mut self.core
    }

    fn snapshot_board(&self) -> HexBoard {
        HexBoard {
            stones: self.stones.clone(),
        }
    }

    fn restore_board(&mut self, board: &HexBoard) {
        self.stones = board.stones.clone();
    }

    fn legal_moves(&self, _player: usize) -> Vec<String> {
        let mut moves = open_cells(&self.grid, |label| self.stones.contains_key(label));
        if self.swap_available() {
            moves.push(SWAP.to_string());
        }
        moves
    }

    fn validate_move(&self, mv: &str) -> ValidationResult {
        if mv.is_empty() {
            return ValidationResult::incomplete(UserMessage::new(keys::PLACE_INSTRUCTIONS)).with_canrender(true);
        }
        if mv == SWAP {
            return if self.swap_available() {
                ValidationResult::ready()
            } else {
                ValidationResult::invalid(UserMessage::new(keys::SWAP_UNAVAILABLE))
            };
        }
        match self.check_cell(mv) {
            Ok(()) => ValidationResult::ready(),
            Err(message) => ValidationResult::invalid(message),
        }
    }

    fn handle_click(&self, mv: &str, row: usize, col: usize, _piece: Option<&str>) -> ClickResult {
        let label = match click_label(&self.grid, row, col) {
            Ok(label) => label,
            Err(message) => return ClickResult::new(mv, ValidationResult::invalid(message)),
        };
        // Clicking the opening stone is how a front end offers the swap.
        let candidate = if self.swap_available() && self.stones.contains_key(&label) {
            SWAP.to_string()
        } else {
            label
        };
        let validation = self.validate_move(&candidate);
        ClickResult::new(candidate, validation)
    }

    #[instrument(skip(self))]
    fn apply(&mut self, mv: &str, _partial: bool) -> Result<(), MoveError> {
        let player = *self.core.currplayer();
        if mv == SWAP {
            if !self.swap_available() {
                return Err(MoveError::Rejected(UserMessage::new(keys::SWAP_UNAVAILABLE)));
            }
            for owner in self.stones.values_mut() {
                *owner = player;
            }
            debug!("Opening stone swapped");
            self.core.push_result(MoveResult::Swap);
            return Ok(());
        }
        self.check_cell(mv).map_err(MoveError::Rejected)?;
        self.stones.insert(mv.to_string(), player);
        self.core.push_result(MoveResult::place(mv));
        Ok(())
    }

    fn check_eog(&mut self) {
        for player in 1..=*self.core.numplayers() {
            if let Some(chain) = self.winning_chain(player) {
                debug!(player, length = chain.len(), "Edges connected");
                self.core.end_game(vec![player], Some("connected"));
                return;
            }
        }
    }

    fn render(&self) -> RenderData {
        let pieces = glyph_rows(&self.grid, self.grid.height(), |label| {
            self.owner(label).map_or(EMPTY_GLYPH, glyph)
        });
        let mut annotations = Annotation::from_results(self.core.results());
        if let Some(chain) = self.core.winner().first().and_then(|&p| self.winning_chain(p)) {
            annotations.push(Annotation::new(AnnotationKind::Path, chain));
        }
        RenderData::new(BoardStyle::HexSlanted, pieces, player_legend(*self.core.numplayers()))
            .with_annotations(annotations)
    }
}
