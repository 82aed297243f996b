//! Claim: a simultaneous territory game on a hexagon of hexes.
//!
//! Each round every player secretly names an empty cell and all choices are
//! revealed at once. A cell named by one player becomes theirs; a cell named
//! by several is blocked for the rest of the game. Play ends when no empty
//! cell remains. Each player scores the size of their largest connected
//! group, and every player on the top score wins.

use super::{click_label, glyph, glyph_rows, open_cells, parse_cell, player_legend};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use strictly_engine::utils::codec;
use strictly_engine::{
    Annotation, AnnotationKind, BoardStyle, ClickResult, EMPTY_GLYPH, EngineError, EngineErrorKind, GameCore,
    GameEngine, GameFlag, GameInfo, MoveError, MoveResult, RenderData, SimultaneousGame, UserMessage,
    ValidationResult, VariantDef, keys, split_moves,
};
use strictly_geometry::{HexTriGrid, build_owned_graph};
use tracing::{debug, instrument};

/// Glyph for a blocked cell.
pub const BLOCKED_GLYPH: char = '#';

/// Snapshot board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimBoard {
    /// Owner of each claimed cell.
    #[serde(with = "codec::pairs")]
    pub owners: BTreeMap<String, usize>,
    /// Cells lost to collisions.
    #[serde(with = "codec::sorted_set")]
    pub blocked: HashSet<String>,
}

/// A game of Claim.
#[derive(Debug, Clone)]
pub struct Claim {
    core: GameCore<ClaimBoard>,
    grid: HexTriGrid,
    owners: BTreeMap<String, usize>,
    blocked: HashSet<String>,
    /// Slots submitted so far this round, from partial moves.
    pending: Vec<String>,
}

impl Claim {
    /// The board.
    pub fn grid(&self) -> &HexTriGrid {
        &self.grid
    }

    /// Owner of `label`, if claimed.
    pub fn owner(&self, label: &str) -> Option<usize> {
        self.owners.get(label).copied()
    }

    /// Whether `label` was lost to a collision.
    pub fn is_blocked(&self, label: &str) -> bool {
        self.blocked.contains(label)
    }

    /// Slots recorded by partial moves this round.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    fn is_taken(&self, label: &str) -> bool {
        self.owners.contains_key(label) || self.blocked.contains(label)
    }

    /// Size of each player's largest connected group, player 1 first.
    #[instrument(skip(self))]
    pub fn scores(&self) -> Vec<usize> {
        (1..=*self.core.numplayers())
            .map(|player| {
                build_owned_graph(&self.grid, |cell| self.owner(cell) == Some(player))
                    .connected_components()
                    .iter()
                    .map(Vec::len)
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn check_cell(&self, mv: &str) -> Result<(), UserMessage> {
        parse_cell(&self.grid, mv)?;
        if self.is_taken(mv) {
            return Err(UserMessage::new(keys::OCCUPIED).with("cell", mv));
        }
        Ok(())
    }
}

impl GameEngine for Claim {
    type Board = ClaimBoard;

    const INFO: GameInfo = GameInfo {
        uid: "claim",
        name: "Claim",
        min_players: 2,
        max_players: 4,
        variants: &[
            VariantDef {
                uid: "size-4",
                name: "Side 4",
                group: Some("board"),
                description: "A hexagon with four cells per side",
            },
            VariantDef {
                uid: "size-5",
                name: "Side 5",
                group: Some("board"),
                description: "A hexagon with five cells per side",
            },
        ],
        flags: &[GameFlag::Simultaneous, GameFlag::Scores],
    };

    #[instrument(skip(core))]
    fn setup(core: GameCore<ClaimBoard>) -> Result<Self, EngineError> {
        let side = if core.has_variant("size-5") {
            5
        } else if core.has_variant("size-4") {
            4
        } else {
            3
        };
        let grid = HexTriGrid::new(side).map_err(|e| EngineError::new(EngineErrorKind::Setup(e.to_string())))?;
        Ok(Self {
            core,
            grid,
            owners: BTreeMap::new(),
            blocked: HashSet::new(),
            pending: Vec::new(),
        })
    }

    fn core(&self) -> &GameCore<ClaimBoard> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GameCore<ClaimBoard> {
        &mut self.core
    }

    fn snapshot_board(&self) -> ClaimBoard {
        ClaimBoard {
            owners: self.owners.clone(),
            blocked: self.blocked.clone(),
        }
    }

    fn restore_board(&mut self, board: &ClaimBoard) {
        self.owners = board.owners.clone();
        self.blocked = board.blocked.clone();
        self.pending.clear();
    }

    fn legal_moves(&self, _player: usize) -> Vec<String> {
        open_cells(&self.grid, |label| self.is_taken(label))
    }

    fn validate_move(&self, mv: &str) -> ValidationResult {
        self.validate_simultaneous(mv)
    }

    fn handle_click(&self, mv: &str, row: usize, col: usize, piece: Option<&str>) -> ClickResult {
        // Without a seat the click is attributed to player 1.
        self.handle_click_simultaneous(mv, row, col, 1, piece)
    }

    #[instrument(skip(self))]
    fn apply(&mut self, mv: &str, partial: bool) -> Result<(), MoveError> {
        let numplayers = *self.core.numplayers();
        let slots = split_moves(mv, numplayers);
        if partial {
            self.pending = slots;
            return Ok(());
        }
        self.pending.clear();

        let before = self.scores();
        let mut claims: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, slot) in slots.iter().enumerate().take(numplayers) {
            self.check_cell(slot).map_err(MoveError::Rejected)?;
            claims.entry(slot.clone()).or_default().push(i + 1);
        }

        for (cell, claimants) in claims {
            if let [player] = claimants[..] {
                self.owners.insert(cell.clone(), player);
                self.core.push_result(MoveResult::Place {
                    cell,
                    what: None,
                    who: Some(player),
                });
            } else {
                debug!(%cell, ?claimants, "Collision");
                self.blocked.insert(cell.clone());
                self.core.push_result(MoveResult::Block { cell });
            }
        }

        for (i, (old, new)) in before.into_iter().zip(self.scores()).enumerate() {
            if new != old {
                let delta = i64::try_from(new).unwrap_or(i64::MAX) - i64::try_from(old).unwrap_or(i64::MAX);
                self.core.push_result(MoveResult::DeltaScore { who: i + 1, delta });
            }
        }
        Ok(())
    }

    fn advance_player(&mut self) {}

    fn failsafe(&self, mv: &str) -> bool {
        self.simultaneous_failsafe(mv)
    }

    fn check_eog(&mut self) {
        if !self.legal_moves(1).is_empty() {
            return;
        }
        let scores = self.scores();
        let best = scores.iter().copied().max().unwrap_or(0);
        let winners = scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == best)
            .map(|(i, _)| i + 1)
            .collect();
        debug!(?scores, "Board exhausted");
        self.core.end_game(winners, Some("board full"));
    }

    fn render(&self) -> RenderData {
        let pieces = glyph_rows(&self.grid, self.grid.rows(), |label| {
            if self.blocked.contains(label) {
                BLOCKED_GLYPH
            } else {
                self.owner(label).map_or(EMPTY_GLYPH, glyph)
            }
        });
        let mut legend = player_legend(*self.core.numplayers());
        legend.insert(BLOCKED_GLYPH, "blocked".to_string());

        let mut annotations = Annotation::from_results(self.core.results());
        let pending: Vec<String> = self.pending.iter().filter(|s| !s.is_empty()).cloned().collect();
        if !pending.is_empty() {
            annotations.push(Annotation::new(AnnotationKind::Enter, pending));
        }
        RenderData::new(BoardStyle::HexOfHex, pieces, legend).with_annotations(annotations)
    }
}

impl SimultaneousGame for Claim {
    fn validate_sub_move(&self, _player: usize, mv: &str) -> ValidationResult {
        match self.check_cell(mv) {
            Ok(()) => ValidationResult::ready(),
            Err(message) => ValidationResult::invalid(message),
        }
    }

    fn sub_move_for_click(
        &self,
        _player: usize,
        _current: &str,
        row: usize,
        col: usize,
        _piece: Option<&str>,
    ) -> Result<String, ValidationResult> {
        click_label(&self.grid, row, col).map_err(ValidationResult::invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_engine::{Completeness, GameStatus, MoveOptions};

    fn fresh(players: usize) -> Claim {
        Claim::with_seed(players, &[] as &[&str], 0).unwrap()
    }

    #[test]
    fn test_board_sizes() {
        assert_eq!(fresh(2).moves().len(), 19);
        assert_eq!(Claim::with_seed(2, &["size-4"], 0).unwrap().moves().len(), 37);
        assert!(Claim::with_seed(5, &[] as &[&str], 0).is_err());
    }

    #[test]
    fn test_partial_submission_waits() {
        let game = fresh(2);
        let result = game.validate_move("a1,");
        assert!(result.valid());
        assert_eq!(result.complete(), Completeness::Incomplete);
        assert_eq!(result.message().key(), keys::WAITING);
        assert!(game.validate_move("a1,b2").is_submittable());
        assert!(!game.validate_move("a1,z9").valid());
        assert!(!game.validate_move("a1,b2,c3").valid());
    }

    #[test]
    fn test_distinct_claims_are_placed() {
        let mut game = fresh(2);
        game.move_("a1,e3", MoveOptions::default()).unwrap();
        assert_eq!(game.owner("a1"), Some(1));
        assert_eq!(game.owner("e3"), Some(2));
        assert_eq!(*game.core().currplayer(), 1);
        assert_eq!(game.moves().len(), 17);
        assert!(
            game.core()
                .results()
                .contains(&MoveResult::DeltaScore { who: 2, delta: 1 })
        );
    }

    #[test]
    fn test_collision_blocks_cell() {
        let mut game = fresh(3);
        game.move_("c3,c3,a1", MoveOptions::default()).unwrap();
        assert!(game.is_blocked("c3"));
        assert_eq!(game.owner("c3"), None);
        assert_eq!(game.owner("a1"), Some(3));
        assert!(game.core().results().contains(&MoveResult::Block { cell: "c3".into() }));
        assert!(!game.moves_for(1).contains(&"c3".to_string()));
        assert_eq!(game.render().glyph(2, 2), Some(BLOCKED_GLYPH));
    }

    #[test]
    fn test_partial_move_is_live_only() {
        let mut game = fresh(2);
        game.move_("a1,", MoveOptions::default().with_partial(true)).unwrap();
        assert_eq!(game.pending(), &["a1".to_string(), String::new()]);
        assert_eq!(game.core().stack().len(), 1);
        assert!(game.move_("a1,", MoveOptions::default()).is_err());
        game.move_("a1,a2", MoveOptions::default()).unwrap();
        assert!(game.pending().is_empty());
    }

    #[test]
    fn test_click_fills_only_clicking_slot() {
        let game = fresh(2);
        let click = game.handle_click_simultaneous("a1,", 1, 0, 2, None);
        assert_eq!(click.candidate(), "a1,b1");
        assert!(click.validation().is_submittable());
        let click = game.handle_click_simultaneous("a1,", 0, 0, 3, None);
        assert_eq!(click.candidate(), "a1,");
        assert!(!click.validation().valid());
    }

    #[test]
    fn test_game_ends_when_board_exhausted() {
        let mut game = fresh(2);
        let mut rounds = 0;
        while game.status() == GameStatus::InProgress {
            let open = game.moves();
            let mv = match open.as_slice() {
                [only] => format!("{only},{only}"),
                [first, .., last] => format!("{first},{last}"),
                [] => unreachable!("game over with no open cells"),
            };
            game.move_(&mv, MoveOptions::default()).unwrap();
            rounds += 1;
        }
        assert!(rounds <= 10);
        let scores = game.scores();
        let best = scores.iter().copied().max().unwrap();
        for (i, score) in scores.iter().enumerate() {
            assert_eq!(game.core().winner().contains(&(i + 1)), *score == best);
        }
    }
}
