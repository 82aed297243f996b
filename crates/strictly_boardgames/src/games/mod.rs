//! Reference games.
//!
//! Each game is a client of [`strictly_engine::GameEngine`]; these helpers
//! cover what every cell-placement game repeats.

pub mod claim;
pub mod hex;
pub mod ninarow;

use std::collections::BTreeMap;
use strictly_engine::{UserMessage, keys};
use strictly_geometry::{Topology, sort_labels};

/// Board glyph for a one-based player: `A`, `B`, ...
pub(crate) fn glyph(player: usize) -> char {
    let offset = u8::try_from(player.saturating_sub(1) % 26).unwrap_or(0);
    char::from(b'A' + offset)
}

/// Legend entries for every seated player.
pub(crate) fn player_legend(numplayers: usize) -> BTreeMap<char, String> {
    (1..=numplayers).map(|p| (glyph(p), format!("player {p}"))).collect()
}

/// Parses a user-supplied label, translating failure into a player message.
pub(crate) fn parse_cell<T: Topology>(topology: &T, label: &str) -> Result<T::Coord, UserMessage> {
    topology
        .label_to_coords(label)
        .map_err(|_| UserMessage::new(keys::INVALID_CELL).with("cell", label))
}

/// Label under a click at `(row, col)` on a board addressed by `(x, y)`.
pub(crate) fn click_label<T: Topology<Coord = (usize, usize)>>(
    topology: &T,
    row: usize,
    col: usize,
) -> Result<String, UserMessage> {
    topology
        .coords_to_label((col, row))
        .map_err(|_| UserMessage::new(keys::INVALID_CELL).with("cell", format!("{col},{row}")))
}

/// Every cell not rejected by `taken`, in natural label order.
pub(crate) fn open_cells<T: Topology>(topology: &T, taken: impl Fn(&str) -> bool) -> Vec<String> {
    let mut cells: Vec<String> = topology
        .list_cells()
        .into_iter()
        .filter(|label| !taken(label))
        .collect();
    sort_labels(&mut cells);
    cells
}

/// One string per row from a per-cell glyph function.
pub(crate) fn glyph_rows<T: Topology<Coord = (usize, usize)>>(
    topology: &T,
    rows: usize,
    glyph_at: impl Fn(&str) -> char,
) -> Vec<String> {
    let mut out = vec![String::new(); rows];
    for (x, y) in topology.cells() {
        if let (Ok(label), Some(row)) = (topology.coords_to_label((x, y)), out.get_mut(y)) {
            row.push(glyph_at(&label));
        }
    }
    out
}
