//! Line detection for n-in-a-row.

use super::Stone;
use std::collections::BTreeMap;
use strictly_geometry::{Direction, RectGrid, Topology};
use tracing::instrument;

/// Directions that start each line exactly once: a line is found from its
/// first cell scanning east, south, south-east or south-west.
const SCAN: [Direction; 4] = [Direction::E, Direction::S, Direction::SE, Direction::SW];

/// Finds a run of at least `length` stones of one player.
///
/// Returns the player and the cells of the first run found, scanning cells
/// in board order. Neutral stones never form lines.
#[instrument(skip(grid, cells))]
pub fn check_winner(grid: &RectGrid, cells: &BTreeMap<String, Stone>, length: usize) -> Option<(usize, Vec<String>)> {
    let owner = |x: usize, y: usize| -> Option<usize> {
        let label = grid.coords_to_label((x, y)).ok()?;
        match cells.get(&label)? {
            Stone::Player(p) => Some(*p),
            Stone::Neutral => None,
        }
    };

    for (x, y) in grid.cells() {
        let Some(player) = owner(x, y) else {
            continue;
        };
        for dir in SCAN {
            let Ok(ray) = grid.ray(x, y, dir) else {
                continue;
            };
            let run: Vec<(usize, usize)> = std::iter::once((x, y))
                .chain(ray.into_iter().take_while(|&(rx, ry)| owner(rx, ry) == Some(player)))
                .collect();
            if run.len() >= length {
                let labels = run
                    .into_iter()
                    .filter_map(|c| grid.coords_to_label(c).ok())
                    .collect();
                return Some((player, labels));
            }
        }
    }

    None
}

/// Whether every cell holds a stone.
pub fn board_full(grid: &RectGrid, cells: &BTreeMap<String, Stone>) -> bool {
    cells.len() >= grid.width() * grid.height()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(stones: &[(&str, Stone)]) -> BTreeMap<String, Stone> {
        stones.iter().map(|(l, s)| (l.to_string(), *s)).collect()
    }

    #[test]
    fn test_no_winner_empty_board() {
        let grid = RectGrid::square(3).unwrap();
        assert_eq!(check_winner(&grid, &BTreeMap::new(), 3), None);
    }

    #[test]
    fn test_winner_top_row() {
        let grid = RectGrid::square(3).unwrap();
        let cells = board(&[("a3", Stone::Player(1)), ("b3", Stone::Player(1)), ("c3", Stone::Player(1))]);
        let (player, line) = check_winner(&grid, &cells, 3).unwrap();
        assert_eq!(player, 1);
        assert_eq!(line, vec!["a3", "b3", "c3"]);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let grid = RectGrid::square(3).unwrap();
        let cells = board(&[("c3", Stone::Player(2)), ("b2", Stone::Player(2)), ("a1", Stone::Player(2))]);
        assert_eq!(check_winner(&grid, &cells, 3).map(|(p, _)| p), Some(2));
    }

    #[test]
    fn test_no_winner_incomplete_or_neutral() {
        let grid = RectGrid::square(3).unwrap();
        let cells = board(&[("a1", Stone::Player(1)), ("a2", Stone::Player(1)), ("a3", Stone::Neutral)]);
        assert_eq!(check_winner(&grid, &cells, 3), None);
    }

    #[test]
    fn test_longer_board_needs_full_length() {
        let grid = RectGrid::square(9).unwrap();
        let four = board(&[
            ("c5", Stone::Player(1)),
            ("d5", Stone::Player(1)),
            ("e5", Stone::Player(1)),
            ("f5", Stone::Player(1)),
        ]);
        assert_eq!(check_winner(&grid, &four, 5), None);
        let mut five = four.clone();
        five.insert("g5".into(), Stone::Player(1));
        assert_eq!(check_winner(&grid, &five, 5).map(|(_, l)| l.len()), Some(5));
    }
}
