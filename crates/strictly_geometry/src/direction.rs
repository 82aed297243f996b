//! Compass directions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the eight compass directions.
///
/// Screen orientation: north is toward row 0 (the top of the board), east is
/// toward increasing column index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    /// Up.
    N,
    /// Up and right.
    NE,
    /// Right.
    E,
    /// Down and right.
    SE,
    /// Down.
    S,
    /// Down and left.
    SW,
    /// Left.
    W,
    /// Up and left.
    NW,
}

impl Direction {
    /// Column and row offsets for one step in this direction.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }

    /// True for N, E, S and W.
    pub fn is_orthogonal(self) -> bool {
        matches!(self, Direction::N | Direction::E | Direction::S | Direction::W)
    }

    /// The four orthogonal directions.
    pub fn orthogonal() -> [Direction; 4] {
        [Direction::N, Direction::E, Direction::S, Direction::W]
    }

    /// The four diagonal directions.
    pub fn diagonal() -> [Direction; 4] {
        [Direction::NE, Direction::SE, Direction::SW, Direction::NW]
    }

    /// All eight directions, clockwise from north.
    pub fn all() -> Vec<Direction> {
        Direction::iter().collect()
    }

    /// The direction whose step is `(dx, dy)` after normalising to unit length.
    pub fn from_delta(dx: i64, dy: i64) -> Option<Direction> {
        let d = (dx.signum(), dy.signum());
        Direction::iter().find(|dir| dir.delta() == d && d != (0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_cancel() {
        for dir in Direction::iter() {
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("ne".parse::<Direction>().unwrap(), Direction::NE);
        assert_eq!("W".parse::<Direction>().unwrap(), Direction::W);
    }
}
