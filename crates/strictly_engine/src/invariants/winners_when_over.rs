//! Winners are declared only once the game is over.

use super::Invariant;
use crate::GameCore;

/// Invariant: a non-empty `winner` list implies `gameover`, and every
/// winner is a seated player.
pub struct WinnersWhenOverInvariant;

impl<B> Invariant<GameCore<B>> for WinnersWhenOverInvariant {
    fn holds(core: &GameCore<B>) -> bool {
        let seated = core.winner().iter().all(|p| (1..=*core.numplayers()).contains(p));
        seated && (core.winner().is_empty() || *core.gameover())
    }

    fn description() -> &'static str {
        "Winners are seated players declared only after the game ends"
    }
}
