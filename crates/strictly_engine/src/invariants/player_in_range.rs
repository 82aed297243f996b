//! The player to move is always a seated player.

use super::Invariant;
use crate::GameCore;

/// Invariant: `1 <= currplayer <= numplayers`, and the last snapshot agrees.
pub struct PlayerInRangeInvariant;

impl<B> Invariant<GameCore<B>> for PlayerInRangeInvariant {
    fn holds(core: &GameCore<B>) -> bool {
        let current = *core.currplayer();
        let in_range = (1..=*core.numplayers()).contains(&current);
        let matches_snapshot = core
            .stack()
            .last()
            .is_none_or(|snapshot| *snapshot.currplayer() == current);
        in_range && matches_snapshot
    }

    fn description() -> &'static str {
        "Current player is seated and matches the latest snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoveState;

    #[test]
    fn test_out_of_range_player_violates() {
        let mut core: GameCore<()> = GameCore::new(2, Vec::new(), 0);
        assert!(PlayerInRangeInvariant::holds(&core));
        core.set_currplayer(0);
        assert!(!PlayerInRangeInvariant::holds(&core));
    }

    #[test]
    fn test_snapshot_disagreement_violates() {
        let mut core: GameCore<()> = GameCore::new(2, Vec::new(), 0);
        core.push_snapshot(MoveState::new(1, (), None, Vec::new()));
        core.set_currplayer(2);
        assert!(!PlayerInRangeInvariant::holds(&core));
    }
}
