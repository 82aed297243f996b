//! A started game always has at least its initial snapshot.

use super::Invariant;
use crate::GameCore;

/// Invariant: the history stack is never empty once construction returns.
pub struct HistoryNonEmptyInvariant;

impl<B> Invariant<GameCore<B>> for HistoryNonEmptyInvariant {
    fn holds(core: &GameCore<B>) -> bool {
        !core.stack().is_empty()
    }

    fn description() -> &'static str {
        "History holds at least the initial snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoveState;

    #[test]
    fn test_fresh_core_violates_until_first_snapshot() {
        let mut core: GameCore<()> = GameCore::new(2, Vec::new(), 0);
        assert!(!HistoryNonEmptyInvariant::holds(&core));
        core.push_snapshot(MoveState::new(1, (), None, Vec::new()));
        assert!(HistoryNonEmptyInvariant::holds(&core));
    }
}
