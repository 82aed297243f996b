//! Static game metadata and variant resolution.

use crate::{EngineError, EngineErrorKind};
use serde::Serialize;
use tracing::{debug, instrument};

/// Capabilities a front end may need to know about.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameFlag {
    /// All players move at once.
    Simultaneous,
    /// The second player may take over the first move.
    PieRule,
    /// Players accumulate scores.
    Scores,
    /// Setup or play draws on the seeded generator.
    Random,
}

/// One selectable variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantDef {
    /// Identifier used in serialized state.
    pub uid: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Exclusive group; at most one variant per group may be chosen.
    pub group: Option<&'static str>,
    /// One-line description.
    pub description: &'static str,
}

/// Static description of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    /// Identifier stored in serialized state.
    pub uid: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Smallest supported player count.
    pub min_players: usize,
    /// Largest supported player count.
    pub max_players: usize,
    /// Declared variants.
    pub variants: &'static [VariantDef],
    /// Capabilities.
    pub flags: &'static [GameFlag],
}

impl GameInfo {
    /// Whether the game carries `flag`.
    pub fn has_flag(&self, flag: GameFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Looks up a declared variant.
    pub fn variant(&self, uid: &str) -> Option<&'static VariantDef> {
        self.variants.iter().find(|v| v.uid == uid)
    }

    /// Checks a requested player count.
    #[track_caller]
    pub fn check_players(&self, requested: usize) -> Result<(), EngineError> {
        if (self.min_players..=self.max_players).contains(&requested) {
            Ok(())
        } else {
            Err(EngineError::new(EngineErrorKind::PlayerCount {
                requested,
                min: self.min_players,
                max: self.max_players,
            }))
        }
    }

    /// Resolves requested variant ids against the declared ones.
    ///
    /// Ids are trimmed and lowercased; blanks and repeats are dropped. The
    /// result keeps request order. Unknown ids and two ids from the same
    /// group are errors.
    #[track_caller]
    #[instrument(skip(self), fields(game = self.uid))]
    pub fn resolve_variants<S: AsRef<str> + std::fmt::Debug>(
        &self,
        requested: &[S],
    ) -> Result<Vec<String>, EngineError> {
        let mut chosen: Vec<&'static VariantDef> = Vec::new();
        for raw in requested {
            let id = raw.as_ref().trim().to_lowercase();
            if id.is_empty() || chosen.iter().any(|v| v.uid == id) {
                continue;
            }
            let def = self
                .variant(&id)
                .ok_or_else(|| EngineError::new(EngineErrorKind::UnknownVariant(id.clone())))?;
            if let Some(group) = def.group
                && let Some(clash) = chosen.iter().find(|v| v.group == Some(group))
            {
                return Err(EngineError::new(EngineErrorKind::ConflictingVariants(
                    clash.uid.to_string(),
                    def.uid.to_string(),
                )));
            }
            chosen.push(def);
        }
        let resolved: Vec<String> = chosen.iter().map(|v| v.uid.to_string()).collect();
        debug!(?resolved, "Variants resolved");
        Ok(resolved)
    }
}
