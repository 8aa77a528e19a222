//! Effect definitions.
//!
//! A committed turn never talks to storage directly. It returns the side
//! effects it needs as data, and the caller (or `EffectResolver`) carries
//! them out against a `GameStore`.

use serde::{Deserialize, Serialize};

use crate::storage::{GameSnapshot, LegResult, MatchResult};

/// A side effect requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Persist the current snapshot.
    SaveGame(GameSnapshot),

    /// A leg was won. Emitted before the next leg starts.
    LegComplete(LegResult),

    /// The match is decided. Emitted once per match.
    MatchComplete(MatchResult),
}

impl Effect {
    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::SaveGame(_) => "save_game",
            Effect::LegComplete(_) => "leg_complete",
            Effect::MatchComplete(_) => "match_complete",
        }
    }
}

/// Ordered effects produced by one transition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBatch {
    effects: Vec<Effect>,
}

impl EffectBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// The latest snapshot this batch saves, if any.
    #[must_use]
    pub fn last_save(&self) -> Option<&GameSnapshot> {
        self.effects.iter().rev().find_map(|e| match e {
            Effect::SaveGame(s) => Some(s),
            _ => None,
        })
    }

    #[must_use]
    pub fn match_result(&self) -> Option<&MatchResult> {
        self.effects.iter().find_map(|e| match e {
            Effect::MatchComplete(r) => Some(r),
            _ => None,
        })
    }

    #[must_use]
    pub fn leg_result(&self) -> Option<&LegResult> {
        self.effects.iter().find_map(|e| match e {
            Effect::LegComplete(r) => Some(r),
            _ => None,
        })
    }
}

impl IntoIterator for EffectBatch {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.into_iter()
    }
}

impl<'a> IntoIterator for &'a EffectBatch {
    type Item = &'a Effect;
    type IntoIter = std::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.iter()
    }
}
