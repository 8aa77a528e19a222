//! In-memory store.

use rustc_hash::FxHashMap;

use super::{GameSnapshot, GameStore, LegResult, MatchId, MatchResult, StoreError};

/// Keeps every write in memory.
///
/// Saves are kept in order rather than overwritten, so callers can inspect
/// the full sequence. `fail_writes(true)` makes every write fail, to drive
/// the persistence-failure path.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saves: FxHashMap<MatchId, Vec<GameSnapshot>>,
    legs: FxHashMap<MatchId, Vec<LegResult>>,
    completions: FxHashMap<MatchId, Vec<MatchResult>>,
    failing: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn fail_writes(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }

    /// Every snapshot saved for a match, oldest first.
    #[must_use]
    pub fn saves(&self, match_id: &MatchId) -> &[GameSnapshot] {
        self.saves.get(match_id).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn legs(&self, match_id: &MatchId) -> &[LegResult] {
        self.legs.get(match_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every completion call for a match.
    #[must_use]
    pub fn completions(&self, match_id: &MatchId) -> &[MatchResult] {
        self.completions.get(match_id).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn is_complete(&self, match_id: &MatchId) -> bool {
        !self.completions(match_id).is_empty()
    }
}

impl GameStore for MemoryStore {
    fn save_game(&mut self, match_id: &MatchId, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        self.check()?;
        self.saves
            .entry(match_id.clone())
            .or_default()
            .push(snapshot.clone());
        Ok(())
    }

    fn record_leg(&mut self, match_id: &MatchId, result: &LegResult) -> Result<(), StoreError> {
        self.check()?;
        self.legs.entry(match_id.clone()).or_default().push(result.clone());
        Ok(())
    }

    fn complete_match(
        &mut self,
        match_id: &MatchId,
        result: &MatchResult,
    ) -> Result<(), StoreError> {
        self.check()?;
        self.completions
            .entry(match_id.clone())
            .or_default()
            .push(result.clone());
        Ok(())
    }

    fn load_game(&self, match_id: &MatchId) -> Result<Option<GameSnapshot>, StoreError> {
        Ok(self.saves(match_id).last().cloned())
    }
}
