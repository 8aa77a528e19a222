//! Effect resolution against a store.
//!
//! Effects are applied in order. A failing effect does not stop the ones
//! after it, and nothing already applied in memory is rolled back. Failures
//! come back to the caller, who decides whether to retry.

use tracing::warn;

use crate::storage::{GameStore, MatchId, StoreError};

use super::{Effect, EffectBatch};

/// Result of resolving one effect.
#[derive(Debug)]
pub enum ResolveResult {
    Success,
    Failed(StoreError),
}

impl ResolveResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ResolveResult::Success)
    }
}

/// Dispatches effects to a `GameStore`.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve a batch, returning one result per effect.
    pub fn resolve_batch<S: GameStore + ?Sized>(
        store: &mut S,
        match_id: &MatchId,
        batch: &EffectBatch,
    ) -> Vec<ResolveResult> {
        batch
            .iter()
            .map(|effect| Self::resolve_single(store, match_id, effect))
            .collect()
    }

    /// Resolve a batch and keep only the failures.
    pub fn failures<S: GameStore + ?Sized>(
        store: &mut S,
        match_id: &MatchId,
        batch: &EffectBatch,
    ) -> Vec<StoreError> {
        Self::resolve_batch(store, match_id, batch)
            .into_iter()
            .filter_map(|r| match r {
                ResolveResult::Failed(e) => Some(e),
                ResolveResult::Success => None,
            })
            .collect()
    }

    pub fn resolve_single<S: GameStore + ?Sized>(
        store: &mut S,
        match_id: &MatchId,
        effect: &Effect,
    ) -> ResolveResult {
        let outcome = match effect {
            Effect::SaveGame(snapshot) => store.save_game(match_id, snapshot),
            Effect::LegComplete(result) => store.record_leg(match_id, result),
            Effect::MatchComplete(result) => store.complete_match(match_id, result),
        };

        match outcome {
            Ok(()) => ResolveResult::Success,
            Err(e) => {
                warn!("{} failed for match {}: {}", effect.kind(), match_id, e);
                ResolveResult::Failed(e)
            }
        }
    }
}
