//! Persistence boundary.
//!
//! The engine never stores anything itself. Callers implement `GameStore`
//! for their database; `MemoryStore` and `FileStore` are ready-made
//! implementations for tests, tools and single-machine use.

mod file;
mod memory;
mod snapshot;

pub use file::{FileStore, Format};
pub use memory::MemoryStore;
pub use snapshot::{GameSnapshot, LegResult, MatchResult, ScoreRow};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier a match is stored under.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence and match-completion collaborator.
///
/// Called after a transition has already been applied in memory. An error
/// means the stored copy may lag behind; it never undoes the transition.
pub trait GameStore {
    /// Store the latest snapshot of a match, replacing the previous one.
    fn save_game(&mut self, match_id: &MatchId, snapshot: &GameSnapshot) -> Result<(), StoreError>;

    /// Record a finished leg.
    fn record_leg(&mut self, match_id: &MatchId, result: &LegResult) -> Result<(), StoreError>;

    /// Mark the match closed with its winner and final tallies.
    fn complete_match(
        &mut self,
        match_id: &MatchId,
        result: &MatchResult,
    ) -> Result<(), StoreError>;

    /// Latest stored snapshot, if the match exists.
    fn load_game(&self, match_id: &MatchId) -> Result<Option<GameSnapshot>, StoreError>;
}
