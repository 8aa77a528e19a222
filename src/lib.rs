//! # darts-engine
//!
//! Scoring engine for x01 darts matches: 101 to 1001, optional double-in
//! and double-out, played over legs until someone reaches the game-point
//! threshold.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `rules::commit_turn` takes the current state and
//!    returns the next one. Nothing is mutated in place and a rejected turn
//!    leaves no trace.
//!
//! 2. **Effects as data**: saves, leg results and match completion come back
//!    as an `EffectBatch`. The caller applies them to a `GameStore` after the
//!    transition has been accepted.
//!
//! 3. **History is the source of truth**: remaining scores and the turn
//!    position can always be rebuilt from recorded rounds.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: player history uses `im-rs`, so a
//!   snapshot per turn clones in O(1).
//!
//! - **Inline darts**: a turn holds at most three darts, stored in a
//!   `SmallVec` without allocating.
//!
//! ## Modules
//!
//! - `core`: Darts, players, turn records, settings, leg state, input buffer
//! - `rules`: Turn validation, `commit_turn`, resume reconstruction
//! - `effects`: Store-bound effects and their resolver
//! - `storage`: `GameStore` trait, snapshots, memory and file stores
//! - `session`: `ScoreTracker`, the interactive scoring loop
//! - `sheet`: Round-by-round score sheet and player summaries
//! - `sim`: Deterministic throw simulation

pub mod core;
pub mod effects;
pub mod error;
pub mod rules;
pub mod session;
pub mod sheet;
pub mod sim;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    Dart, GamePoints, GameSettings, LegState, Multiplier, Player, PlayerId, StartingScore,
    TurnDarts, TurnInput, TurnRecord, DARTS_PER_TURN,
};

pub use crate::error::{Error, Result};

pub use crate::rules::{commit_turn, resume_leg, Rejection, Transition, TurnOutcome};

pub use crate::effects::{Effect, EffectBatch, EffectResolver, ResolveResult};

pub use crate::storage::{
    FileStore, Format, GameSnapshot, GameStore, LegResult, MatchId, MatchResult, MemoryStore,
    ScoreRow, StoreError,
};

pub use crate::session::{Detection, InitialState, ScoreTracker, TrackerOptions, TurnReport};

pub use crate::sheet::{PlayerSummary, ScoreSheet};

pub use crate::sim::{simulate_match, ThrowSimulator};
