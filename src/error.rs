//! Crate-wide error type.

use thiserror::Error;

use crate::core::PlayerId;
use crate::rules::Rejection;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid dart value: {0} (expected 0-20 or 25)")]
    InvalidDartValue(String),

    #[error("Invalid multiplier: {0} (expected 1, 2 or 3)")]
    InvalidMultiplier(String),

    #[error("Dart slot {0} is locked until the earlier darts are entered")]
    SlotLocked(usize),

    #[error("Dart slot {0} is out of range")]
    SlotOutOfRange(usize),

    #[error("Invalid starting score: {0}")]
    InvalidStartingScore(u32),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("A match needs at least one player")]
    NoPlayers,

    #[error("Corrupt history for {player}: {detail}")]
    CorruptHistory { player: PlayerId, detail: String },

    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// The rule rejection behind this error, if it is one.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Error::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
