//! Player identification and per-player scoring data.
//!
//! ## PlayerId
//!
//! Opaque string identifier. Ids come from the caller (database keys,
//! user names) and are only compared for equality.
//!
//! ## Player
//!
//! Remaining score plus the ordered turn history for the current leg.
//! History is an `im::Vector`, so cloning a player for a snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::turn::TurnRecord;
use crate::error::{Error, Result};

/// Opaque player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A player in a leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Remaining score.
    pub score: u32,
    pub history: Vector<TurnRecord>,
}

impl Player {
    /// Create a player at the start of a leg.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, starting_score: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: starting_score,
            history: Vector::new(),
        }
    }

    /// Rebuild a player from persisted history.
    ///
    /// The remaining score is `starting_score - Σ score`. Rounds must form
    /// the gap-free prefix `1..=k` in order.
    pub fn from_history(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        starting_score: u32,
        history: impl IntoIterator<Item = TurnRecord>,
    ) -> Result<Self> {
        let mut player = Self::new(id, name, starting_score);
        player.history = history.into_iter().collect();
        player.recompute_score(starting_score)?;
        Ok(player)
    }

    /// Validate the history and derive the remaining score from it.
    pub fn recompute_score(&mut self, starting_score: u32) -> Result<()> {
        self.check_history()?;
        let applied: u64 = self.history.iter().map(|t| u64::from(t.score)).sum();
        if applied > u64::from(starting_score) {
            return Err(self.corrupt(format!(
                "history applies {applied} points against a starting score of {starting_score}"
            )));
        }
        self.score = starting_score - applied as u32;
        Ok(())
    }

    /// Check that the rounds in history are exactly `1..=len`.
    pub fn check_history(&self) -> Result<()> {
        for (expected, turn) in (1u32..).zip(self.history.iter()) {
            if turn.round != expected {
                return Err(self.corrupt(format!(
                    "expected round {expected}, found round {}",
                    turn.round
                )));
            }
        }
        Ok(())
    }

    fn corrupt(&self, detail: String) -> Error {
        Error::CorruptHistory {
            player: self.id.clone(),
            detail,
        }
    }

    /// True if this player has not thrown yet this leg.
    #[must_use]
    pub fn is_first_turn(&self) -> bool {
        self.history.is_empty()
    }

    #[must_use]
    pub fn has_round(&self, round: u32) -> bool {
        self.history.iter().any(|t| t.round == round)
    }

    /// Highest round recorded, 0 if none.
    #[must_use]
    pub fn last_round(&self) -> u32 {
        self.history.iter().map(|t| t.round).max().unwrap_or(0)
    }

    /// Start a fresh leg.
    pub fn reset(&mut self, starting_score: u32) {
        self.score = starting_score;
        self.history.clear();
    }
}

/// Find a player's seat by id.
#[must_use]
pub fn seat_of(players: &[Player], id: &PlayerId) -> Option<usize> {
    players.iter().position(|p| &p.id == id)
}
