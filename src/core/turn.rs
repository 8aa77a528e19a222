//! Recorded turns.

use serde::{Deserialize, Serialize};

use super::dart::{padded, turn_score, Dart, TurnDarts};

/// One completed turn in a player's history.
///
/// `darts` always holds three entries, padded with misses. On a bust
/// `score` is 0 even though the darts themselves scored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Round number (1-based, shared by all players in a leg).
    pub round: u32,
    /// Points applied to the remaining score this turn.
    pub score: u32,
    pub darts: TurnDarts,
}

impl TurnRecord {
    /// Record a scored turn.
    #[must_use]
    pub fn scored(round: u32, darts: &[Dart]) -> Self {
        Self {
            round,
            score: turn_score(darts),
            darts: padded(darts),
        }
    }

    /// Record a bust: darts are kept, the applied score is 0.
    #[must_use]
    pub fn bust(round: u32, darts: &[Dart]) -> Self {
        Self {
            round,
            score: 0,
            darts: padded(darts),
        }
    }

    /// Points the darts themselves add up to.
    #[must_use]
    pub fn dart_total(&self) -> u32 {
        turn_score(&self.darts)
    }

    /// True when the darts scored but nothing was applied.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score == 0 && self.dart_total() > 0
    }
}
