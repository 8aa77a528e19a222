//! Turn validation: double-in, bust, checkout and double-out.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::dart::{last_scoring_dart, turn_score};
use crate::core::{Dart, GameSettings, Player};

/// A turn the rules refuse to commit.
///
/// Nothing changes when a turn is rejected: no history entry, no turn
/// advance. The message is meant to be shown to the player as is.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("Enter at least one dart score")]
    NoDarts,

    #[error("The match is already over")]
    MatchOver,

    #[error("{name} needs to start with a double!")]
    NeedsDoubleIn { name: String },

    #[error("{name} needs to finish on a double!")]
    NeedsDoubleOut { name: String },
}

/// How a valid turn resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Score applies, this much is left.
    Scored { remaining: u32 },
    /// Scored more than was left.
    Bust,
    /// Reached exactly zero with a legal finish.
    Checkout,
}

/// Double-in: the first turn of a leg needs at least one double.
pub fn check_opening(
    settings: &GameSettings,
    player: &Player,
    darts: &[Dart],
) -> Result<(), Rejection> {
    if settings.double_in && player.is_first_turn() && !darts.iter().any(|d| d.is_double()) {
        return Err(Rejection::NeedsDoubleIn {
            name: player.name.clone(),
        });
    }
    Ok(())
}

/// Double-out: the last scoring dart must be a double.
#[must_use]
pub fn is_legal_finish(settings: &GameSettings, darts: &[Dart]) -> bool {
    if !settings.double_out {
        return true;
    }
    last_scoring_dart(darts).is_some_and(|d| d.is_double())
}

/// Classify a turn for a player, applying every rule in order.
///
/// 1. Double-in on the player's first turn.
/// 2. Bust when the turn score exceeds the remaining score.
/// 3. Checkout at exactly zero, subject to double-out.
pub fn judge(
    settings: &GameSettings,
    player: &Player,
    darts: &[Dart],
) -> Result<Verdict, Rejection> {
    if darts.is_empty() {
        return Err(Rejection::NoDarts);
    }
    check_opening(settings, player, darts)?;

    let score = turn_score(darts);
    if score > player.score {
        return Ok(Verdict::Bust);
    }

    let remaining = player.score - score;
    if remaining == 0 {
        if !is_legal_finish(settings, darts) {
            return Err(Rejection::NeedsDoubleOut {
                name: player.name.clone(),
            });
        }
        return Ok(Verdict::Checkout);
    }

    Ok(Verdict::Scored { remaining })
}
