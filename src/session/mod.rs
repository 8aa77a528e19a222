//! Interactive scoring session.
//!
//! `ScoreTracker` wraps the pure engine with the pieces a scoring screen
//! needs: a dart input buffer, a store, and the current match state. Every
//! committed turn is saved straight away.

mod tracker;

pub use tracker::{ScoreTracker, TurnReport};

use serde::{Deserialize, Serialize};

use crate::core::{GameSettings, LegState, Player};

/// When busts and checkouts are noticed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Detection {
    /// Only when the turn is submitted.
    #[default]
    OnSubmit,
    /// After every dart entry. A bust or a legal finish commits the turn at
    /// once, as does the third dart.
    PerDart,
}

/// Tracker behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerOptions {
    pub detection: Detection,
}

impl TrackerOptions {
    #[must_use]
    pub fn with_detection(mut self, detection: Detection) -> Self {
        self.detection = detection;
        self
    }
}

/// What a resumed match starts from.
///
/// Players carry their recorded history. `leg` is the last persisted leg
/// state, if any; its tallies and winner are kept, while the turn position
/// is always rebuilt from history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialState {
    pub players: Vec<Player>,
    #[serde(rename = "gameSettings")]
    pub settings: GameSettings,
    #[serde(rename = "currentGame", default)]
    pub leg: Option<LegState>,
}

impl From<crate::storage::GameSnapshot> for InitialState {
    fn from(snapshot: crate::storage::GameSnapshot) -> Self {
        Self {
            players: snapshot.players,
            settings: snapshot.settings,
            leg: Some(snapshot.leg),
        }
    }
}
