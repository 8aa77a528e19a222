//! Leg state and game-point tallies.
//!
//! ## LegState
//!
//! Progress of the current leg and the match around it:
//! - `active`: false once the match is decided
//! - `round`, `current_player_index`: whose turn it is
//! - `winner`: the leg (or match) winner, if any
//! - `game_points`: legs won per player, kept across legs
//! - `round_complete`: set on the turn that wraps back to seat 0
//!
//! The state is plain data. It only changes through `rules::commit_turn`
//! and `rules::resume_leg`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};

/// Legs won per player. Missing entries read as 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GamePoints(FxHashMap<PlayerId, u32>);

impl GamePoints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero tally for every player.
    #[must_use]
    pub fn for_players(players: &[Player]) -> Self {
        Self(players.iter().map(|p| (p.id.clone(), 0)).collect())
    }

    #[must_use]
    pub fn get(&self, player: &PlayerId) -> u32 {
        self.0.get(player).copied().unwrap_or(0)
    }

    pub fn set(&mut self, player: PlayerId, points: u32) {
        self.0.insert(player, points);
    }

    /// Add one leg win and return the new tally.
    pub fn award(&mut self, player: &PlayerId) -> u32 {
        let tally = self.0.entry(player.clone()).or_insert(0);
        *tally += 1;
        *tally
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, u32)> {
        self.0.iter().map(|(id, &n)| (id, n))
    }

    /// Total legs played to a result.
    #[must_use]
    pub fn legs_played(&self) -> u32 {
        self.0.values().sum()
    }
}

impl FromIterator<(PlayerId, u32)> for GamePoints {
    fn from_iter<I: IntoIterator<Item = (PlayerId, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// State of the current leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegState {
    pub active: bool,

    /// Current round (starts at 1).
    pub round: u32,

    pub winner: Option<PlayerId>,

    pub game_points: GamePoints,

    /// Seat whose turn it is.
    pub current_player_index: usize,

    /// Transient: the last committed turn closed a round.
    pub round_complete: bool,
}

impl LegState {
    /// Fresh match state: round 1, seat 0, zero tallies.
    #[must_use]
    pub fn new(players: &[Player]) -> Self {
        Self {
            active: true,
            round: 1,
            winner: None,
            game_points: GamePoints::for_players(players),
            current_player_index: 0,
            round_complete: false,
        }
    }

    /// The player whose turn it is, if the match is still running.
    #[must_use]
    pub fn current_player<'a>(&self, players: &'a [Player]) -> Option<&'a Player> {
        if !self.active {
            return None;
        }
        players.get(self.current_player_index)
    }

    /// Pass the turn to the next seat, wrapping into the next round.
    pub fn advance_turn(&mut self, player_count: usize) {
        let is_last = self.current_player_index + 1 >= player_count;
        if is_last {
            self.current_player_index = 0;
            self.round += 1;
        } else {
            self.current_player_index += 1;
        }
        self.round_complete = is_last;
    }

    /// Back to round 1, seat 0, with tallies kept.
    pub fn restart_leg(&mut self) {
        self.active = true;
        self.round = 1;
        self.winner = None;
        self.current_player_index = 0;
        self.round_complete = false;
    }

    /// Match decided.
    #[must_use]
    pub fn is_over(&self) -> bool {
        !self.active
    }
}
