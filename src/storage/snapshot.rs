//! Persisted shapes: full game snapshots, leg results and flat score rows.

use serde::{Deserialize, Serialize};

use crate::core::{GamePoints, GameSettings, LegState, Player, PlayerId, TurnDarts};

/// Everything needed to resume a match.
///
/// Field names follow the save payload front ends already produce:
/// `players`, `currentGame`, `gameSettings`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    #[serde(rename = "currentGame")]
    pub leg: LegState,
    #[serde(rename = "gameSettings")]
    pub settings: GameSettings,
}

impl GameSnapshot {
    #[must_use]
    pub fn new(players: &[Player], leg: &LegState, settings: &GameSettings) -> Self {
        Self {
            players: players.to_vec(),
            leg: leg.clone(),
            settings: settings.clone(),
        }
    }

    /// Flatten every player's history into per-round rows.
    ///
    /// `remaining_score` is what the player had left after that round.
    #[must_use]
    pub fn score_rows(&self) -> Vec<ScoreRow> {
        let start = self.settings.start();
        self.players
            .iter()
            .flat_map(|player| {
                let mut remaining = start;
                player.history.iter().map(move |turn| {
                    remaining = remaining.saturating_sub(turn.score);
                    ScoreRow {
                        player_id: player.id.clone(),
                        round_number: turn.round,
                        score: turn.score,
                        darts: turn.darts.clone(),
                        remaining_score: remaining,
                    }
                })
            })
            .collect()
    }
}

/// One player's result for one round, as a score table row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    pub player_id: PlayerId,
    pub round_number: u32,
    pub score: u32,
    pub darts: TurnDarts,
    pub remaining_score: u32,
}

/// A finished leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegResult {
    /// 1-based leg number within the match.
    pub leg_number: u32,
    pub winner: PlayerId,
    /// Tallies after this leg.
    pub game_points: GamePoints,
    /// The leg as it stood when the checkout landed.
    pub final_state: GameSnapshot,
}

/// A decided match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub winner: Player,
    pub game_points: GamePoints,
}
