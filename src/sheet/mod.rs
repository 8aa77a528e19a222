//! Score sheet: the round-by-round history table and per-player summaries.
//!
//! Read-only views over `Player` history, for display and reporting.

use serde::{Deserialize, Serialize};

use crate::core::{Dart, Player, PlayerId, TurnRecord};

/// Label for a turn's darts as the history table shows them.
///
/// Misses are left out, so `[20x2, 5, 0]` reads `"20x2, 5"`.
#[must_use]
pub fn darts_label(darts: &[Dart]) -> String {
    darts
        .iter()
        .filter(|d| d.is_scoring())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One round across every player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub round: u32,
    /// One cell per seat; `None` if that player has not thrown this round.
    pub cells: Vec<Option<TurnRecord>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub players: Vec<PlayerId>,
    pub rows: Vec<SheetRow>,
}

impl ScoreSheet {
    /// Build rows `1..=max round` for the given seating order.
    #[must_use]
    pub fn from_players(players: &[Player]) -> Self {
        let max_round = players.iter().map(Player::last_round).max().unwrap_or(0);
        let rows = (1..=max_round)
            .map(|round| SheetRow {
                round,
                cells: players
                    .iter()
                    .map(|p| p.history.iter().find(|t| t.round == round).cloned())
                    .collect(),
            })
            .collect();
        Self {
            players: players.iter().map(|p| p.id.clone()).collect(),
            rows,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text for one cell: score followed by the darts, or empty.
    #[must_use]
    pub fn cell_label(record: Option<&TurnRecord>) -> String {
        match record {
            Some(turn) if turn.is_bust() => format!("BUST ({})", darts_label(&turn.darts)),
            Some(turn) => format!("{} ({})", turn.score, darts_label(&turn.darts)),
            None => String::new(),
        }
    }
}

/// Totals for one player's leg.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub player_id: PlayerId,
    pub name: String,
    pub turns: u32,
    pub points: u32,
    /// Points per turn of three darts.
    pub average: f64,
    pub best_turn: u32,
    pub busts: u32,
    pub remaining: u32,
}

impl PlayerSummary {
    #[must_use]
    pub fn for_player(player: &Player) -> Self {
        let turns = player.history.len() as u32;
        let points: u32 = player.history.iter().map(|t| t.score).sum();
        Self {
            player_id: player.id.clone(),
            name: player.name.clone(),
            turns,
            points,
            average: if turns == 0 {
                0.0
            } else {
                f64::from(points) / f64::from(turns)
            },
            best_turn: player.history.iter().map(|t| t.score).max().unwrap_or(0),
            busts: player.history.iter().filter(|t| t.is_bust()).count() as u32,
            remaining: player.score,
        }
    }

    /// One summary per player, in seat order.
    #[must_use]
    pub fn for_all(players: &[Player]) -> Vec<Self> {
        players.iter().map(Self::for_player).collect()
    }
}
