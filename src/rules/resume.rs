//! Rebuilding leg state from persisted history.
//!
//! Only the history decides whose turn it is:
//! - with no history at all, round 1 starts at seat 0
//! - find the highest round anyone has played
//! - if every player has played it, the next round starts at seat 0
//! - otherwise that round continues with the first seat that has not thrown
//!
//! Tallies, `active` and `winner` come from a previously saved `LegState`
//! when there is one. The function is pure, so resuming twice from the same
//! input gives the same state.

use tracing::info;

use crate::core::{LegState, Player};

/// Reconstruct the leg position from history.
pub fn resume_leg(players: &[Player], previous: Option<&LegState>) -> LegState {
    let mut leg = match previous {
        Some(saved) => {
            let mut leg = saved.clone();
            for p in players {
                if leg.game_points.iter().all(|(id, _)| id != &p.id) {
                    leg.game_points.set(p.id.clone(), 0);
                }
            }
            leg
        }
        None => LegState::new(players),
    };
    leg.round_complete = false;

    let max_round = players.iter().map(Player::last_round).max().unwrap_or(0);
    if max_round == 0 {
        leg.round = 1;
        leg.current_player_index = 0;
        return leg;
    }

    match players.iter().position(|p| !p.has_round(max_round)) {
        Some(seat) => {
            leg.round = max_round;
            leg.current_player_index = seat;
        }
        None => {
            leg.round = max_round + 1;
            leg.current_player_index = 0;
        }
    }

    info!(
        "Resumed at round {} with seat {} to throw",
        leg.round, leg.current_player_index
    );
    leg
}
