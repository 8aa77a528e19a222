//! The turn transition.
//!
//! `commit_turn` is the only way a leg moves forward. It is pure: it reads
//! the current leg, players and settings, and returns the next ones plus the
//! effects the caller should carry out. On a rejection nothing is returned
//! but the reason.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::dart::turn_score;
use crate::core::{Dart, GamePoints, GameSettings, LegState, Player, PlayerId, TurnRecord};
use crate::effects::{Effect, EffectBatch};
use crate::storage::{GameSnapshot, LegResult, MatchResult};

use super::checks::{judge, Rejection, Verdict};

/// What a committed turn did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Score applied.
    Scored {
        player: PlayerId,
        score: u32,
        remaining: u32,
    },
    /// Scored past zero; nothing applied.
    Bust {
        player: PlayerId,
        attempted: u32,
        remaining: u32,
    },
    /// Checked out; a new leg has started.
    LegWon { player: PlayerId, game_points: u32 },
    /// Checked out and reached the threshold.
    MatchWon { player: PlayerId, game_points: u32 },
}

impl TurnOutcome {
    /// The player who threw.
    #[must_use]
    pub fn player(&self) -> &PlayerId {
        match self {
            TurnOutcome::Scored { player, .. }
            | TurnOutcome::Bust { player, .. }
            | TurnOutcome::LegWon { player, .. }
            | TurnOutcome::MatchWon { player, .. } => player,
        }
    }

    #[must_use]
    pub fn is_bust(&self) -> bool {
        matches!(self, TurnOutcome::Bust { .. })
    }

    /// Leg or match won.
    #[must_use]
    pub fn is_checkout(&self) -> bool {
        matches!(self, TurnOutcome::LegWon { .. } | TurnOutcome::MatchWon { .. })
    }
}

/// Result of a committed turn.
#[derive(Clone, Debug)]
pub struct Transition {
    pub leg: LegState,
    pub players: Vec<Player>,
    pub outcome: TurnOutcome,
    pub effects: EffectBatch,
}

/// Commit the active player's darts.
///
/// The active player is `leg.current_player_index`. Rules are applied in
/// order: double-in, bust, checkout with double-out. Committed turns
/// append exactly one history entry and pass the turn on; a checkout then
/// either ends the match or restarts the leg.
pub fn commit_turn(
    leg: &LegState,
    players: &[Player],
    darts: &[Dart],
    settings: &GameSettings,
) -> Result<Transition, Rejection> {
    if !leg.active {
        return Err(Rejection::MatchOver);
    }
    let seat = leg.current_player_index;
    let Some(player) = players.get(seat) else {
        return Err(Rejection::MatchOver);
    };

    let verdict = judge(settings, player, darts)?;

    let mut next_leg = leg.clone();
    let mut next_players = players.to_vec();
    let mut effects = EffectBatch::new();
    let thrower = &mut next_players[seat];
    let round = leg.round;

    let outcome = match verdict {
        Verdict::Bust => {
            thrower.history.push_back(TurnRecord::bust(round, darts));
            TurnOutcome::Bust {
                player: thrower.id.clone(),
                attempted: turn_score(darts),
                remaining: thrower.score,
            }
        }
        Verdict::Scored { remaining } => {
            thrower.history.push_back(TurnRecord::scored(round, darts));
            thrower.score = remaining;
            TurnOutcome::Scored {
                player: thrower.id.clone(),
                score: turn_score(darts),
                remaining,
            }
        }
        Verdict::Checkout => {
            thrower.history.push_back(TurnRecord::scored(round, darts));
            thrower.score = 0;
            let id = thrower.id.clone();
            let tally = next_leg.game_points.award(&id);
            next_leg.winner = Some(id.clone());
            if tally >= settings.game_point_threshold {
                TurnOutcome::MatchWon {
                    player: id,
                    game_points: tally,
                }
            } else {
                TurnOutcome::LegWon {
                    player: id,
                    game_points: tally,
                }
            }
        }
    };

    next_leg.advance_turn(next_players.len());

    match &outcome {
        TurnOutcome::Scored { player, score, remaining } => {
            debug!("{} scored {} in round {}, {} left", player, score, round, remaining);
            effects.push(Effect::SaveGame(GameSnapshot::new(&next_players, &next_leg, settings)));
        }
        TurnOutcome::Bust { player, attempted, remaining } => {
            debug!("{} bust with {} in round {}, stays on {}", player, attempted, round, remaining);
            effects.push(Effect::SaveGame(GameSnapshot::new(&next_players, &next_leg, settings)));
        }
        TurnOutcome::LegWon { player, game_points } => {
            info!("{} won the leg in round {} ({} game points)", player, round, game_points);
            let finished = leg_result(&next_players, &next_leg, settings, player);
            effects.push(Effect::LegComplete(finished));

            for p in &mut next_players {
                p.reset(settings.start());
            }
            next_leg.restart_leg();
            effects.push(Effect::SaveGame(GameSnapshot::new(&next_players, &next_leg, settings)));
        }
        TurnOutcome::MatchWon { player, game_points } => {
            info!("{} won the match with {} game points", player, game_points);
            let finished = leg_result(&next_players, &next_leg, settings, player);
            effects.push(Effect::LegComplete(finished));

            next_leg.active = false;
            effects.push(Effect::SaveGame(GameSnapshot::new(
                &next_players,
                &next_leg,
                settings,
            )));
            effects.push(Effect::MatchComplete(MatchResult {
                winner: next_players[seat].clone(),
                game_points: next_leg.game_points.clone(),
            }));
        }
    }

    Ok(Transition {
        leg: next_leg,
        players: next_players,
        outcome,
        effects,
    })
}

fn leg_result(
    players: &[Player],
    leg: &LegState,
    settings: &GameSettings,
    winner: &PlayerId,
) -> LegResult {
    LegResult {
        leg_number: leg.game_points.legs_played(),
        winner: winner.clone(),
        game_points: leg.game_points.clone(),
        final_state: GameSnapshot::new(players, leg, settings),
    }
}

/// Reset every player and the leg for a fresh leg with the same settings.
///
/// Game points are kept.
pub fn restart_leg(
    leg: &LegState,
    players: &[Player],
    settings: &GameSettings,
) -> (LegState, Vec<Player>) {
    let mut next_leg = leg.clone();
    next_leg.restart_leg();
    if next_leg.game_points == GamePoints::default() {
        next_leg.game_points = GamePoints::for_players(players);
    }
    let next_players = players
        .iter()
        .cloned()
        .map(|mut p| {
            p.reset(settings.start());
            p
        })
        .collect();
    (next_leg, next_players)
}
