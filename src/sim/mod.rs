//! Deterministic throw simulation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical throws
//! - **Forkable**: Independent but reproducible streams per simulated player
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use darts_engine::sim::ThrowSimulator;
//!
//! let mut a = ThrowSimulator::new(7);
//! let mut b = ThrowSimulator::new(7);
//! assert_eq!(a.random_dart(), b.random_dart());
//! ```
//!
//! `simulate_match` drives `commit_turn` with simulated players until the
//! match is decided. It backs the benchmarks and the property tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::dart::{turn_score, BULL};
use crate::core::{Dart, GameSettings, LegState, Multiplier, Player, TurnDarts, DARTS_PER_TURN};
use crate::rules::commit_turn;
use crate::storage::MatchResult;

/// Board segments clockwise from the top.
const BOARD: [u8; 20] = [20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5];

/// Seeded dart thrower.
#[derive(Clone, Debug)]
pub struct ThrowSimulator {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
    accuracy: f64,
}

impl ThrowSimulator {
    /// A thrower hitting its target 40% of the time.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
            accuracy: 0.4,
        }
    }

    /// Probability of hitting the aimed segment exactly, clamped to `0..=1`.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Split off an independent thrower with the same accuracy.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
            accuracy: self.accuracy,
        }
    }

    /// Any legal dart, uniformly over face and multiplier.
    pub fn random_dart(&mut self) -> Dart {
        let value = match self.inner.gen_range(0..22u8) {
            21 => BULL,
            v => v,
        };
        let multiplier = match (value, self.inner.gen_range(0..3u8)) {
            (0, _) => Multiplier::Single,
            (BULL, 2) => Multiplier::Double,
            (_, 1) => Multiplier::Double,
            (_, 2) => Multiplier::Triple,
            _ => Multiplier::Single,
        };
        Dart::new(value, multiplier).unwrap_or(Dart::MISS)
    }

    /// Throw at a target. Misses land in the same segment's single bed, a
    /// neighbouring segment, or off the board.
    pub fn throw_at(&mut self, target: Dart) -> Dart {
        if self.inner.gen_bool(self.accuracy) {
            return target;
        }
        let roll: f64 = self.inner.gen();
        if roll < 0.1 {
            return Dart::MISS;
        }
        if target.value() == BULL || target.value() == 0 {
            return if roll < 0.5 {
                Dart::single(BULL).unwrap_or(Dart::MISS)
            } else {
                Dart::single(BOARD[self.inner.gen_range(0..BOARD.len())]).unwrap_or(Dart::MISS)
            };
        }
        if roll < 0.6 {
            return Dart::single(target.value()).unwrap_or(Dart::MISS);
        }
        let seat = BOARD.iter().position(|&v| v == target.value()).unwrap_or(0);
        let step = if self.inner.gen_bool(0.5) { 1 } else { BOARD.len() - 1 };
        let neighbour = BOARD[(seat + step) % BOARD.len()];
        Dart::new(neighbour, target.multiplier()).unwrap_or(Dart::MISS)
    }

    /// Throw up to three darts from `remaining`, stopping early on a bust or
    /// on reaching zero.
    pub fn throw_turn(
        &mut self,
        remaining: u32,
        settings: &GameSettings,
        opening: bool,
    ) -> TurnDarts {
        let mut darts = TurnDarts::new();
        while darts.len() < DARTS_PER_TURN {
            let left = remaining.saturating_sub(turn_score(&darts));
            let needs_double =
                opening && settings.double_in && !darts.iter().any(|d| d.is_double());
            let aim = if needs_double {
                Dart::double(20).unwrap_or(Dart::MISS)
            } else {
                aim_for(left, settings)
            };
            darts.push(self.throw_at(aim));
            let total = turn_score(&darts);
            if total >= remaining {
                break;
            }
        }
        darts
    }

    /// Current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> ThrowSimulatorState {
        ThrowSimulatorState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
            accuracy: self.accuracy,
        }
    }

    #[must_use]
    pub fn from_state(state: &ThrowSimulatorState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
            accuracy: state.accuracy,
        }
    }
}

/// Serializable simulator state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrowSimulatorState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
    pub fork_counter: u64,
    pub accuracy: f64,
}

/// Where a sensible player aims with `remaining` points left.
///
/// A double of half the remaining when that is a checkout, the bull for 50,
/// otherwise a setup shot or treble 20.
#[must_use]
pub fn aim_for(remaining: u32, settings: &GameSettings) -> Dart {
    let single = |v: u32| Dart::single(v as u8).unwrap_or(Dart::MISS);
    let double = |v: u32| Dart::double(v as u8).unwrap_or(Dart::MISS);
    let triple = |v: u32| Dart::triple(v as u8).unwrap_or(Dart::MISS);
    if !settings.double_out {
        return match remaining {
            0 => Dart::MISS,
            1..=20 | 25 => single(remaining),
            50 => Dart::double(BULL).unwrap_or(Dart::MISS),
            21..=60 if remaining % 3 == 0 => triple(remaining / 3),
            21..=40 if remaining % 2 == 0 => double(remaining / 2),
            _ => Dart::triple(20).unwrap_or(Dart::MISS),
        };
    }
    match remaining {
        50 => Dart::double(BULL).unwrap_or(Dart::MISS),
        2..=40 if remaining % 2 == 0 => Dart::double((remaining / 2) as u8).unwrap_or(Dart::MISS),
        // Odd: leave an even number.
        3..=39 => single(if remaining > 20 { remaining - 20 } else { 1 }),
        41..=60 => single(remaining - 40),
        _ => Dart::triple(20).unwrap_or(Dart::MISS),
    }
}

/// Outcome of a simulated match.
#[derive(Clone, Debug)]
pub struct SimulatedMatch {
    pub players: Vec<Player>,
    pub leg: LegState,
    /// `None` if the attempt limit ran out first.
    pub result: Option<MatchResult>,
    pub turns: u32,
    /// Turns the rules refused (failed double-in or double-out); the player
    /// throws again.
    pub rethrows: u32,
}

/// Play a match with one forked simulator per seat.
///
/// Stops when the match is decided or after `max_attempts` thrown turns.
pub fn simulate_match(
    mut players: Vec<Player>,
    settings: &GameSettings,
    seed: u64,
    max_attempts: u32,
) -> SimulatedMatch {
    let mut root = ThrowSimulator::new(seed);
    let mut throwers: Vec<ThrowSimulator> = players.iter().map(|_| root.fork()).collect();
    let mut leg = LegState::new(&players);
    let mut result = None;
    let mut turns = 0;
    let mut rethrows = 0;

    for _ in 0..max_attempts {
        let seat = leg.current_player_index;
        let Some(player) = leg.current_player(&players) else {
            break;
        };
        let darts = throwers[seat].throw_turn(player.score, settings, player.is_first_turn());

        match commit_turn(&leg, &players, &darts, settings) {
            Ok(t) => {
                turns += 1;
                leg = t.leg;
                players = t.players;
                if let Some(done) = t.effects.match_result() {
                    result = Some(done.clone());
                    break;
                }
            }
            Err(_) => rethrows += 1,
        }
    }

    debug!("Simulated match: {} turns, {} rethrows", turns, rethrows);
    SimulatedMatch {
        players,
        leg,
        result,
        turns,
        rethrows,
    }
}
