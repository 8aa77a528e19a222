//! Core scoring types: darts, players, turn records, settings, leg state.
//!
//! Everything here is plain data. Rule enforcement lives in `rules`.

pub mod config;
pub mod dart;
pub mod input;
pub mod player;
pub mod state;
pub mod turn;

pub use config::{GameSettings, StartingScore};
pub use dart::{Dart, Multiplier, TurnDarts, DARTS_PER_TURN};
pub use input::TurnInput;
pub use player::{Player, PlayerId};
pub use state::{GamePoints, LegState};
pub use turn::TurnRecord;
