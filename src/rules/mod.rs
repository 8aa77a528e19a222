//! The darts scoring engine.
//!
//! - `checks`: double-in, bust, checkout and double-out
//! - `engine`: `commit_turn`, the pure turn transition
//! - `resume`: rebuilding the turn position from persisted history

mod checks;
mod engine;
mod resume;

pub use checks::{check_opening, is_legal_finish, judge, Rejection, Verdict};
pub use engine::{commit_turn, restart_leg, Transition, TurnOutcome};
pub use resume::resume_leg;
