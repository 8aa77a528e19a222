//! Side effects of committed turns.
//!
//! - `Effect`: save a snapshot, report a finished leg, close a match
//! - `EffectBatch`: ordered effects from one transition
//! - `EffectResolver`: carries a batch out against a `GameStore`
//!
//! Transitions stay pure; storage is only touched when a batch is resolved.

mod effect;
mod resolver;

pub use effect::{Effect, EffectBatch};
pub use resolver::{EffectResolver, ResolveResult};
