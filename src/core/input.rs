//! Sequential dart entry for the active turn.
//!
//! Darts are entered slot by slot. Slot `i` only accepts input once slots
//! `0..i` hold a value, so the entered darts are always a prefix of the
//! three slots. Invalid input is refused without touching the buffer.

use serde::{Deserialize, Serialize};

use super::dart::{parse_face, turn_score, Dart, Multiplier, TurnDarts, DARTS_PER_TURN};
use super::player::Player;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Slot {
    value: Option<u8>,
    multiplier: Multiplier,
}

/// Input buffer for one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInput {
    slots: [Slot; DARTS_PER_TURN],
}

impl TurnInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from already-validated darts.
    pub fn from_darts(darts: &[Dart]) -> Result<Self> {
        let mut input = Self::new();
        for (slot, dart) in darts.iter().enumerate() {
            input.set_dart(slot, *dart)?;
        }
        Ok(input)
    }

    /// Number of darts entered.
    #[must_use]
    pub fn thrown(&self) -> usize {
        self.slots.iter().take_while(|s| s.value.is_some()).count()
    }

    /// Whether a slot currently accepts input.
    #[must_use]
    pub fn is_enabled(&self, slot: usize) -> bool {
        slot < DARTS_PER_TURN && slot <= self.thrown()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thrown() == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.thrown() == DARTS_PER_TURN
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot >= DARTS_PER_TURN {
            return Err(Error::SlotOutOfRange(slot));
        }
        if !self.is_enabled(slot) {
            return Err(Error::SlotLocked(slot));
        }
        Ok(())
    }

    /// Enter a face value from raw text.
    ///
    /// An empty string clears the slot and every slot after it.
    pub fn set_value(&mut self, slot: usize, raw: &str) -> Result<()> {
        let raw = raw.trim();
        if raw.is_empty() {
            if slot >= DARTS_PER_TURN {
                return Err(Error::SlotOutOfRange(slot));
            }
            self.clear_from(slot);
            return Ok(());
        }
        let value = parse_face(raw)?;
        self.check_slot(slot)?;
        self.slots[slot].value = Some(value);
        Ok(())
    }

    /// Enter a multiplier from raw text ("1", "2" or "3").
    pub fn set_multiplier(&mut self, slot: usize, raw: &str) -> Result<()> {
        let multiplier = Multiplier::parse(raw)?;
        self.check_slot(slot)?;
        self.slots[slot].multiplier = multiplier;
        Ok(())
    }

    /// Enter a complete dart.
    pub fn set_dart(&mut self, slot: usize, dart: Dart) -> Result<()> {
        self.check_slot(slot)?;
        self.slots[slot] = Slot {
            value: Some(dart.value()),
            multiplier: dart.multiplier(),
        };
        Ok(())
    }

    fn clear_from(&mut self, slot: usize) {
        for s in &mut self.slots[slot..] {
            *s = Slot::default();
        }
    }

    pub fn reset(&mut self) {
        self.clear_from(0);
    }

    /// The darts entered so far, in order.
    #[must_use]
    pub fn darts(&self) -> TurnDarts {
        self.slots
            .iter()
            .map_while(|s| {
                s.value
                    .and_then(|v| Dart::new(v, s.multiplier).ok())
            })
            .collect()
    }

    /// Running score of the entered darts.
    #[must_use]
    pub fn turn_score(&self) -> u32 {
        turn_score(&self.darts())
    }

    /// What the player would have left if this turn stood.
    #[must_use]
    pub fn pending_remaining(&self, player: &Player) -> i64 {
        i64::from(player.score) - i64::from(self.turn_score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_first_slot_enabled_initially() {
        let input = TurnInput::new();
        assert!(input.is_enabled(0));
        assert!(!input.is_enabled(1));
        assert!(!input.is_enabled(2));
        assert!(input.is_empty());
    }

    #[test]
    fn test_sequential_entry() {
        let mut input = TurnInput::new();
        assert!(matches!(input.set_value(1, "20"), Err(Error::SlotLocked(1))));

        input.set_value(0, "20").unwrap();
        assert!(input.is_enabled(1));
        input.set_multiplier(0, "3").unwrap();
        input.set_value(1, "19").unwrap();
        input.set_value(2, "25").unwrap();

        assert!(input.is_full());
        assert_eq!(input.turn_score(), 60 + 19 + 25);
    }

    #[test]
    fn test_invalid_input_leaves_buffer_untouched() {
        let mut input = TurnInput::new();
        input.set_value(0, "20").unwrap();
        let before = input.clone();

        assert!(matches!(input.set_value(1, "21"), Err(Error::InvalidDartValue(_))));
        assert!(matches!(input.set_value(1, "abc"), Err(Error::InvalidDartValue(_))));
        assert!(matches!(input.set_multiplier(0, "4"), Err(Error::InvalidMultiplier(_))));
        assert!(matches!(input.set_value(5, "1"), Err(Error::SlotOutOfRange(5))));
        assert_eq!(input, before);
    }

    #[test]
    fn test_clearing_slot_clears_later_slots() {
        let mut input = TurnInput::new();
        input.set_value(0, "1").unwrap();
        input.set_value(1, "2").unwrap();
        input.set_value(2, "3").unwrap();

        input.set_value(1, "").unwrap();
        assert_eq!(input.thrown(), 1);
        assert!(!input.is_enabled(2));
        assert_eq!(input.turn_score(), 1);
    }

    #[test]
    fn test_multiplier_on_locked_slot() {
        let mut input = TurnInput::new();
        assert!(matches!(input.set_multiplier(2, "2"), Err(Error::SlotLocked(2))));
    }

    #[test]
    fn test_pending_remaining() {
        let player = Player::new("1", "Alice", 10);
        let input = TurnInput::from_darts(&[Dart::single(20).unwrap()]).unwrap();
        assert_eq!(input.pending_remaining(&player), -10);
    }

    #[test]
    fn test_reset() {
        let mut input = TurnInput::from_darts(&[Dart::double(20).unwrap()]).unwrap();
        input.reset();
        assert!(input.is_empty());
        assert!(input.darts().is_empty());
    }
}
