//! Darts and multipliers.
//!
//! ## Dart
//!
//! A single thrown dart: a face value (`0..=20` or `25` for the bull) and a
//! `Multiplier`. `0` is a miss. Construction validates both parts, so a
//! `Dart` in hand is always legal.
//!
//! ## TurnDarts
//!
//! Up to three darts for one turn, stored inline via `SmallVec`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Number of darts in one turn.
pub const DARTS_PER_TURN: usize = 3;

/// Face value of the bull.
pub const BULL: u8 = 25;

/// Darts thrown (or recorded) in a single turn.
pub type TurnDarts = SmallVec<[Dart; DARTS_PER_TURN]>;

/// Single, double or triple ring.
///
/// Serializes as the integers `1`, `2`, `3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Multiplier {
    #[default]
    Single,
    Double,
    Triple,
}

impl Multiplier {
    /// Numeric factor (1, 2 or 3).
    #[must_use]
    pub const fn factor(self) -> u8 {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Triple => 3,
        }
    }

    /// Parse raw user input ("1", "2" or "3").
    pub fn parse(raw: &str) -> Result<Self> {
        raw.trim()
            .parse::<u8>()
            .ok()
            .and_then(|m| Self::try_from(m).ok())
            .ok_or_else(|| Error::InvalidMultiplier(raw.to_string()))
    }
}

impl TryFrom<u8> for Multiplier {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Multiplier::Single),
            2 => Ok(Multiplier::Double),
            3 => Ok(Multiplier::Triple),
            other => Err(Error::InvalidMultiplier(other.to_string())),
        }
    }
}

impl From<Multiplier> for u8 {
    fn from(m: Multiplier) -> u8 {
        m.factor()
    }
}

/// A validated dart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDart", into = "RawDart")]
pub struct Dart {
    value: u8,
    multiplier: Multiplier,
}

impl Dart {
    /// A missed dart, also used to pad short turns.
    pub const MISS: Dart = Dart {
        value: 0,
        multiplier: Multiplier::Single,
    };

    /// Create a dart, validating the face value.
    ///
    /// ```
    /// use darts_engine::core::{Dart, Multiplier};
    ///
    /// let d = Dart::new(20, Multiplier::Triple).unwrap();
    /// assert_eq!(d.points(), 60);
    /// assert!(Dart::new(21, Multiplier::Single).is_err());
    /// ```
    pub fn new(value: u8, multiplier: Multiplier) -> Result<Self> {
        if !is_valid_face(value) {
            return Err(Error::InvalidDartValue(value.to_string()));
        }
        Ok(Self { value, multiplier })
    }

    #[must_use]
    pub fn single(value: u8) -> Option<Self> {
        Self::new(value, Multiplier::Single).ok()
    }

    #[must_use]
    pub fn double(value: u8) -> Option<Self> {
        Self::new(value, Multiplier::Double).ok()
    }

    #[must_use]
    pub fn triple(value: u8) -> Option<Self> {
        Self::new(value, Multiplier::Triple).ok()
    }

    /// Face value (0-20 or 25).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }

    #[must_use]
    pub const fn multiplier(self) -> Multiplier {
        self.multiplier
    }

    /// Points scored: value × multiplier.
    #[must_use]
    pub const fn points(self) -> u32 {
        self.value as u32 * self.multiplier.factor() as u32
    }

    #[must_use]
    pub const fn is_double(self) -> bool {
        matches!(self.multiplier, Multiplier::Double)
    }

    /// Nonzero face value.
    #[must_use]
    pub const fn is_scoring(self) -> bool {
        self.value > 0
    }
}

impl std::fmt::Display for Dart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.multiplier {
            Multiplier::Single => write!(f, "{}", self.value),
            m => write!(f, "{}x{}", self.value, m.factor()),
        }
    }
}

/// Wire shape of a dart: `{"value": 20, "multiplier": 2}`.
#[derive(Serialize, Deserialize)]
struct RawDart {
    value: u8,
    multiplier: u8,
}

impl TryFrom<RawDart> for Dart {
    type Error = Error;

    fn try_from(raw: RawDart) -> Result<Self> {
        Dart::new(raw.value, Multiplier::try_from(raw.multiplier)?)
    }
}

impl From<Dart> for RawDart {
    fn from(d: Dart) -> Self {
        RawDart {
            value: d.value,
            multiplier: d.multiplier.factor(),
        }
    }
}

/// Check a face value: 0-20 or the bull.
#[must_use]
pub const fn is_valid_face(value: u8) -> bool {
    value <= 20 || value == BULL
}

/// Parse raw face-value input: digits only, at most 20 or exactly 25.
pub fn parse_face(raw: &str) -> Result<u8> {
    let invalid = || Error::InvalidDartValue(raw.to_string());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: u32 = raw.parse().map_err(|_| invalid())?;
    match u8::try_from(value) {
        Ok(v) if is_valid_face(v) => Ok(v),
        _ => Err(invalid()),
    }
}

/// Sum of points over a set of darts.
#[must_use]
pub fn turn_score(darts: &[Dart]) -> u32 {
    darts.iter().map(|d| d.points()).sum()
}

/// The last dart with a nonzero face value.
#[must_use]
pub fn last_scoring_dart(darts: &[Dart]) -> Option<Dart> {
    darts.iter().rev().copied().find(|d| d.is_scoring())
}

/// Pad a turn with misses up to three darts.
#[must_use]
pub fn padded(darts: &[Dart]) -> TurnDarts {
    let mut out: TurnDarts = darts.iter().copied().take(DARTS_PER_TURN).collect();
    while out.len() < DARTS_PER_TURN {
        out.push(Dart::MISS);
    }
    out
}
