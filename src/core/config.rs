//! Match configuration.
//!
//! `GameSettings` fixes the rules for a whole match: the starting score,
//! the double-in and double-out requirements, and how many legs win it.
//! The JSON shape matches what front ends send when creating a game:
//!
//! ```json
//! {"startingScore": 501, "doubleIn": false, "doubleOut": true, "gamePointThreshold": 1}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Starting score menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum StartingScore {
    S101,
    S301,
    #[default]
    S501,
    S701,
    S1001,
}

impl StartingScore {
    pub const ALL: [StartingScore; 5] = [
        StartingScore::S101,
        StartingScore::S301,
        StartingScore::S501,
        StartingScore::S701,
        StartingScore::S1001,
    ];

    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            StartingScore::S101 => 101,
            StartingScore::S301 => 301,
            StartingScore::S501 => 501,
            StartingScore::S701 => 701,
            StartingScore::S1001 => 1001,
        }
    }
}

impl TryFrom<u32> for StartingScore {
    type Error = Error;

    fn try_from(points: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.points() == points)
            .ok_or(Error::InvalidStartingScore(points))
    }
}

impl From<StartingScore> for u32 {
    fn from(s: StartingScore) -> u32 {
        s.points()
    }
}

impl std::fmt::Display for StartingScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// Rules for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub starting_score: StartingScore,

    /// First turn of a leg must contain a double.
    pub double_in: bool,

    /// Checkout dart must be a double.
    pub double_out: bool,

    /// Leg wins needed to take the match.
    pub game_point_threshold: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            starting_score: StartingScore::S501,
            double_in: false,
            double_out: true,
            game_point_threshold: 1,
        }
    }
}

impl GameSettings {
    #[must_use]
    pub fn with_starting_score(mut self, starting_score: StartingScore) -> Self {
        self.starting_score = starting_score;
        self
    }

    #[must_use]
    pub fn with_double_in(mut self, enabled: bool) -> Self {
        self.double_in = enabled;
        self
    }

    #[must_use]
    pub fn with_double_out(mut self, enabled: bool) -> Self {
        self.double_out = enabled;
        self
    }

    #[must_use]
    pub fn with_game_point_threshold(mut self, threshold: u32) -> Self {
        self.game_point_threshold = threshold;
        self
    }

    /// Starting score in points.
    #[must_use]
    pub fn start(&self) -> u32 {
        self.starting_score.points()
    }

    pub fn validate(&self) -> Result<()> {
        if self.game_point_threshold == 0 {
            return Err(Error::InvalidSettings(
                "gamePointThreshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
