//! Difficulty profiles
//!
//! A profile bundles how much the audio is slowed down, how long the learner
//! gets to repeat each segment and how aggressively speech is cut into
//! segments.

use crate::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "easy" => Ok(Level::Easy),
            "medium" => Ok(Level::Medium),
            "hard" => Ok(Level::Hard),
            other => Err(Error::InvalidProfileName(other.to_string())),
        }
    }
}

/// Parameter bundle for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub level: Level,
    /// Playback rate multiplier, below 1.0 slows the audio down
    pub speed: f64,
    /// Pause length factor applied to each segment's duration
    pub pause: f64,
    /// Soft cap on segment length
    pub preferred_speech_duration_ms: u32,
}

impl Profile {
    /// Resolve a profile from its level name
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProfileName`] for anything other than
    /// `easy`, `medium` or `hard`.
    pub fn resolve(name: &str) -> Result<Self> {
        Ok(Self::for_level(name.parse()?))
    }

    pub fn for_level(level: Level) -> Self {
        let (speed, pause, preferred_speech_duration_ms) = match level {
            Level::Easy => (0.85, 2.0, 3000),
            Level::Medium => (0.95, 1.5, 6000),
            Level::Hard => (1.0, 1.0, 8000),
        };
        Self {
            level,
            speed,
            pause,
            preferred_speech_duration_ms,
        }
    }

    /// Silence needed before a segment is closed; derived from the level alone
    pub fn min_silence_duration_ms(&self) -> u32 {
        match self.level {
            Level::Easy => 25,
            Level::Medium => 50,
            Level::Hard => 100,
        }
    }
}
