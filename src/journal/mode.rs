use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::JournalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    #[default]
    Off,
    Record,
    Playback,
}

impl JournalMode {
    pub fn level(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Record => 1,
            Self::Playback => 2,
        }
    }
}

impl TryFrom<i64> for JournalMode {
    type Error = JournalError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Off),
            1 => Ok(Self::Record),
            2 => Ok(Self::Playback),
            _ => Err(JournalError::InvalidMode(level.to_string())),
        }
    }
}

impl FromStr for JournalMode {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "off" => Ok(Self::Off),
            "1" | "record" => Ok(Self::Record),
            "2" | "playback" | "play" => Ok(Self::Playback),
            other => Err(JournalError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for JournalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::Record => "record",
            Self::Playback => "playback",
        })
    }
}
