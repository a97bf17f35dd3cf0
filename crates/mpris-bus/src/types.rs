//! Core types for mpris-bus

use crate::error::BusError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Metadata key holding the track title
pub const TITLE_KEY: &str = "xesam:title";

/// Playback status from MPRIS player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
}

impl PlaybackStatus {
    /// The value as it appears on the bus
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
            PlaybackStatus::Stopped => "Stopped",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackStatus::Playing)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, PlaybackStatus::Stopped)
    }
}

impl FromStr for PlaybackStatus {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Playing" => Ok(PlaybackStatus::Playing),
            "Paused" => Ok(PlaybackStatus::Paused),
            "Stopped" => Ok(PlaybackStatus::Stopped),
            other => Err(BusError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Track metadata flattened to strings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: HashMap<String, String>,
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Track title, if the player reported one
    pub fn title(&self) -> Option<&str> {
        self.get(TITLE_KEY)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
