//! Optional user configuration, read from a JSON file.

use crate::error::CtrlError;
use crate::poll::PollPolicy;
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Tuning knobs, every field optional in the file
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay between status checks while waiting for a player
    pub poll_interval_ms: u64,
    /// Maximum number of status checks per command
    pub poll_attempts: u32,
    /// Titles longer than this many characters are cut
    pub title_max_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        let policy = PollPolicy::default();
        Self {
            poll_interval_ms: policy.interval.as_millis() as u64,
            poll_attempts: policy.attempts,
            title_max_chars: 40,
        }
    }
}

impl Config {
    /// Load from config file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, CtrlError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CtrlError::ReadConfig {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| CtrlError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicitly requested file must load cleanly; problems with the
    /// default location only fall back to defaults.
    pub fn resolve(explicit: Option<&Path>, default: Option<&Path>) -> Result<Self, CtrlError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default {
            Some(path) => Self::load(path).or_else(|e| {
                warn!("Ignoring config: {}", e.report());
                Ok(Self::default())
            }),
            None => Ok(Self::default()),
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            attempts: self.poll_attempts,
        }
    }
}
