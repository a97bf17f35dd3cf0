//! Error types for mpris-ctrl

use mpris_bus::BusError;
use std::io;
use std::path::PathBuf;

/// Setup and bus failures that abort the invocation
#[derive(Debug, thiserror::Error)]
pub enum CtrlError {
    #[error("get user cache dir: not available on this system")]
    NoCacheDir,

    #[error("create dir {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("create lock {}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write index to {}", path.display())]
    WriteIndex {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read config {}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse config {}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("get session")]
    Connect(#[source] BusError),

    #[error("get players")]
    ListPlayers(#[source] BusError),
}

impl CtrlError {
    /// Render the error and its whole source chain on one line.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = std::error::Error::source(err);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_includes_source_chain() {
        let err = CtrlError::Lock {
            path: PathBuf::from("/tmp/mpris-ctrl/lock"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.report(), "create lock /tmp/mpris-ctrl/lock: denied");
    }

    #[test]
    fn test_report_without_source() {
        assert_eq!(
            CtrlError::NoCacheDir.report(),
            "get user cache dir: not available on this system"
        );
    }
}
