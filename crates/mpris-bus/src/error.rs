//! Error types for mpris-bus

/// MPRIS client errors
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    #[error("D-Bus fdo error: {0}")]
    Fdo(#[from] zbus::fdo::Error),

    #[error("unknown playback status {0:?}")]
    UnknownStatus(String),
}
