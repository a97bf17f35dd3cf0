//! The player contract the controller is written against.
//!
//! `RemotePlayer` merges the MPRIS root interface (identity, raise) and the
//! player interface (status, metadata, transport) into one trait. Every
//! command is fire-and-forget: `Ok(())` means the player received the call,
//! not that its state has changed yet.

use crate::error::BusError;
use crate::types::{Metadata, PlaybackStatus};

#[allow(async_fn_in_trait)]
pub trait RemotePlayer {
    /// Full bus name, e.g. "org.mpris.MediaPlayer2.spotify"
    fn bus_name(&self) -> &str;

    async fn identity(&self) -> Result<String, BusError>;
    async fn playback_status(&self) -> Result<PlaybackStatus, BusError>;
    async fn metadata(&self) -> Result<Metadata, BusError>;

    async fn play(&self) -> Result<(), BusError>;
    async fn pause(&self) -> Result<(), BusError>;
    async fn play_pause(&self) -> Result<(), BusError>;
    async fn stop(&self) -> Result<(), BusError>;
    async fn next(&self) -> Result<(), BusError>;
    async fn previous(&self) -> Result<(), BusError>;
    async fn raise(&self) -> Result<(), BusError>;
}

/// Enumerates the players currently on the bus.
///
/// The order is whatever the bus reports; it is stable within one call but
/// not across calls.
#[allow(async_fn_in_trait)]
pub trait PlayerDirectory {
    type Player: RemotePlayer;

    async fn list(&self) -> Result<Vec<Self::Player>, BusError>;
}
