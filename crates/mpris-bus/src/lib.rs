//! mpris-bus - Pure zbus MPRIS client library
//!
//! Features:
//! - Player discovery on the session bus
//! - One flat `RemotePlayer` contract covering the root and player interfaces
//! - Uncached property reads, so callers always see the player's latest state

pub mod client;
pub mod error;
pub mod player;
pub mod types;

pub use client::{BusPlayer, SessionDirectory};
pub use error::BusError;
pub use player::{PlayerDirectory, RemotePlayer};
pub use types::{Metadata, PlaybackStatus};
