//! MPRIS client implementation
//!
//! One session connection, one pair of proxies per player:
//! - Property caching is disabled, every read is a fresh round trip
//! - Commands are plain method calls, completion is never awaited

use crate::error::BusError;
use crate::player::{PlayerDirectory, RemotePlayer};
use crate::types::{Metadata, PlaybackStatus};
use log::debug;
use std::collections::HashMap;
use std::ops::Deref;
use zbus::Connection;
use zbus::proxy::CacheProperties;
use zbus::zvariant::{OwnedValue, Value};

const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// D-Bus proxy for MPRIS player interface
#[zbus::proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait MprisPlayer {
    // Methods
    fn play(&self) -> zbus::Result<()>;
    fn pause(&self) -> zbus::Result<()>;
    fn play_pause(&self) -> zbus::Result<()>;
    fn stop(&self) -> zbus::Result<()>;
    fn next(&self) -> zbus::Result<()>;
    fn previous(&self) -> zbus::Result<()>;

    // Properties
    #[zbus(property)]
    fn metadata(&self) -> zbus::Result<HashMap<String, OwnedValue>>;

    #[zbus(property)]
    fn playback_status(&self) -> zbus::Result<String>;
}

/// D-Bus proxy for MPRIS root interface
#[zbus::proxy(
    interface = "org.mpris.MediaPlayer2",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait MprisRoot {
    fn raise(&self) -> zbus::Result<()>;

    #[zbus(property)]
    fn identity(&self) -> zbus::Result<String>;
}

/// Lists MPRIS players on the session bus
pub struct SessionDirectory {
    connection: Connection,
}

impl SessionDirectory {
    /// Connect to the session bus.
    pub async fn connect() -> Result<Self, BusError> {
        let connection = Connection::session().await?;
        Ok(Self::new(connection))
    }

    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

impl PlayerDirectory for SessionDirectory {
    type Player = BusPlayer;

    async fn list(&self) -> Result<Vec<BusPlayer>, BusError> {
        let dbus_proxy = zbus::fdo::DBusProxy::new(&self.connection).await?;
        let names = dbus_proxy.list_names().await?;

        let mut players = Vec::new();
        for name in names.iter().filter(|n| n.as_str().starts_with(MPRIS_PREFIX)) {
            let built = BusPlayer::new(&self.connection, name.to_string()).await;
            if let Some(player) = skip_unreachable(name.as_str(), built) {
                players.push(player);
            }
        }

        debug!("Found {} MPRIS players on the bus", players.len());
        Ok(players)
    }
}

/// A single player reachable on the bus
pub struct BusPlayer {
    bus_name: String,
    player: MprisPlayerProxy<'static>,
    root: MprisRootProxy<'static>,
}

impl BusPlayer {
    pub async fn new(connection: &Connection, bus_name: String) -> Result<Self, BusError> {
        let player = MprisPlayerProxy::builder(connection)
            .destination(bus_name.clone())?
            .cache_properties(CacheProperties::No)
            .build()
            .await?;
        let root = MprisRootProxy::builder(connection)
            .destination(bus_name.clone())?
            .cache_properties(CacheProperties::No)
            .build()
            .await?;

        Ok(Self {
            bus_name,
            player,
            root,
        })
    }

    /// Short name extracted from the bus name
    /// "org.mpris.MediaPlayer2.spotify" -> "spotify"
    /// "org.mpris.MediaPlayer2.firefox.instance_1_234" -> "firefox"
    pub fn short_name(&self) -> &str {
        extract_short_name(&self.bus_name)
    }
}

impl RemotePlayer for BusPlayer {
    fn bus_name(&self) -> &str {
        &self.bus_name
    }

    async fn identity(&self) -> Result<String, BusError> {
        Ok(self.root.identity().await?)
    }

    async fn playback_status(&self) -> Result<PlaybackStatus, BusError> {
        self.player.playback_status().await?.parse()
    }

    async fn metadata(&self) -> Result<Metadata, BusError> {
        let raw = self.player.metadata().await?;
        Ok(flatten_metadata(&raw))
    }

    async fn play(&self) -> Result<(), BusError> {
        debug!("Sending Play to {}", self.short_name());
        Ok(self.player.play().await?)
    }

    async fn pause(&self) -> Result<(), BusError> {
        debug!("Sending Pause to {}", self.short_name());
        Ok(self.player.pause().await?)
    }

    async fn play_pause(&self) -> Result<(), BusError> {
        debug!("Sending PlayPause to {}", self.short_name());
        Ok(self.player.play_pause().await?)
    }

    async fn stop(&self) -> Result<(), BusError> {
        debug!("Sending Stop to {}", self.short_name());
        Ok(self.player.stop().await?)
    }

    async fn next(&self) -> Result<(), BusError> {
        debug!("Sending Next to {}", self.short_name());
        Ok(self.player.next().await?)
    }

    async fn previous(&self) -> Result<(), BusError> {
        debug!("Sending Previous to {}", self.short_name());
        Ok(self.player.previous().await?)
    }

    async fn raise(&self) -> Result<(), BusError> {
        debug!("Sending Raise to {}", self.short_name());
        Ok(self.root.raise().await?)
    }
}

/// One player that cannot be reached must not hide the others
fn skip_unreachable<T>(bus_name: &str, built: Result<T, BusError>) -> Option<T> {
    match built {
        Ok(player) => Some(player),
        Err(e) => {
            debug!("Skipping {}: {}", bus_name, e);
            None
        }
    }
}

fn extract_short_name(bus_name: &str) -> &str {
    let rest = bus_name.strip_prefix(MPRIS_PREFIX).unwrap_or(bus_name);
    rest.split('.').next().unwrap_or(rest)
}

// ============ Metadata flattening helpers ============

fn flatten_metadata(map: &HashMap<String, OwnedValue>) -> Metadata {
    map.iter()
        .filter_map(|(key, value)| value_to_string(value.deref()).map(|v| (key.as_str(), v)))
        .collect()
}

fn value_to_string(value: &Value<'_>) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.to_string()),
        Value::ObjectPath(p) => Some(p.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::U8(u) => Some(u.to_string()),
        Value::I16(i) => Some(i.to_string()),
        Value::U16(u) => Some(u.to_string()),
        Value::I32(i) => Some(i.to_string()),
        Value::U32(u) => Some(u.to_string()),
        Value::I64(i) => Some(i.to_string()),
        Value::U64(u) => Some(u.to_string()),
        Value::F64(f) => Some(f.to_string()),
        Value::Value(inner) => value_to_string(inner),
        Value::Array(arr) => {
            let strings: Vec<String> = arr.iter().filter_map(value_to_string).collect();
            if strings.is_empty() {
                None
            } else {
                Some(strings.join(", "))
            }
        }
        _ => None,
    }
}
