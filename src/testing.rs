//! In-memory players and index cell for unit tests.

use crate::error::CtrlError;
use crate::poll::PollPolicy;
use crate::store::IndexCell;
use mpris_bus::{BusError, Metadata, PlaybackStatus, PlayerDirectory, RemotePlayer};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn fast_policy() -> PollPolicy {
    PollPolicy {
        interval: Duration::from_millis(1),
        attempts: 20,
    }
}

#[derive(Debug, Default)]
struct FakeState {
    status: Option<PlaybackStatus>,
    title: String,
    /// Status a command will switch to, and how many reads until it does
    pending: Option<(PlaybackStatus, u32)>,
    lag: u32,
    unresponsive: bool,
    failing_commands: bool,
    broken: bool,
    calls: Vec<&'static str>,
}

/// A player that applies commands after a configurable number of status reads
#[derive(Clone, Debug)]
pub struct FakePlayer {
    name: String,
    state: Arc<Mutex<FakeState>>,
}

impl FakePlayer {
    pub fn new(short_name: &str, status: PlaybackStatus, title: &str) -> Self {
        let state = FakeState {
            status: Some(status),
            title: title.to_string(),
            ..Default::default()
        };
        Self {
            name: format!("org.mpris.MediaPlayer2.{short_name}"),
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Commands take effect only after `reads` further status reads
    pub fn with_lag(self, reads: u32) -> Self {
        self.state.lock().unwrap().lag = reads;
        self
    }

    /// Commands are acknowledged but never applied
    pub fn unresponsive(self) -> Self {
        self.state.lock().unwrap().unresponsive = true;
        self
    }

    /// Every command call returns an error
    pub fn failing_commands(self) -> Self {
        self.state.lock().unwrap().failing_commands = true;
        self
    }

    /// Every property read returns an error
    pub fn broken(self) -> Self {
        self.state.lock().unwrap().broken = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Current status, ignoring anything still pending
    pub fn status(&self) -> Option<PlaybackStatus> {
        self.state.lock().unwrap().status
    }

    fn command(
        &self,
        name: &'static str,
        effect: impl FnOnce(Option<PlaybackStatus>) -> Option<PlaybackStatus>,
    ) -> Result<(), BusError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(name);
        if state.failing_commands {
            return Err(BusError::UnknownStatus(format!("{name} rejected")));
        }
        if !state.unresponsive {
            if let Some(next) = effect(state.status) {
                state.pending = Some((next, state.lag));
            }
        }
        Ok(())
    }
}

impl RemotePlayer for FakePlayer {
    fn bus_name(&self) -> &str {
        &self.name
    }

    async fn identity(&self) -> Result<String, BusError> {
        Ok(self.name.clone())
    }

    async fn playback_status(&self) -> Result<PlaybackStatus, BusError> {
        let mut state = self.state.lock().unwrap();
        let pending = state.pending;
        match pending {
            Some((next, 0)) => {
                state.status = Some(next);
                state.pending = None;
            }
            Some((next, reads)) => state.pending = Some((next, reads - 1)),
            None => {}
        }
        if state.broken {
            return Err(BusError::UnknownStatus(String::new()));
        }
        state
            .status
            .ok_or_else(|| BusError::UnknownStatus(String::new()))
    }

    async fn metadata(&self) -> Result<Metadata, BusError> {
        let state = self.state.lock().unwrap();
        if state.broken {
            return Err(BusError::UnknownStatus(String::new()));
        }
        Ok([(mpris_bus::types::TITLE_KEY, state.title.clone())]
            .into_iter()
            .collect())
    }

    async fn play(&self) -> Result<(), BusError> {
        self.command("play", |_| Some(PlaybackStatus::Playing))
    }

    async fn pause(&self) -> Result<(), BusError> {
        self.command("pause", |status| match status {
            Some(PlaybackStatus::Playing) => Some(PlaybackStatus::Paused),
            _ => None,
        })
    }

    async fn play_pause(&self) -> Result<(), BusError> {
        self.command("play_pause", |status| match status {
            Some(PlaybackStatus::Playing) => Some(PlaybackStatus::Paused),
            _ => Some(PlaybackStatus::Playing),
        })
    }

    async fn stop(&self) -> Result<(), BusError> {
        self.command("stop", |_| Some(PlaybackStatus::Stopped))
    }

    async fn next(&self) -> Result<(), BusError> {
        self.command("next", |_| None)
    }

    async fn previous(&self) -> Result<(), BusError> {
        self.command("previous", |_| None)
    }

    async fn raise(&self) -> Result<(), BusError> {
        self.command("raise", |_| None)
    }
}

/// Hands out clones of a fixed set of players
pub struct FakeDirectory {
    players: Vec<FakePlayer>,
    failing: bool,
}

impl FakeDirectory {
    pub fn new(players: Vec<FakePlayer>) -> Self {
        Self {
            players,
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            players: Vec::new(),
            failing: true,
        }
    }
}

impl PlayerDirectory for FakeDirectory {
    type Player = FakePlayer;

    async fn list(&self) -> Result<Vec<FakePlayer>, BusError> {
        if self.failing {
            return Err(BusError::UnknownStatus("bus went away".to_string()));
        }
        Ok(self.players.clone())
    }
}

/// Index cell that records every write
#[derive(Debug, Default)]
pub struct MemoryCell {
    pub value: i64,
    pub writes: Vec<usize>,
}

impl MemoryCell {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            writes: Vec::new(),
        }
    }
}

impl IndexCell for MemoryCell {
    fn load(&mut self) -> i64 {
        self.value
    }

    fn store(&mut self, index: usize) -> Result<usize, CtrlError> {
        self.value = index as i64;
        self.writes.push(index);
        Ok(index)
    }
}
