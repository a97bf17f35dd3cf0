//! Player selection and state convergence.
//!
//! Every invocation sees a fresh list of active players (anything not
//! Stopped). The stored index is reduced modulo the list length before use,
//! since players come and go between invocations. Transport commands are
//! asynchronous on the player side, so after sending one we poll the player
//! until its status reflects the command, or the poll budget runs out.

use crate::command::Command;
use crate::display::DisplayState;
use crate::error::CtrlError;
use crate::poll::{PollPolicy, poll_until};
use crate::store::IndexCell;
use log::{Level, debug, info, log_enabled, warn};
use mpris_bus::{BusError, PlaybackStatus, PlayerDirectory, RemotePlayer};
use std::future::Future;

/// Floored modulo: the result is always in `0..len`, also for negative
/// indices. An empty list maps everything to 0.
pub fn normalize(index: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as i64) as usize
}

/// Drives one invocation against a player directory
pub struct Controller<D> {
    directory: D,
    policy: PollPolicy,
    title_max_chars: usize,
}

impl<D: PlayerDirectory> Controller<D> {
    pub fn new(directory: D, policy: PollPolicy, title_max_chars: usize) -> Self {
        Self {
            directory,
            policy,
            title_max_chars,
        }
    }

    /// List the players that are not stopped, in bus order.
    /// Players whose status cannot be read are kept.
    pub async fn active_players(&self) -> Result<Vec<D::Player>, CtrlError> {
        let players = self
            .directory
            .list()
            .await
            .map_err(CtrlError::ListPlayers)?;

        let mut active = Vec::with_capacity(players.len());
        for player in players {
            match read_status(&player).await {
                Some(status) if status.is_stopped() => {
                    debug!("Skipping stopped player {}", player.bus_name());
                }
                _ => active.push(player),
            }
        }
        Ok(active)
    }

    /// Query the directory and run `command`.
    pub async fn run(
        &self,
        cell: &mut impl IndexCell,
        command: &Command,
    ) -> Result<Option<DisplayState>, CtrlError> {
        let players = self.active_players().await?;
        self.execute(players, cell, command).await
    }

    /// Select a player from `players`, apply `command` and describe the
    /// result. `None` means there is nothing to show.
    pub async fn execute(
        &self,
        mut players: Vec<D::Player>,
        cell: &mut impl IndexCell,
        command: &Command,
    ) -> Result<Option<DisplayState>, CtrlError> {
        if players.is_empty() {
            debug!("No active players");
            return Ok(None);
        }

        let mut index = normalize(cell.load(), players.len());
        if let Some(step) = command.cycle_step() {
            index = cell.store(normalize(index as i64 + step, players.len()))?;
        }

        let target = &players[index];
        if log_enabled!(Level::Debug) {
            let identity = target.identity().await.unwrap_or_default();
            debug!(
                "Selected {}/{}: {} ({})",
                index + 1,
                players.len(),
                target.bus_name(),
                identity
            );
        }

        self.apply(target, command).await;

        if *command == Command::Stop {
            // The stopped player drops out of the active list
            players = self.active_players().await?;
            if players.is_empty() {
                debug!("No active players left after stop");
                return Ok(None);
            }
            index = normalize(index as i64, players.len());
        }

        Ok(Some(self.describe(&players[index], index, players.len()).await))
    }

    /// Send the transport part of `command`, waiting for convergence where
    /// the command changes playback status.
    async fn apply(&self, target: &D::Player, command: &Command) {
        match command {
            Command::PlayPause => {
                let before = read_status(target).await;
                sent(target, command, target.play_pause().await);
                self.wait(command, move || async move {
                    read_status(target).await != before
                })
                .await;
            }
            Command::Stop => {
                let before = read_status(target).await;
                sent(target, command, target.stop().await);
                self.wait(command, move || async move {
                    let now = read_status(target).await;
                    now != before || now == Some(PlaybackStatus::Stopped)
                })
                .await;
            }
            Command::Play => {
                sent(target, command, target.play().await);
                self.wait(command, move || async move {
                    read_status(target)
                        .await
                        .is_some_and(|status| status.is_playing())
                })
                .await;
            }
            Command::Pause => {
                sent(target, command, target.pause().await);
                self.wait(command, move || async move {
                    read_status(target).await == Some(PlaybackStatus::Paused)
                })
                .await;
            }
            Command::Next => sent(target, command, target.next().await),
            Command::Previous => sent(target, command, target.previous().await),
            Command::Raise => sent(target, command, target.raise().await),
            Command::NextPlayer | Command::PrevPlayer | Command::Show => {}
        }
    }

    async fn wait<F, Fut>(&self, command: &Command, predicate: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        if !poll_until(self.policy, predicate).await {
            info!("Player did not settle after {}, showing current state", command);
        }
    }

    async fn describe(&self, player: &D::Player, index: usize, total: usize) -> DisplayState {
        let status = read_status(player).await;
        let metadata = match player.metadata().await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                debug!("Could not read metadata of {}: {}", player.bus_name(), e);
                None
            }
        };
        let title = metadata.as_ref().and_then(|m| m.title());

        DisplayState::new(status, index, total, title, self.title_max_chars)
    }
}

/// Playback status, or `None` if the player fails to report one
async fn read_status<P: RemotePlayer>(player: &P) -> Option<PlaybackStatus> {
    match player.playback_status().await {
        Ok(status) => Some(status),
        Err(e) => {
            debug!("Could not read status of {}: {}", player.bus_name(), e);
            None
        }
    }
}

fn sent<P: RemotePlayer>(player: &P, command: &Command, result: Result<(), BusError>) {
    match result {
        Ok(()) => info!("Sent {} to {}", command, player.bus_name()),
        Err(e) => warn!("Failed to send {} to {}: {}", command, player.bus_name(), e),
    }
}
