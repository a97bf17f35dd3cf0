//! mpris-ctrl - cycle between MPRIS players and send them transport commands
//!
//! One short-lived process per keypress:
//! - The selected player is a persisted index into the list of active players
//! - The index file doubles as a cross-process lock held for the whole run
//! - Commands wait (bounded) for the player to report the new state

pub mod cli;
pub mod command;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod logging;
pub mod paths;
pub mod poll;
pub mod store;

#[cfg(test)]
mod testing;

pub use cli::Args;
pub use command::Command;
pub use config::Config;
pub use display::DisplayState;
pub use engine::{Controller, normalize};
pub use error::CtrlError;
pub use poll::{PollPolicy, poll_until};
pub use store::{IndexCell, IndexStore};

use log::info;
use mpris_bus::SessionDirectory;
use std::path::PathBuf;

/// Resolve config and state, lock the index, talk to the bus.
/// `Ok(None)` means there is nothing to print.
pub async fn run(args: &Args) -> Result<Option<DisplayState>, CtrlError> {
    let command = Command::parse(args.command.as_deref());
    let config = Config::resolve(args.config.as_deref(), paths::config_path().as_deref())?;
    let index_path = resolve_index_path(args)?;

    // Held until this function returns, on every path
    let mut store = IndexStore::open(&index_path)?;
    info!("Running {} with index file {}", command, store.path().display());

    let directory = SessionDirectory::connect()
        .await
        .map_err(CtrlError::Connect)?;
    let controller = Controller::new(directory, config.poll_policy(), config.title_max_chars);

    controller.run(&mut store, &command).await
}

fn resolve_index_path(args: &Args) -> Result<PathBuf, CtrlError> {
    match &args.state_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                paths::ensure_dir(parent)?;
            }
            Ok(path.clone())
        }
        None => paths::index_path(),
    }
}
