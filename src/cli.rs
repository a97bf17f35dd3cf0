use clap::Parser;
use std::path::PathBuf;

/// Control MPRIS media players from hotkeys and status bars
#[derive(Parser, Debug)]
#[command(name = "mpris-ctrl", version, about)]
pub struct Args {
    /// play-pause, play, pause, stop, next, previous, raise, next-player or
    /// prev-player. Anything else only prints the status line.
    pub command: Option<String>,

    /// Read settings from this file instead of the user config dir
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the selected player index in this file instead of the cache dir
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
