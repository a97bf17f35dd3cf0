//! Commands accepted on the command line

use std::fmt;

/// What the user asked for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    PlayPause,
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    Raise,
    NextPlayer,
    PrevPlayer,
    /// Anything else, including no argument: just print the status
    Show,
}

impl Command {
    /// Exact, case-sensitive match. Unknown input means `Show`.
    pub fn parse(arg: Option<&str>) -> Self {
        match arg.unwrap_or_default() {
            "play-pause" => Command::PlayPause,
            "play" => Command::Play,
            "pause" => Command::Pause,
            "stop" => Command::Stop,
            "next" => Command::Next,
            "previous" => Command::Previous,
            "raise" => Command::Raise,
            "next-player" => Command::NextPlayer,
            "prev-player" => Command::PrevPlayer,
            _ => Command::Show,
        }
    }

    /// Offset applied to the stored index, for the player cycling commands
    pub fn cycle_step(&self) -> Option<i64> {
        match self {
            Command::NextPlayer => Some(1),
            Command::PrevPlayer => Some(-1),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::PlayPause => "play-pause",
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::Next => "next",
            Command::Previous => "previous",
            Command::Raise => "raise",
            Command::NextPlayer => "next-player",
            Command::PrevPlayer => "prev-player",
            Command::Show => "show",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
