//! The one-line status printed after every invocation.

use mpris_bus::PlaybackStatus;
use std::fmt;
use std::io::{self, Write};

const ELLIPSIS: char = '…';

/// What gets printed for the selected player
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    /// `None` when the player would not report its status
    pub status: Option<PlaybackStatus>,
    /// 1-based position and total, only when there is a choice of players
    pub position: Option<(usize, usize)>,
    /// Already truncated, `None` when blank
    pub title: Option<String>,
}

impl DisplayState {
    pub fn new(
        status: Option<PlaybackStatus>,
        index: usize,
        total: usize,
        title: Option<&str>,
        title_max_chars: usize,
    ) -> Self {
        let position = (total > 1).then_some((index + 1, total));
        let title = title
            .filter(|t| !t.trim().is_empty())
            .map(|t| truncate(t, title_max_chars));

        Self {
            status,
            position,
            title,
        }
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => f.write_str(&status.as_str().to_lowercase())?,
            None => f.write_str("unknown")?,
        }
        if let Some((pos, total)) = self.position {
            write!(f, " {pos}/{total}")?;
        }
        if let Some(title) = &self.title {
            write!(f, " ‘{title}’")?;
        }
        Ok(())
    }
}

/// Write the status line. A reader that went away is not an error.
pub fn write_status(out: &mut impl Write, state: &DisplayState) -> io::Result<()> {
    match writeln!(out, "{state}").and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}

/// Cut `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => {
            let mut out = text[..cut].to_string();
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}
