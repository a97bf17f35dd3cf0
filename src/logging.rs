//! stderr logging, so stdout only ever carries the status line.

use log::LevelFilter;

/// Map `-v` occurrences to a level filter
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install env_logger. `RUST_LOG` overrides the verbosity flag.
pub fn init(verbosity: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }
}
