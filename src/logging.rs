//! Logging setup
//!
//! Library code logs through the `log` macros; the binary installs
//! `env_logger` here. `-v` flags take precedence over `RUST_LOG`, and
//! the default level is `warn`.

use log::LevelFilter;

/// Environment variable holding `env_logger` filter directives
pub const LOG_ENV: &str = "RUST_LOG";

/// Map the number of `-v` flags to a level
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize the global logger; later calls are ignored
pub fn init(verbose: u8) {
    let mut builder = env_logger::Builder::new();

    match std::env::var(LOG_ENV) {
        Ok(filters) if verbose == 0 && !filters.trim().is_empty() => {
            builder.parse_filters(&filters);
        }
        _ => {
            builder.filter_level(level_for_verbosity(verbose));
        }
    }

    let initialized = builder
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .is_ok();

    if initialized {
        log::debug!("Logging initialized (verbosity {})", verbose);
    }
}

/// Turn logging off, returning the previous level for [`restore`]
///
/// Used while the TUI owns the terminal so log lines do not corrupt the screen.
pub fn silence() -> LevelFilter {
    let previous = log::max_level();
    log::set_max_level(LevelFilter::Off);
    previous
}

pub fn restore(level: LevelFilter) {
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn test_silence_and_restore() {
        let previous = silence();
        assert_eq!(log::max_level(), LevelFilter::Off);
        restore(previous);
        assert_eq!(log::max_level(), previous);
    }
}
