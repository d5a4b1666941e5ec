//! Console logging setup for the symbolic engine.
//!
//! The library itself only emits through the `log` facade (failure sites
//! log before returning their error), so it stays silent unless a logger is
//! installed. This module offers a one-call terminal logger for tests,
//! examples and downstream binaries.

use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

/// Installs a terminal logger at the given level.
///
/// Accepted levels: "debug", "info", "warn", "error", "off". Installing a
/// logger twice is not an error: the second call is a no-op, so tests can
/// call this freely.
///
/// # Arguments
/// * `loglevel` - requested level as a string, case-sensitive
pub fn init_console_logger(loglevel: &str) {
    if loglevel == "off" || loglevel == "none" {
        return;
    }
    let log_option = match loglevel {
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => panic!("loglevel must be debug, info, warn, error or off"),
    };
    // a second init returns Err; logging keeps the first configuration
    let _ = CombinedLogger::init(vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
