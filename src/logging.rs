//! Logger setup for binaries
//!
//! The library itself only talks to the `log` facade. Binaries call
//! [`init_logging`] once at startup.

use std::io::Write;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Pick the log level: explicit argument, else `RUST_LOG`, else `info`
///
/// Unparseable values are skipped, not reported.
pub fn resolve_level(level: Option<&str>, env_value: Option<&str>) -> LevelFilter {
    level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| env_value.and_then(|v| v.parse::<LevelFilter>().ok()))
        .unwrap_or(LevelFilter::Info)
}

/// Install a timestamped stderr logger
///
/// Stdout stays reserved for command output. Calling this twice leaves the
/// first logger in place.
///
/// # Example
///
/// ```rust
/// use crossflow_rs::logging::init_logging;
///
/// init_logging(Some("debug"));
/// ```
pub fn init_logging(level: Option<&str>) {
    let env_value = std::env::var("RUST_LOG").ok();
    let log_level = resolve_level(level, env_value.as_deref());

    let installed = Builder::new()
        .filter_level(log_level)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

    if installed.is_ok() {
        log::debug!("Logging initialised (level: {})", log_level.to_string().to_uppercase());
    }
}
