//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout/stderr while it runs, so it only logs when a
//! log file is given. The replay command falls back to stderr.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

/// Everything this binary logs at info and above; its targets start with the crate name.
const DEFAULT_FILTER: &str = concat!(env!("CARGO_CRATE_NAME"), "=info");

/// Where log output should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    Off,
}

impl<'a> LogTarget<'a> {
    /// Pick a target from the `--log` flag and whether stderr is free to use.
    pub fn choose(log_file: Option<&'a Path>, stderr_available: bool) -> Self {
        match (log_file, stderr_available) {
            (Some(path), _) => LogTarget::File(path),
            (None, true) => LogTarget::Stderr,
            (None, false) => LogTarget::Off,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Calling this more than once is harmless.
pub fn init_logging(target: LogTarget<'_>) -> io::Result<()> {
    match target {
        LogTarget::File(path) => {
            let file = File::create(path)?;
            let _ = fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        LogTarget::Stderr => {
            let _ = fmt()
                .with_env_filter(env_filter())
                .with_writer(io::stderr)
                .try_init();
        }
        LogTarget::Off => {}
    }
    Ok(())
}
