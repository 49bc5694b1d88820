//! Tracing setup. Logs go to a file so they never draw over the terminal UI.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "flappy-bee.log";

/// Environment variable holding the filter directives, e.g. `flappy_bee=debug`.
pub const LOG_ENV: &str = "FLAPPY_BEE_LOG";

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `path`. Defaults to `info`.
pub fn init(path: &Path) -> io::Result<()> {
    let file = open_log(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    tracing::info!(
        commit = crate::build_info::BUILD_COMMIT,
        date = crate::build_info::BUILD_DATE,
        "flappy-bee starting"
    );
    Ok(())
}
