use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::utils::{self, RunMode};

/// Where the log file goes: next to the database in the data directory.
pub fn log_path(mode: RunMode) -> Option<PathBuf> {
    utils::get_data_dir(mode).map(|dir| dir.join("zenpets.log"))
}

/// Route tracing output to `path`. The terminal belongs to the UI, so nothing
/// is written to stdout/stderr. `RUST_LOG` wins over `default_filter`.
pub fn init(path: &Path, default_filter: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    tracing::info!("Starting ZenPets v{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
