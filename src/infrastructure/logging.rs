//! File-backed tracing for a process whose terminal is owned by the UI.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_NAME: &str = "loan-intake.log";
const DEFAULT_DIRECTIVE: &str = "info";

/// An opened log file plus the locations that were tried and refused.
#[derive(Debug)]
pub struct LogSink {
    pub path: PathBuf,
    file: File,
    pub skipped: Vec<(PathBuf, io::Error)>,
}

impl LogSink {
    /// Opens the first usable location among `locations`, in order.
    pub fn open_first<I>(locations: I) -> Result<Self, Vec<(PathBuf, io::Error)>>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut skipped = Vec::new();
        for path in locations {
            match append_to(&path) {
                Ok(file) => return Ok(Self { path, file, skipped }),
                Err(err) => skipped.push((path, err)),
            }
        }
        Err(skipped)
    }
}

fn append_to(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Per-user data directory first, then a directory under the working dir.
fn default_locations() -> impl Iterator<Item = PathBuf> {
    let user = dirs::data_local_dir().map(|dir| dir.join("loan-intake").join("logs"));
    user.into_iter()
        .chain(std::iter::once(PathBuf::from(".loan-intake").join("logs")))
        .map(|dir| dir.join(LOG_FILE_NAME))
}

/// Installs the global subscriber and returns the log file path, if any.
///
/// Output never goes to stdout or stderr. `RUST_LOG` overrides the default
/// `info` filter; without a writable location events are filtered and dropped.
pub fn init_tracing() -> Option<PathBuf> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    match LogSink::open_first(default_locations()) {
        Ok(LogSink { path, file, skipped }) => {
            let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
            for (location, err) in &skipped {
                tracing::warn!(location = %location.display(), error = %err, "log location unusable");
            }
            tracing::info!(path = %path.display(), "logging to file");
            Some(path)
        }
        Err(_) => {
            tracing_subscriber::registry().with(filter).init();
            None
        }
    }
}
