//! Tracing setup for the `hlsdl` binary.
//!
//! Events go to `$XDG_STATE_HOME/hlsdl/hlsdl.log`. When that file cannot be
//! opened, the caller installs the stderr subscriber instead.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const STATE_PREFIX: &str = "hlsdl";
const LOG_FILE: &str = "hlsdl.log";
/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info,hlsdl=debug,hlsdl_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Where the log file lives; creates the state directory if needed.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix(STATE_PREFIX)?;
    dirs.place_state_file(LOG_FILE)
        .context("creating hlsdl state directory")
}

/// Per-event writer: the shared log file, or stderr when its handle can't be cloned.
enum Sink {
    File(File),
    Stderr(io::Stderr),
}

impl io::Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File(f) => f.write(buf),
            Sink::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File(f) => f.flush(),
            Sink::Stderr(e) => e.flush(),
        }
    }
}

struct SharedLog(File);

impl<'a> MakeWriter<'a> for SharedLog {
    type Writer = Sink;

    fn make_writer(&'a self) -> Sink {
        match self.0.try_clone() {
            Ok(f) => Sink::File(f),
            Err(_) => Sink::Stderr(io::stderr()),
        }
    }
}

/// Installs the file subscriber and returns the log path.
/// Errors leave no subscriber installed, so `init_logging_stderr` can follow.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(SharedLog(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "logging to file");
    Ok(path)
}

pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
