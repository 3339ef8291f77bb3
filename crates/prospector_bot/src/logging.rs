//! Per-player log file.
//!
//! The player id is only known after the handshake, so the subscriber is
//! installed late and the handshake itself is not logged to file.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use prospector_core::prelude::PlayerId;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Path of the log file for one player.
pub fn log_path(dir: &Path, player: PlayerId) -> PathBuf {
    dir.join(format!("bot-{player}.log"))
}

/// Create (or truncate) the log file for one player.
pub fn create_log_file(dir: &Path, player: PlayerId) -> io::Result<File> {
    std::fs::create_dir_all(dir)?;
    File::create(log_path(dir, player))
}

/// Level filter: `RUST_LOG` wins when set, otherwise INFO or DEBUG.
pub fn level_filter(verbose: bool) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Install the global subscriber writing to `bot-<id>.log` in `dir`.
pub fn init_file_logging(dir: &Path, player: PlayerId, verbose: bool) -> io::Result<PathBuf> {
    let file = create_log_file(dir, player)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(level_filter(verbose))
        .init();

    Ok(log_path(dir, player))
}
