//! `tracing` setup. The TUI owns the terminal, so events go to a daily
//! rolling file; one-shot mode can mirror them to stderr as well.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_NAME: &str = "inspiro";
const DEFAULT_FILTER: &str = "info";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Install the global subscriber and return the directory logs go to.
/// Later calls are no-ops that return the first directory.
pub fn init_logging(log_dir: Option<&Path>, emit_stderr: bool) -> Result<PathBuf> {
    if let Some(dir) = LOG_DIR.get() {
        return Ok(dir.clone());
    }

    let dir = resolve_log_dir(log_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let appender = rolling::daily(&dir, format!("{}.log", APP_NAME));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

    let installed = if emit_stderr {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .try_init()
    };
    installed.map_err(|e| anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_DIR.set(dir.clone());
    Ok(dir)
}

fn resolve_log_dir(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => expand_home(dir),
        None => default_data_dir(),
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

fn default_data_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".local").join("share").join(APP_NAME),
        Err(_) => PathBuf::from(".").join(APP_NAME),
    }
}
