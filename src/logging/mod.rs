use crate::core::config::LoggingSettings;
use crate::Result;
use anyhow::{anyhow, Context};
use std::fs::{create_dir_all, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

const LOG_FILE_NAME: &str = "flowdoc.log";
const ENV_FILTER_VAR: &str = "FLOWDOC_LOG";

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Guard that keeps the non-blocking file sink flushing for the duration of
/// the command.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_file_path: Option<PathBuf>,
}

impl LoggingGuard {
    /// Path of the file sink, when one was enabled.
    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file_path.as_deref()
    }
}

/// Initialize the tracing stack: env-filtered console output on stderr plus
/// an optional append-only file sink. Errors when invoked more than once per
/// process unless tests explicitly reset the guard.
///
/// Operational diagnostics go through tracing; the batch progress log the
/// user sees on stdout is a separate surface and never routed here.
pub fn init(settings: &LoggingSettings) -> Result<LoggingGuard> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let env_filter = EnvFilter::try_from_env(ENV_FILTER_VAR)
        .or_else(|_| EnvFilter::try_new(&settings.default_level))
        .context("failed to configure tracing level")?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    let (file_writer, file_guard, log_file_path) = file_sink(settings)?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(env_filter)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {}", err))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        log_file_path,
    })
}

type FileSink = (
    BoxMakeWriter,
    Option<tracing_appender::non_blocking::WorkerGuard>,
    Option<PathBuf>,
);

fn file_sink(settings: &LoggingSettings) -> Result<FileSink> {
    if !settings.enable_file {
        return Ok((BoxMakeWriter::new(io::sink), None, None));
    }

    let directory = settings
        .log_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    create_dir_all(&directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;
    let log_file_path = directory.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .with_context(|| format!("failed to open log file {}", log_file_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let writer = BoxMakeWriter::new(move || non_blocking.clone());
    Ok((writer, Some(guard), Some(log_file_path)))
}

#[cfg(test)]
/// Reset the initialization guard so tests can reconfigure logging.
pub fn reset_for_tests() {
    LOGGER_INITIALIZED.store(false, Ordering::SeqCst);
}
