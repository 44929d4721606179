// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for neurite tools
//!
//! Console output always goes to stderr so tool output on stdout stays clean.
//! With the `file-logging` feature and a `log_dir`, each run also writes a
//! timestamped folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       ├── neurite-compartments.log
//!       ├── neurite-config.log
//!       └── combined.log
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingOptions};

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps file writers alive; logs are flushed when dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Folder of the current run, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Fails if the filter is malformed, the log folder cannot be created, or a
/// global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(&options.level);
    #[cfg_attr(not(feature = "file-logging"), allow(unused_mut))]
    let mut layers: Vec<BoxedLayer> = vec![console_layer(options.format, build_filter(&filter)?)];

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &options.log_dir {
        Some(base) => {
            let (file_layers, guards, run_folder) = file_layers(base, &filter, options.retention_runs)?;
            layers.extend(file_layers);
            (guards, Some(run_folder))
        }
        None => (Vec::new(), None),
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    #[cfg(not(feature = "file-logging"))]
    warn_log_dir_ignored(options);

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

#[cfg(not(feature = "file-logging"))]
fn warn_log_dir_ignored(options: &LoggingOptions) {
    if let Some(requested) = &options.log_dir {
        tracing::warn!(
            "Log directory {} ignored: built without file-logging",
            requested.display()
        );
    }
}

fn build_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter: {}", filter))
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer {
    match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
    }
}

#[cfg(feature = "file-logging")]
fn file_layers(
    base: &Path,
    filter: &str,
    retention_runs: usize,
) -> Result<(
    Vec<BoxedLayer>,
    Vec<tracing_appender::non_blocking::WorkerGuard>,
    PathBuf,
)> {
    use tracing_appender::rolling;

    let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = base.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_runs(base, retention_runs)?;

    let mut layers = Vec::new();
    let mut guards = Vec::new();

    // One file per crate
    for crate_name in crate::KNOWN_CRATES {
        let appender = rolling::never(&run_folder, format!("{}.log", crate_name));
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        let crate_filter = build_filter(&format!("{}=debug", crate::crate_target(crate_name)))?;
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(crate_filter)
                .boxed(),
        );
    }

    let appender = rolling::never(&run_folder, "combined.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    guards.push(guard);
    layers.push(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .json()
            .with_filter(build_filter(filter)?)
            .boxed(),
    );

    Ok((layers, guards, run_folder))
}

/// Remove the oldest `run_*` folders under `base_log_dir`, keeping `keep` of them
///
/// Folders whose names do not carry a run timestamp are left alone.
/// Returns the number of folders removed.
pub fn cleanup_old_runs(base_log_dir: &Path, keep: usize) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    let mut runs = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|s| NaiveDateTime::parse_from_str(s, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(naive) = stamp {
            runs.push((path, Utc.from_utc_datetime(&naive)));
        }
    }

    // Oldest first
    runs.sort_by_key(|(_, dt)| *dt);

    let excess = runs.len().saturating_sub(keep);
    let mut removed = 0;
    for (path, _) in runs.iter().take(excess) {
        match std::fs::remove_dir_all(path) {
            Ok(()) => removed += 1,
            Err(e) => eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            ),
        }
    }

    Ok(removed)
}
