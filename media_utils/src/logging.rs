//! Logging Module
//!
//! tracing-based logging shared by the workspace:
//! - a daily rolling log file in the system temp directory
//! - a stderr layer so stdout stays reserved for the report
//! - pruning of old log files
//! - structured records of external tool invocations
//!
//! # Examples
//!
//! ```no_run
//! use media_utils::logging::{LogConfig, init_logging};
//!
//! init_logging("ideal_profile", LogConfig::default()).expect("Failed to initialize logging");
//! tracing::info!("Program started");
//! ```

use anyhow::{Context, Result};
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory for log files (system temp dir by default)
    pub log_dir: PathBuf,
    /// How many log files to keep, default 5
    pub max_files: usize,
    /// Default level when RUST_LOG is unset, default WARN
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: std::env::temp_dir(),
            max_files: 5,
            level: Level::WARN,
        }
    }
}

/// Default filter directive: the program's own target plus this crate's.
pub fn default_filter(program_name: &str, level: Level) -> String {
    format!(
        "{}={},{}={}",
        program_name,
        level,
        env!("CARGO_CRATE_NAME"),
        level
    )
}

/// Initialise the global subscriber: file layer plus stderr layer.
///
/// Can only succeed once per process.
pub fn init_logging(program_name: &str, config: LogConfig) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", config.log_dir))?;

    // Daily files named `{program_name}.{date}.log`; old ones are pruned below.
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(program_name)
        .filename_suffix("log")
        .build(&config.log_dir)
        .with_context(|| format!("Failed to open log file in {:?}", config.log_dir))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(program_name, config.level)));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(
        program = program_name,
        log_dir = ?config.log_dir,
        max_files = config.max_files,
        level = ?config.level,
        "Logging system initialized"
    );

    cleanup_old_logs(&config.log_dir, program_name, config.max_files)?;

    Ok(())
}

/// Keep only the newest `max_files` logs written by `program_name`.
///
/// Daily files are named `{program_name}.{date}.log`. A file that cannot be
/// removed is reported and skipped.
fn cleanup_old_logs(log_dir: &Path, program_name: &str, max_files: usize) -> Result<()> {
    let prefix = format!("{program_name}.");

    let mut logs: Vec<(PathBuf, SystemTime)> = fs::read_dir(log_dir)
        .with_context(|| format!("Failed to read log directory: {:?}", log_dir))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(&prefix) && name.ends_with(".log")
        })
        .filter_map(|entry| {
            let meta = entry.metadata().ok().filter(|m| m.is_file())?;
            Some((entry.path(), meta.modified().ok()?))
        })
        .collect();

    logs.sort_by_key(|(_, modified)| Reverse(*modified));

    let stale = logs.iter().skip(max_files);
    let removed = stale
        .filter(|(path, _)| match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Failed to remove old log file");
                false
            }
        })
        .count();

    if removed > 0 {
        tracing::debug!(removed, kept = max_files, "Pruned old log files");
    }

    Ok(())
}

/// Record one external tool invocation as a single event.
///
/// Success is logged at info, anything else at error. `stderr` is attached
/// only when the tool wrote something.
pub fn log_external_tool(
    tool_name: &str,
    args: &[&str],
    stderr: &str,
    exit_code: Option<i32>,
    duration: Duration,
) {
    let command = format!("{} {}", tool_name, args.join(" "));
    let elapsed_ms = duration.as_millis() as u64;
    let stderr = (!stderr.is_empty()).then_some(stderr);

    match exit_code {
        Some(0) => tracing::info!(
            tool = tool_name,
            command = %command,
            elapsed_ms,
            stderr,
            "Tool finished"
        ),
        Some(code) => tracing::error!(
            tool = tool_name,
            command = %command,
            elapsed_ms,
            exit_code = code,
            stderr,
            "Tool exited with failure"
        ),
        None => tracing::error!(
            tool = tool_name,
            command = %command,
            elapsed_ms,
            stderr,
            "Tool killed by signal"
        ),
    }
}
