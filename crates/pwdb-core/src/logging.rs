//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Crates whose log level follows the `-v` count
const WORKSPACE_TARGETS: &[&str] = &["pwdb_tools", "pwdb_core", "pwdb_data", "pwdb_app", "pwdb_tui"];

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/pwdb-tools/logs/`. When `verbosity`
/// is non-zero, events are mirrored to stderr as well.
/// Log level is controlled by `PWDB_LOG` environment variable, falling back
/// to a level derived from `verbosity`.
///
/// # Examples
/// ```bash
/// PWDB_LOG=debug pwdb plot pwdb-2024/Complete
/// pwdb plot -vv pwdb-2024/Complete
/// ```
pub fn init(verbosity: u8) -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "pwdb.log");

    let env_filter = EnvFilter::try_from_env("PWDB_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    let stderr_layer = (verbosity > 0).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .with(stderr_layer)
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("PWDB tools starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Filter directives for a given `-v` count
pub fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives.join(",")
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("pwdb-tools").join("logs"))
}
