use crate::error::{CliError, Result as CliErrorResult};

use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback, Output};
use log::{Record, info};

/// Initialize the fern logger.
///
/// With `log_file` set, records are appended to that file (its directory is
/// created if needed) and `colored` is ignored. Otherwise they go to stderr,
/// so stdout carries only command output.
pub fn initialize(
    log_level: rc_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> CliErrorResult<()> {
    let level_filter = log_level.0;

    let (output, colors): (Output, _) = match log_file {
        Some(ref path) => (open_log_file(path)?.into(), None),
        None => (std::io::stderr().into(), colored.then(level_colors)),
    };

    Dispatch::new()
        .level(level_filter)
        .format(move |out, message, record| {
            format_record(out, message, record, colors.as_ref())
        })
        .chain(output)
        .apply()
        .map_err(|e| CliError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stderr", level_filter),
    }

    Ok(())
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

fn open_log_file(path: &Path) -> CliErrorResult<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CliError::Logger {
            message: format!("Failed to create log directory {}: {}", parent.display(), e),
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::Logger {
            message: format!("Failed to open log file {}: {}", path.display(), e),
        })
}

/// `[timestamp - LEVEL] message [file:line]`
fn format_record(
    out: FormatCallback,
    message: &fmt::Arguments,
    record: &Record,
    colors: Option<&ColoredLevelConfig>,
) {
    let date = humantime::format_rfc3339(SystemTime::now());
    let file = record.file().unwrap_or("unknown");
    let line = record.line().unwrap_or(0);

    match colors {
        Some(colors) => out.finish(format_args!(
            "[{date} - {}] {message} [{file}:{line}]",
            colors.color(record.level())
        )),
        None => out.finish(format_args!(
            "[{date} - {}] {message} [{file}:{line}]",
            record.level()
        )),
    }
}
