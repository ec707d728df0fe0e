//! ## Sets up logging from the runtime configuration.
//!
//! Settings used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_FILE_PATH: when using file mode, the path of the log file (default "./logs/meta-ledger.log")

use chrono::Utc;
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};
use std::{
    fs::{create_dir_all, File},
    path::Path,
};
use thiserror::Error;

use crate::config::RuntimeConfig;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Unable to create log file {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to initialize logger: {0}")]
    Init(#[from] log::SetLoggerError),
}

pub fn parse_level(log_level: &str) -> LevelFilter {
    match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Appends the UTC date to the log file name, replacing a `.log` suffix.
pub fn rolled_file_path(base_file_path: &str, date_str: &str) -> String {
    match base_file_path.strip_suffix(".log") {
        Some(trimmed) => format!("{}-{}.log", trimmed, date_str),
        None => format!("{}-{}.log", base_file_path, date_str),
    }
}

pub fn setup_logging(config: &RuntimeConfig) -> Result<(), LoggingError> {
    let level_filter = parse_level(&config.log_level);

    if config.log_mode.to_lowercase() == "file" {
        let date_str = Utc::now().format("%Y-%m-%d").to_string();
        let rolled_file_path = rolled_file_path(&config.log_file_path, &date_str);

        let file_error = |source| LoggingError::File {
            path: rolled_file_path.clone(),
            source,
        };
        if let Some(parent) = Path::new(&rolled_file_path).parent() {
            create_dir_all(parent).map_err(file_error)?;
        }
        let log_file = File::create(&rolled_file_path).map_err(file_error)?;

        WriteLogger::init(level_filter, Config::default(), log_file)?;
    } else {
        SimpleLogger::init(level_filter, Config::default())?;
    }

    info!(
        "Logging is successfully configured (mode: {})",
        config.log_mode
    );
    Ok(())
}
