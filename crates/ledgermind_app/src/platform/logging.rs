//! Platform logging initialization for ledgermind_app.
//!
//! Writes logs to `./ledgermind.log` in the current working directory; the
//! terminal itself is owned by the UI.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

/// Environment variable selecting the log level (`error` .. `trace`).
pub const LOG_LEVEL_VAR: &str = "LEDGERMIND_LOG_LEVEL";

const LOG_FILENAME: &str = "./ledgermind.log";

pub fn level_from_env() -> LevelFilter {
    parse_level(std::env::var(LOG_LEVEL_VAR).ok().as_deref())
}

fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialize the file logger. Logging is skipped if the file cannot be created.
pub fn initialize(level: LevelFilter) {
    let Some(file_logger) = create_file_logger(level, build_config()) else {
        return;
    };
    let loggers: Vec<Box<dyn SharedLogger>> = vec![file_logger];
    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(LOG_FILENAME);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
