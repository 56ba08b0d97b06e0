//! Logging configuration for tagview
//!
//! Logs are written to stderr and appended to a file at:
//! `<data dir>/tagview/logs/tagview.log`
//!
//! stdout stays free for command output.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "tagview";
const LOG_FILE: &str = "tagview.log";
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Get the log directory path
pub fn get_log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR).join("logs"))
}

/// Get the current log file path
pub fn get_log_file_path() -> Option<PathBuf> {
    get_log_directory().map(|d| d.join(LOG_FILE))
}

/// Initialize the logging system
///
/// The terminal shows `level` and above; the file always captures debug.
/// Returns the path to the log file on success.
pub fn init_logging(level: LevelFilter) -> Option<PathBuf> {
    let log_dir = match get_log_directory() {
        Some(d) => d,
        None => {
            eprintln!("Warning: Could not determine log directory");
            init_terminal_only(level);
            return None;
        }
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory: {}", e);
        init_terminal_only(level);
        return None;
    }

    let log_path = log_dir.join(LOG_FILE);
    rotate_if_large(&log_path);

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file: {}", e);
            init_terminal_only(level);
            return None;
        }
    };

    let config = log_config();
    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(level, config.clone(), TerminalMode::Stderr, ColorChoice::Auto),
        WriteLogger::new(LevelFilter::Debug.max(level), config, log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    log::debug!("Log file: {}", log_path.display());
    Some(log_path)
}

/// Move the log aside once it grows past the size limit
fn rotate_if_large(log_path: &Path) {
    if let Ok(metadata) = fs::metadata(log_path)
        && metadata.len() > MAX_LOG_SIZE
    {
        let _ = fs::rename(log_path, log_path.with_extension("log.old"));
    }
}

fn log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build()
}

/// Terminal-only fallback when file logging is unavailable
fn init_terminal_only(level: LevelFilter) {
    let term_logger = TermLogger::new(level, log_config(), TerminalMode::Stderr, ColorChoice::Auto);
    let _ = CombinedLogger::init(vec![term_logger]);
}
