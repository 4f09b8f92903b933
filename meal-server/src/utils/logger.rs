//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional file output
///
/// `log_level` accepts a plain level (`info`) or a full filter directive
/// (`meal_server=debug,tower_http=info`). File output rolls daily and is only
/// enabled when `log_dir` already exists.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "meal-server");
            let subscriber = subscriber.with_writer(file_appender).with_ansi(false);
            let result = if json {
                subscriber.json().try_init()
            } else {
                subscriber.try_init()
            };
            if result.is_err() {
                eprintln!("Logger already initialized");
            }
            return;
        }
        eprintln!("Log directory {dir} does not exist, logging to stdout");
    }

    let result = if json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
    if result.is_err() {
        eprintln!("Logger already initialized");
    }
}
