// src/logging.rs

use crate::config::{get_config_dir, Config};
use crate::errors::NeuralResult;
use flexi_logger::{detailed_format, FileSpec, Logger, LoggerHandle};

/// Starts file logging. The terminal belongs to the UI, so nothing is ever
/// written to stdout or stderr. Keep the returned handle alive for the
/// lifetime of the program.
pub fn init_logging(config: &Config) -> NeuralResult<LoggerHandle> {
    let log_dir = match &config.log_dir {
        Some(dir) => dir.clone(),
        None => get_config_dir()?.join("logs"),
    };

    let handle = Logger::try_with_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename("neural-interface")
                .suppress_timestamp(),
        )
        .append()
        .format(detailed_format)
        .start()?;

    Ok(handle)
}
