//! Logger setup for the terminal client.
//!
//! The surface draws the page on stdout, so the default sink is
//! `./similar_app.log`. `--log terminal|both` (or `log:` in the settings file)
//! adds stderr. `--verbose` lowers the level to debug.

use std::fs::File;
use std::path::Path;

use clap::ValueEnum;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "./similar_app.log";

/// Where log lines go, chosen with `--log` or the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDestination {
    /// `./similar_app.log` only; keeps the drawn page clean.
    #[default]
    File,
    /// stderr only.
    Terminal,
    Both,
}

impl LogDestination {
    fn to_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    fn to_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }
}

/// Installs the global logger at `level`. If the log file cannot be created
/// the run continues with whatever sinks remain.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match file_logger(Path::new(LOG_FILENAME), level, config) {
            Ok(logger) => loggers.push(logger),
            Err(err) => eprintln!("Warning: could not create log file {LOG_FILENAME}: {err}"),
        }
    }
    if loggers.is_empty() {
        return;
    }

    if CombinedLogger::init(loggers).is_ok() {
        log::info!("Logging at {} to {:?}", level, destination);
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> std::io::Result<Box<WriteLogger<File>>> {
    Ok(WriteLogger::new(level, config, File::create(path)?))
}
