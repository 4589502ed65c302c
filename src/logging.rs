//! Optional log output.
//!
//! The crate only talks to the `log` facade. Call [`init_logging`] once at
//! startup to see the output on the terminal and, if wanted, in a file.
//! Rotations and repair cases are logged at `trace`, structural events like
//! clearing a tree at `debug`, and corruption at `error`.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub terminal_level: LevelFilter,
    pub file_level: LevelFilter,
    /// Where to write the file log. No file logger is set up without one.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            terminal_level: LevelFilter::Warn,
            file_level: LevelFilter::Debug,
            log_file: None,
        }
    }
}

impl LoggingConfig {
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

#[derive(Debug)]
pub enum LoggingError {
    /// The log file couldn't be created.
    Io(io::Error),
    /// Some logger was already installed for this process.
    AlreadyInitialized(SetLoggerError),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::Io(e) => write!(f, "couldn't create the log file: {e}"),
            LoggingError::AlreadyInitialized(e) => write!(f, "logging is already set up: {e}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::Io(e) => Some(e),
            LoggingError::AlreadyInitialized(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoggingError {
    fn from(e: io::Error) -> Self {
        LoggingError::Io(e)
    }
}

impl From<SetLoggerError> for LoggingError {
    fn from(e: SetLoggerError) -> Self {
        LoggingError::AlreadyInitialized(e)
    }
}

/// Installs the global logger. Only the first successful call in a process
/// has any effect, later ones return [`LoggingError::AlreadyInitialized`].
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(config.terminal_level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
    ];
    if let Some(path) = &config.log_file {
        loggers.push(WriteLogger::new(config.file_level, Config::default(), File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}
