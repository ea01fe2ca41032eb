use std::io;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to initialize database: {0}")]
    DatabaseInitializationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid date: {0}")]
    DateParseError(#[from] chrono::ParseError),
    #[error("Invalid integer: {0}")]
    IntParseError(#[from] ParseIntError),
    #[error("Blocking task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),
    #[error("Text generation error: {0}")]
    CompletionError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<toml::de::Error> for RosterError {
    fn from(err: toml::de::Error) -> Self {
        RosterError::ConfigError(err.to_string())
    }
}

impl From<ureq::Error> for RosterError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => {
                RosterError::CompletionError(format!("completion endpoint returned HTTP {status}"))
            }
            ureq::Error::Transport(transport) => {
                RosterError::CompletionError(format!("transport failure: {transport}"))
            }
        }
    }
}
