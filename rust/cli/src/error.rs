//! Error types for the CLI application.

use std::fmt;

use felt_engine::errors::GameError;

/// Errors surfaced by CLI commands, mapped to exit codes in [`crate::run`].
#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, config reads)
    Io(std::io::Error),
    /// Invalid user input or command-line arguments
    InvalidInput(String),
    /// Configuration error
    Config(String),
    /// Engine-related error
    Engine(String),
    /// Input stream closed while the game still needed a decision
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}
