//! Core error types for the dividend accountant.
//!
//! The engine itself only fails on logic errors (an instrument that was never
//! traded, an invalid configuration). Data acquisition errors belong to the
//! collaborator crates and are converted at their boundary.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the accounting engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No trades found for ticker '{0}'")]
    NoTradesFound(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}
