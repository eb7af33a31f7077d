/*!
 * Error types for the citeclean application.
 *
 * The citation engine itself cannot fail on string input; these types cover
 * the callers around it (files, pasted text, clipboard, configuration and the
 * upload service), using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors from putting text on the system clipboard
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// No clipboard helper could be run on this system
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Input file name does not end with `.html`
    #[error("Only HTML files are allowed: {0}")]
    InvalidExtension(String),

    /// Pasted or uploaded text was empty
    #[error("Input is empty, nothing to clean")]
    EmptyInput,

    /// Input bytes could not be decoded as UTF-8
    #[error("Input is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    /// Error from the clipboard capability
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error binding or running the upload service
    #[error("Server error: {0}")]
    Server(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<std::string::FromUtf8Error> for AppError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        Self::InvalidEncoding(error.to_string())
    }
}
