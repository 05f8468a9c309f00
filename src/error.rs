//! Error types for the hand gesture control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Hand tracker observation stream failed or produced a malformed record
    #[error("Hand tracker error: {0}")]
    Tracker(String),

    /// `X11` window system operation failed
    #[error("Window control error: {0}")]
    WindowControl(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Geometric computation on coincident points (zero-length ray)
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
