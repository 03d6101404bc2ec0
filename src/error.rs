//! Error types for display queries and alignment sessions.

use thiserror::Error;

/// Result type alias for monalign operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or changing the display layout.
#[derive(Debug, Error)]
pub enum Error {
    /// Platform-specific error.
    #[error("platform error: {0}")]
    Platform(String),

    /// The requested feature is not supported on this platform.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// The display server reported no monitors.
    #[error("no displays attached")]
    NoDisplays,

    /// A monitor with the given device name is not part of the virtual screen.
    #[error("unknown monitor: {0}")]
    UnknownMonitor(String),

    /// No alignment session is running.
    #[error("no alignment session is active")]
    NoSession,

    /// The session is not in a state that allows the operation.
    #[error("invalid session state: {0}")]
    InvalidState(String),

    /// The operating system rejected a new display layout.
    #[error("failed to apply display layout: {0}")]
    ApplyFailed(String),

    /// The settings file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error while reading or writing settings.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
