//! Error types for the gymlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gymlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Starting a workout while one is already active
    #[error("Workout already started. End the current workout to start a new one.")]
    WorkoutAlreadyActive,

    /// Logging or ending without an active workout
    #[error("No active workout. Start a workout first.")]
    NoActiveWorkout,

    /// Ending a workout with no rows logged
    #[error("Nothing to save. Log at least one set first.")]
    EmptyWorkout,

    /// Transport-level failure reaching the parser backend
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Parser backend answered with a non-success status
    #[error("Parser API error: {0}")]
    Api(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error is a rejected user action rather than a fault.
    ///
    /// Rejections are reported to the user and the session continues
    /// unchanged; they never terminate the process.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::WorkoutAlreadyActive | Error::NoActiveWorkout | Error::EmptyWorkout
        )
    }
}
