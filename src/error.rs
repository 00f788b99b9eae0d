//! Error types

use thiserror::Error;

/// Errors that can occur when building a calendar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An event with this id is already present in the calendar
    #[error("Failed to add event with id {0}, id already present in calendar")]
    DuplicateIdentifier(String),

    /// A required value is missing, or is not a valid point in time
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
