//! Error types for the focus-reporting client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Student ID is already in use
    #[error("Student ID '{0}' is already connected")]
    DuplicateStudentId(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
