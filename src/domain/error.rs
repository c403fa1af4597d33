//! Domain-level error type.
//!
//! Transport agnostic: inbound adapters decide how a code maps to an HTTP
//! status and what the payload envelope looks like.

use super::ports::StudentRepositoryError;

/// Stable machine-readable category for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The request is malformed or fails validation. Client-caused.
    InvalidRequest,
    /// The targeted record does not exist.
    NotFound,
    /// A storage uniqueness rule was violated.
    Conflict,
    /// An unexpected failure in a collaborator (storage, transport).
    InternalError,
}

/// Domain error carrying a category and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The human-readable message surfaced to callers.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<StudentRepositoryError> for Error {
    fn from(err: StudentRepositoryError) -> Self {
        match err {
            StudentRepositoryError::DuplicateEmail { email } => {
                Self::conflict(format!("A student with email {email} already exists"))
            }
            StudentRepositoryError::MissingRecord { id } => {
                Self::not_found(format!("Student not found with id: {id}"))
            }
            StudentRepositoryError::EmptySearchTerm => {
                Self::invalid_request("Search term must not be empty")
            }
            StudentRepositoryError::Connection { message }
            | StudentRepositoryError::Query { message } => Self::internal(message),
        }
    }
}
