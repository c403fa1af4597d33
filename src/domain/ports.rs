//! Repository port for student records.
//!
//! The port describes how the domain expects to interact with a persistence
//! adapter. Errors are strongly typed so adapters map their failures into
//! predictable variants instead of stringly-typed results.

use async_trait::async_trait;
use thiserror::Error;

use super::{Course, Student, StudentId};

/// Failures surfaced by [`StudentRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudentRepositoryError {
    /// Repository connection could not be established or was lost.
    #[error("student repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description of the connection failure.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("student repository query failed: {message}")]
    Query {
        /// Adapter-provided description of the query failure.
        message: String,
    },
    /// The email uniqueness rule was violated on save.
    #[error("a student with email {email} already exists")]
    DuplicateEmail {
        /// The colliding address.
        email: String,
    },
    /// A mutation targeted an identifier with no backing record.
    #[error("no student record with id {id}")]
    MissingRecord {
        /// The identifier with no backing record.
        id: StudentId,
    },
    /// A name search was attempted with a blank term.
    #[error("search term must not be empty")]
    EmptySearchTerm,
}

impl StudentRepositoryError {
    /// Helper for connection-oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for email uniqueness violations.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    /// Helper for mutations that targeted a missing record.
    pub fn missing_record(id: impl Into<i64>) -> Self {
        Self::MissingRecord {
            id: StudentId::new(id.into()),
        }
    }
}

/// Persistence port for student records.
///
/// Implementations must honour the entity's uniqueness keys: identifiers are
/// assigned once on insert and never reused, and `email` collisions are
/// rejected with [`StudentRepositoryError::DuplicateEmail`]. The two
/// aggregate queries exist so the statistics operation never has to load the
/// full dataset into the handler layer.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students ordered by last name ascending, ties broken by first
    /// name ascending.
    async fn list_all(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Fetch a student by identifier. Absence is not an error.
    async fn find_by_id(&self, id: StudentId)
        -> Result<Option<Student>, StudentRepositoryError>;

    /// Students whose first or last name contains `term`, case-insensitive.
    ///
    /// Fails with [`StudentRepositoryError::EmptySearchTerm`] when `term` is
    /// blank after trimming.
    async fn find_by_name_containing(
        &self,
        term: &str,
    ) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Students enrolled in the given course.
    async fn find_by_course(
        &self,
        course: Course,
    ) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Insert (no id) or fully update (id present) a student record,
    /// returning the persisted record with its identifier populated.
    async fn save(&self, student: Student) -> Result<Student, StudentRepositoryError>;

    /// Delete a student by identifier; reports
    /// [`StudentRepositoryError::MissingRecord`] when nothing was deleted.
    async fn delete_by_id(&self, id: StudentId) -> Result<(), StudentRepositoryError>;

    /// Whether a record exists for the identifier.
    async fn exists_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError>;

    /// Total number of student records.
    async fn count(&self) -> Result<u64, StudentRepositoryError>;

    /// Distinct students with at least one enrolled course.
    async fn count_enrolled(&self) -> Result<u64, StudentRepositoryError>;
}
