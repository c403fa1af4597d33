//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the domain port and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::StudentRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// The repository backing every student operation.
    pub students: Arc<dyn StudentRepository>,
}

impl HttpState {
    /// Construct state around a repository implementation.
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }
}
