//! Persistence adapters for the student repository port.
//!
//! Two implementations share the contract: a PostgreSQL adapter built on
//! Diesel's async connection, and an in-memory adapter used as the
//! development fallback and as the test double across the suite.

pub mod diesel_student_repository;
pub mod memory;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_student_repository::DieselStudentRepository;
pub use memory::InMemoryStudentRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
