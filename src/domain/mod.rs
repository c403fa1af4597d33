//! Domain model: students, the course catalogue, errors and the
//! repository port.
//!
//! Nothing in this module knows about HTTP or SQL. Inbound adapters map
//! [`Error`] to responses; outbound adapters implement
//! [`ports::StudentRepository`].

pub mod course;
pub mod error;
pub mod ports;
pub mod stats;
pub mod student;

pub use course::{Course, CourseParseError};
pub use error::{Error, ErrorCode};
pub use stats::EnrollmentStats;
pub use student::{Student, StudentId};
