//! Enrollment statistics aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counts across the whole student population.
///
/// `enrollments_by_course` is keyed by machine course name and only contains
/// courses with at least one enrolled student. `unenrolled_students` is
/// always `total_students - enrolled_students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStats {
    /// Number of student records.
    pub total_students: u64,
    /// Distinct students with at least one enrolled course.
    pub enrolled_students: u64,
    /// Students with an empty course set.
    pub unenrolled_students: u64,
    /// Per-course student counts; zero-count courses are omitted.
    pub enrollments_by_course: BTreeMap<String, u64>,
}
