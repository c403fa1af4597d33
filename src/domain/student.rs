//! The student aggregate.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Course;

/// Storage-assigned student identifier.
///
/// Identifiers come from the database sequence; a student has no identifier
/// until it has been persisted. Parsing from text is fallible so inbound
/// adapters can reject malformed path parameters before touching storage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64)]
pub struct StudentId(i64);

impl StudentId {
    /// Wrap a raw identifier, e.g. one read back from storage.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw identifier value.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<StudentId> for i64 {
    fn from(id: StudentId) -> Self {
        id.as_i64()
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for StudentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

/// A student record.
///
/// ## Invariants
/// - `id` is `None` until the record has been persisted and is never
///   reassigned afterwards.
/// - `email` is unique across all students; storage enforces this at write
///   time.
/// - `enrolled_courses` is a set: enrolling twice in the same course is a
///   no-op.
///
/// Two records are equal only when both `id` and `email` match, mirroring
/// the storage uniqueness keys.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Identifier assigned by storage; absent until persisted.
    #[schema(value_type = Option<i64>)]
    pub id: Option<StudentId>,
    /// Given name; required, non-empty.
    pub first_name: String,
    /// Family name; required, non-empty.
    pub last_name: String,
    /// Unique contact address; required, non-empty.
    pub email: String,
    /// Calendar date the student joined; defaults to the creation date.
    pub enrollment_date: NaiveDate,
    /// Courses the student is enrolled in.
    pub enrolled_courses: BTreeSet<Course>,
}

impl Student {
    /// Create an unpersisted student enrolled as of today with no courses.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            enrollment_date: chrono::Local::now().date_naive(),
            enrolled_courses: BTreeSet::new(),
        }
    }

    /// Enrol in a course. Idempotent; returns whether the set changed.
    pub fn enroll(&mut self, course: Course) -> bool {
        self.enrolled_courses.insert(course)
    }

    /// Drop a course. Returns whether the student was enrolled in it.
    pub fn drop_course(&mut self, course: Course) -> bool {
        self.enrolled_courses.remove(&course)
    }

    /// Whether the student is enrolled in at least one course.
    pub fn is_enrolled(&self) -> bool {
        !self.enrolled_courses.is_empty()
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.email == other.email
    }
}

impl Eq for Student {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn jane() -> Student {
        Student::new("Jane", "Doe", "jane@example.com")
    }

    #[rstest]
    fn new_student_starts_unpersisted_with_no_courses() {
        let student = jane();
        assert!(student.id.is_none());
        assert!(student.enrolled_courses.is_empty());
        assert!(!student.is_enrolled());
        assert_eq!(student.enrollment_date, chrono::Local::now().date_naive());
    }

    #[rstest]
    fn enroll_is_idempotent() {
        let mut student = jane();
        assert!(student.enroll(Course::Physics));
        assert!(!student.enroll(Course::Physics));
        assert_eq!(student.enrolled_courses.len(), 1);
        assert!(student.is_enrolled());
    }

    #[rstest]
    fn drop_course_removes_enrollment() {
        let mut student = jane();
        student.enroll(Course::Biology);
        assert!(student.drop_course(Course::Biology));
        assert!(!student.drop_course(Course::Biology));
        assert!(!student.is_enrolled());
    }

    #[rstest]
    fn equality_uses_id_and_email_only() {
        let mut a = jane();
        let mut b = jane();
        a.id = Some(StudentId::new(1));
        b.id = Some(StudentId::new(1));
        b.first_name = "Janet".into();
        assert_eq!(a, b);

        b.email = "janet@example.com".into();
        assert_ne!(a, b);

        b.email = a.email.clone();
        b.id = Some(StudentId::new(2));
        assert_ne!(a, b);
    }

    #[rstest]
    fn serialises_with_camel_case_fields() {
        let mut student = jane();
        student.id = Some(StudentId::new(7));
        student.enrollment_date =
            NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid calendar date");
        student.enroll(Course::ComputerScience);

        let value = serde_json::to_value(&student).expect("serialise student");
        assert_eq!(value["id"], 7);
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["lastName"], "Doe");
        assert_eq!(value["enrollmentDate"], "2024-09-01");
        assert_eq!(value["enrolledCourses"][0], "COMPUTER_SCIENCE");
    }

    #[rstest]
    fn student_id_parses_from_text() {
        let id: StudentId = "42".parse().expect("numeric id parses");
        assert_eq!(id.as_i64(), 42);
        assert!("forty-two".parse::<StudentId>().is_err());
    }
}
