//! Row types bridging Diesel and the domain model.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{student_courses, students};

/// A `students` row as read from the database.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = students, check_for_backend(diesel::pg::Pg))]
pub struct StudentRow {
    /// Sequence-assigned identifier.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique contact address.
    pub email: String,
    /// Calendar date the student joined.
    pub enrollment_date: NaiveDate,
}

/// Insertable `students` row; the identifier comes from the sequence.
#[derive(Debug, Insertable)]
#[diesel(table_name = students)]
pub struct NewStudentRow<'a> {
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Unique contact address.
    pub email: &'a str,
    /// Calendar date the student joined.
    pub enrollment_date: NaiveDate,
}

/// Full-record changeset applied on update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = students)]
pub struct StudentChangeset<'a> {
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Unique contact address.
    pub email: &'a str,
    /// Calendar date the student joined.
    pub enrollment_date: NaiveDate,
}

/// A `student_courses` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = student_courses, check_for_backend(diesel::pg::Pg))]
pub struct StudentCourseRow {
    /// Owning student.
    pub student_id: i64,
    /// Machine course name.
    pub course: String,
}

/// Insertable `student_courses` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = student_courses)]
pub struct NewStudentCourseRow<'a> {
    /// Owning student.
    pub student_id: i64,
    /// Machine course name.
    pub course: &'a str,
}
