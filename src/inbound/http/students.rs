//! Student API handlers.
//!
//! ```text
//! GET    /api/students              List all students
//! GET    /api/students/{id}         Get student by id
//! GET    /api/students/search?name= Search by name
//! POST   /api/students              Create student
//! PUT    /api/students/{id}         Update student (partial)
//! DELETE /api/students/{id}         Delete student
//! POST   /api/students/{id}/enroll  Enrol in a course
//! GET    /api/students/stats        Enrollment statistics
//! ```
//!
//! Handlers validate input before calling the repository and map every
//! repository failure into a response outcome; nothing propagates unhandled.

use std::collections::BTreeMap;

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::ports::StudentRepository;
use crate::domain::{Course, EnrollmentStats, Error, Student, StudentId};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Creation payload for `POST /api/students`.
///
/// Fields are optional at the wire level so validation can name the missing
/// field instead of failing in deserialization.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentRequest {
    /// Given name; required, non-blank.
    pub first_name: Option<String>,
    /// Family name; required, non-blank.
    pub last_name: Option<String>,
    /// Unique contact address; required, non-blank.
    pub email: Option<String>,
    /// Enrollment date; defaults to today when omitted.
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
}

/// Partial-update payload for `PUT /api/students/{id}`.
///
/// Omitted fields leave the stored value untouched; the `Option` wrappers
/// distinguish "not provided" from "set to empty".
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    /// Replacement given name, when provided.
    pub first_name: Option<String>,
    /// Replacement family name, when provided.
    pub last_name: Option<String>,
    /// Replacement contact address, when provided.
    pub email: Option<String>,
}

/// Enrollment payload for `POST /api/students/{id}/enroll`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    /// The course to enrol in; required.
    pub course: Option<Course>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    name: Option<String>,
}

fn parse_id(raw: &str) -> Result<StudentId, Error> {
    raw.parse()
        .map_err(|_| Error::invalid_request("Invalid student ID format"))
}

fn required(value: Option<String>, message: &'static str) -> Result<String, Error> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::invalid_request(message)),
    }
}

fn not_found(id: StudentId) -> Error {
    Error::not_found(format!("Student not found with id: {id}"))
}

/// List all students ordered by last name, then first name.
#[utoipa::path(
    get,
    path = "/api/students",
    responses((status = 200, description = "All students", body = [Student])),
    tag = "students",
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Student>>> {
    let students = state.students.list_all().await?;
    Ok(web::Json(students))
}

/// Search students by a case-insensitive substring of first or last name.
#[utoipa::path(
    get,
    path = "/api/students/search",
    params(("name" = String, Query, description = "Substring to match against first or last name")),
    responses(
        (status = 200, description = "Matching students", body = [Student]),
        (status = 400, description = "Missing or blank name", body = crate::inbound::http::error::ErrorBody)
    ),
    tag = "students",
    operation_id = "searchStudents"
)]
#[get("/students/search")]
pub async fn search_students(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<Student>>> {
    let term = match query.into_inner().name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(Error::invalid_request("Query parameter 'name' is required")),
    };
    let students = state.students.find_by_name_containing(&term).await?;
    Ok(web::Json(students))
}

/// Aggregate enrollment statistics across the student population.
#[utoipa::path(
    get,
    path = "/api/students/stats",
    responses((status = 200, description = "Enrollment statistics", body = EnrollmentStats)),
    tag = "students",
    operation_id = "studentStats"
)]
#[get("/students/stats")]
pub async fn get_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<EnrollmentStats>> {
    let stats = collect_stats(state.students.as_ref()).await?;
    Ok(web::Json(stats))
}

/// Compute the statistics payload from the repository's aggregate queries.
async fn collect_stats(repo: &dyn StudentRepository) -> Result<EnrollmentStats, Error> {
    let total_students = repo.count().await?;
    let enrolled_students = repo.count_enrolled().await?;

    let mut enrollments_by_course = BTreeMap::new();
    for course in Course::ALL {
        let enrolled = repo.find_by_course(course).await?.len() as u64;
        if enrolled > 0 {
            enrollments_by_course.insert(course.as_str().to_owned(), enrolled);
        }
    }

    Ok(EnrollmentStats {
        total_students,
        enrolled_students,
        unenrolled_students: total_students.saturating_sub(enrolled_students),
        enrollments_by_course,
    })
}

/// Fetch a single student by identifier.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 400, description = "Malformed identifier", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "No such student", body = crate::inbound::http::error::ErrorBody)
    ),
    tag = "students",
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Student>> {
    let id = parse_id(&path.into_inner())?;
    let student = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(web::Json(student))
}

/// Create a new student record.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = NewStudentRequest,
    responses(
        (status = 201, description = "Created student", body = Student),
        (status = 400, description = "Missing required field", body = crate::inbound::http::error::ErrorBody),
        (status = 409, description = "Email already in use", body = crate::inbound::http::error::ErrorBody)
    ),
    tag = "students",
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<NewStudentRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let first_name = required(payload.first_name, "First name is required")?;
    let last_name = required(payload.last_name, "Last name is required")?;
    let email = required(payload.email, "Email is required")?;

    let mut student = Student::new(first_name, last_name, email);
    if let Some(date) = payload.enrollment_date {
        student.enrollment_date = date;
    }

    let saved = state.students.save(student).await?;
    Ok(HttpResponse::Created().json(saved))
}

/// Update an existing student, merging only the supplied fields.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Merged, persisted student", body = Student),
        (status = 400, description = "Malformed identifier", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "No such student", body = crate::inbound::http::error::ErrorBody),
        (status = 409, description = "Email already in use", body = crate::inbound::http::error::ErrorBody)
    ),
    tag = "students",
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStudentRequest>,
) -> ApiResult<web::Json<Student>> {
    let id = parse_id(&path.into_inner())?;
    let mut existing = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let updates = payload.into_inner();
    if let Some(first_name) = updates.first_name {
        existing.first_name = first_name;
    }
    if let Some(last_name) = updates.last_name {
        existing.last_name = last_name;
    }
    if let Some(email) = updates.email {
        existing.email = email;
    }

    let saved = state.students.save(existing).await?;
    Ok(web::Json(saved))
}

/// Delete a student record.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 400, description = "Malformed identifier", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "No such student", body = crate::inbound::http::error::ErrorBody)
    ),
    tag = "students",
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path.into_inner())?;
    // Existence is checked up front so a missing record is reported as 404
    // regardless of how the storage layer treats deletes of absent rows.
    if !state.students.exists_by_id(id).await? {
        return Err(not_found(id));
    }
    state.students.delete_by_id(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Enrol a student in a course. Enrolling twice in the same course is a
/// no-op, not an error.
#[utoipa::path(
    post,
    path = "/api/students/{id}/enroll",
    params(("id" = String, Path, description = "Student identifier")),
    request_body = EnrollmentRequest,
    responses(
        (status = 200, description = "Updated student", body = Student),
        (status = 400, description = "Malformed identifier or missing course", body = crate::inbound::http::error::ErrorBody),
        (status = 404, description = "No such student", body = crate::inbound::http::error::ErrorBody)
    ),
    tag = "students",
    operation_id = "enrollStudent"
)]
#[post("/students/{id}/enroll")]
pub async fn enroll_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<EnrollmentRequest>,
) -> ApiResult<web::Json<Student>> {
    let id = parse_id(&path.into_inner())?;
    let course = payload
        .into_inner()
        .course
        .ok_or_else(|| Error::invalid_request("Course is required"))?;

    let mut student = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    student.enroll(course);
    let saved = state.students.save(student).await?;
    Ok(web::Json(saved))
}
