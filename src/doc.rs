//! OpenAPI documentation for the student service.

use actix_web::{get, web};
use utoipa::OpenApi;

use crate::domain::{Course, EnrollmentStats, Student, StudentId};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::students::{
    EnrollmentRequest, NewStudentRequest, UpdateStudentRequest,
};
use crate::inbound::http::{health, students};

/// Aggregated OpenAPI specification for every exposed route.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Service",
        description = "Record management for students and their course enrollments."
    ),
    paths(
        students::list_students,
        students::search_students,
        students::get_stats,
        students::get_student,
        students::create_student,
        students::update_student,
        students::delete_student,
        students::enroll_student,
        health::ready,
        health::live,
    ),
    components(schemas(
        Student,
        StudentId,
        Course,
        EnrollmentStats,
        NewStudentRequest,
        UpdateStudentRequest,
        EnrollmentRequest,
        ErrorBody,
    )),
    tags(
        (name = "students", description = "Student records and enrollment"),
        (name = "health", description = "Probe endpoints")
    )
)]
pub struct ApiDoc;

/// Serve the generated specification as JSON. Registered in debug builds
/// only.
#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_every_student_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for route in [
            "/api/students",
            "/api/students/search",
            "/api/students/stats",
            "/api/students/{id}",
            "/api/students/{id}/enroll",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(route), "missing path: {route}");
        }
    }

    #[test]
    fn document_serialises_to_json() {
        let json = ApiDoc::openapi().to_json().expect("serialisable document");
        assert!(json.contains("COMPUTER_SCIENCE"));
        assert!(json.contains("enrollmentsByCourse"));
    }
}
