//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod students;

pub use error::ApiResult;

use actix_web::web;

/// Register every student route on a scope.
///
/// `/students/search` and `/students/stats` are registered ahead of
/// `/students/{id}` so the literal segments win route matching.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(students::list_students)
        .service(students::search_students)
        .service(students::get_stats)
        .service(students::create_student)
        .service(students::get_student)
        .service(students::update_student)
        .service(students::delete_student)
        .service(students::enroll_student);
}
