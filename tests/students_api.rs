//! End-to-end tests exercising the full HTTP surface against the in-memory
//! repository, as the service runs when no database is configured.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use serde_json::{json, Value};

use student_service::inbound;
use student_service::inbound::http::state::HttpState;
use student_service::outbound::persistence::InMemoryStudentRepository;

fn app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(InMemoryStudentRepository::new()));
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api").configure(inbound::http::configure))
}

async fn create_student(
    service: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    first: &str,
    last: &str,
    email: &str,
) -> Value {
    let request = actix_test::TestRequest::post()
        .uri("/api/students")
        .set_json(json!({ "firstName": first, "lastName": last, "email": email }))
        .to_request();
    let response = actix_test::call_service(service, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

async fn enroll(
    service: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    id: i64,
    course: &str,
) -> Value {
    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/students/{id}/enroll"))
        .set_json(json!({ "course": course }))
        .to_request();
    let response = actix_test::call_service(service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn student_lifecycle_create_enroll_search_delete() {
    let service = actix_test::init_service(app()).await;

    let created = create_student(&service, "John", "Doe", "john.doe@example.com").await;
    let id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["firstName"], "John");
    assert_eq!(created["enrolledCourses"], json!([]));

    let enrolled = enroll(&service, id, "COMPUTER_SCIENCE").await;
    assert_eq!(enrolled["enrolledCourses"], json!(["COMPUTER_SCIENCE"]));

    let request = actix_test::TestRequest::get()
        .uri("/api/students/search?name=doe")
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let matches: Value = actix_test::read_body_json(response).await;
    assert_eq!(matches.as_array().map(Vec::len), Some(1));
    assert_eq!(matches[0]["id"], id);

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/students/{id}"))
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/students/{id}"))
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], format!("Student not found with id: {id}"));
}

#[actix_web::test]
async fn listing_orders_students_by_name() {
    let service = actix_test::init_service(app()).await;
    create_student(&service, "Charlie", "Young", "cy@example.com").await;
    create_student(&service, "Beth", "Adams", "ba@example.com").await;
    create_student(&service, "Adam", "Young", "ay@example.com").await;

    let request = actix_test::TestRequest::get().uri("/api/students").to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let emails: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .map(|s| s["email"].as_str().expect("email"))
        .collect();
    assert_eq!(emails, vec!["ba@example.com", "ay@example.com", "cy@example.com"]);
}

#[actix_web::test]
async fn duplicate_email_is_reported_as_conflict() {
    let service = actix_test::init_service(app()).await;
    create_student(&service, "John", "Doe", "john.doe@example.com").await;

    let request = actix_test::TestRequest::post()
        .uri("/api/students")
        .set_json(json!({
            "firstName": "Jane",
            "lastName": "Roe",
            "email": "john.doe@example.com"
        }))
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["error"],
        "A student with email john.doe@example.com already exists"
    );
}

#[actix_web::test]
async fn update_replaces_only_the_fields_supplied() {
    let service = actix_test::init_service(app()).await;
    let created = create_student(&service, "John", "Doe", "john.doe@example.com").await;
    let id = created["id"].as_i64().expect("assigned id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/students/{id}"))
        .set_json(json!({ "email": "jdoe@example.com" }))
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["lastName"], "Doe");
    assert_eq!(body["email"], "jdoe@example.com");
}

#[actix_web::test]
async fn stats_reflect_the_population() {
    let service = actix_test::init_service(app()).await;
    let john = create_student(&service, "John", "Doe", "john.doe@example.com").await;
    create_student(&service, "Ada", "Lovelace", "ada@example.com").await;
    let id = john["id"].as_i64().expect("assigned id");
    enroll(&service, id, "COMPUTER_SCIENCE").await;
    enroll(&service, id, "MATHEMATICS").await;

    let request = actix_test::TestRequest::get()
        .uri("/api/students/stats")
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["totalStudents"], 2);
    assert_eq!(body["enrolledStudents"], 1);
    assert_eq!(body["unenrolledStudents"], 1);
    assert_eq!(
        body["enrollmentsByCourse"],
        json!({ "COMPUTER_SCIENCE": 1, "MATHEMATICS": 1 })
    );
}

#[actix_web::test]
async fn unknown_course_in_enrollment_payload_is_a_bad_request() {
    let service = actix_test::init_service(app()).await;
    let created = create_student(&service, "John", "Doe", "john.doe@example.com").await;
    let id = created["id"].as_i64().expect("assigned id");

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/students/{id}/enroll"))
        .set_json(json!({ "course": "UNDERWATER_BASKET_WEAVING" }))
        .to_request();
    let response = actix_test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
