//! HTTP tests for the complaints endpoints over in-memory adapters.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockComplaintManagement;
use crate::inbound::http::test_utils::{memory_state, test_app};
use crate::inbound::http::validation::REQUIRED_FIELDS_MESSAGE;

fn complaint_body(title: &str) -> Value {
    json!({
        "title": title,
        "category": ["Roads", "Safety"],
        "complaintType": "Infrastructure",
        "areaType": "Urban",
        "description": "Deep pothole outside the school gates",
        "days": 3,
        "location": "Station Road",
        "latitude": 53.8,
        "longitude": -1.55,
    })
}

#[actix_web::test]
async fn creates_complaints_with_sequential_ids() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let mut ids = Vec::new();
    for title in ["Pothole", "Streetlight"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/complaints")
                .set_json(complaint_body(title))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "Pending");
        assert_eq!(body["isClosed"], false);
        ids.push(body["complaintId"].as_str().expect("complaintId").to_owned());
    }

    assert_eq!(ids, ["CMP0001", "CMP0002"]);
}

#[actix_web::test]
async fn accepts_a_single_category_string() {
    let mut body = complaint_body("Flooding");
    body["category"] = json!("Water");
    let app = actix_test::init_service(test_app(memory_state())).await;
    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/complaints")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(created["category"], json!(["Water"]));
}

#[rstest]
#[case("title")]
#[case("category")]
#[case("complaintType")]
#[case("areaType")]
#[case("description")]
#[case("days")]
#[case("location")]
#[actix_web::test]
async fn missing_required_field_is_rejected(#[case] field: &str) {
    let mut body = complaint_body("Pothole");
    body.as_object_mut().expect("object").remove(field);
    let app = actix_test::init_service(test_app(memory_state())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/complaints")
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], REQUIRED_FIELDS_MESSAGE);
    assert_eq!(body["details"]["fields"], json!([field]));
}

#[actix_web::test]
async fn negative_days_are_out_of_range() {
    let mut body = complaint_body("Pothole");
    body["days"] = json!(-1);
    let app = actix_test::init_service(test_app(memory_state())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/complaints")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn closed_complaints_only_show_under_closed_filter() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/complaints")
            .set_json(complaint_body("Graffiti"))
            .to_request(),
    )
    .await;
    let id = created["id"].as_str().expect("id");

    let updated: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/complaints/{id}"))
            .set_json(json!({"status": "Resolved", "isClosed": true, "complaintId": "CMP9999"}))
            .to_request(),
    )
    .await;
    assert_eq!(updated["complaintId"], "CMP0001");
    assert_eq!(updated["status"], "Resolved");

    for (uri, expected) in [
        ("/api/complaints", 0),
        ("/api/complaints?status=resolved", 0),
        ("/api/complaints?status=closed", 1),
    ] {
        let listed: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri(uri).to_request(),
        )
        .await;
        assert_eq!(listed.as_array().map(Vec::len), Some(expected), "{uri}");
    }
}

#[actix_web::test]
async fn filters_by_status_slug_and_category() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/complaints")
            .set_json(complaint_body("Broken bench"))
            .to_request(),
    )
    .await;
    let id = created["id"].as_str().expect("id");
    let _: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/complaints/{id}"))
            .set_json(json!({"status": "In Progress"}))
            .to_request(),
    )
    .await;

    let in_progress: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/complaints?status=in-progress&category=Safety&search=SCHOOL")
            .to_request(),
    )
    .await;
    assert_eq!(in_progress[0]["title"], "Broken bench");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/complaints?status=urgent")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn delete_returns_the_removed_complaint() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/complaints")
            .set_json(complaint_body("Fly tipping"))
            .to_request(),
    )
    .await;
    let uri = format!("/api/complaints/{}", created["id"].as_str().expect("id"));

    let deleted: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(deleted["message"], "Complaint deleted successfully");
    assert_eq!(deleted["complaint"]["complaintId"], "CMP0001");

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request())
            .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn identifier_conflicts_map_to_409() {
    let mut complaints = MockComplaintManagement::new();
    complaints
        .expect_create_complaint()
        .times(1)
        .returning(|_| Err(Error::conflict("identifier CMP0007 is already taken")));
    let mut state = memory_state();
    state.complaints = Arc::new(complaints);
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/complaints")
            .set_json(complaint_body("Pothole"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn lone_latitude_is_rejected() {
    let err = parse_coordinates(Some(10.0), None).expect_err("missing longitude");
    assert_eq!(err.details().expect("details")["field"], "longitude");
}
