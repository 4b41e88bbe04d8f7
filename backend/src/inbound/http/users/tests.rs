//! Tests for users API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockUsersCommand, MockUsersQuery};
use crate::domain::{Gender, UserStore, UserStoreService, default_users};

const MARTHA_ID: &str = "72398210-5dbb-4566-ada9-e992d8df1b09";

#[fixture]
fn service() -> Arc<UserStoreService> {
    Arc::new(UserStoreService::new(UserStore::seeded()))
}

async fn call(
    service: Arc<UserStoreService>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    call_state(HttpState::from_service(service), request).await
}

async fn call_state(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api").configure(configure)),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn list_returns_every_user_in_order(service: Arc<UserStoreService>) {
    let (status, body) = call(service, actix_test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|user| user["firstname"].as_str())
        .collect();
    assert_eq!(names, ["Johnny", "Martha", "Caryl"]);
}

#[rstest]
#[actix_web::test]
async fn list_counts_seeded_users() {
    let service = Arc::new(UserStoreService::new(UserStore::with_users(
        default_users().into_iter().take(2),
    )));
    let (status, body) = call(service, actix_test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
}

#[rstest]
#[actix_web::test]
async fn list_of_empty_store_is_ok() {
    let service = Arc::new(UserStoreService::default());
    let (status, body) = call(service, actix_test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": []}));
}

#[rstest]
#[actix_web::test]
async fn get_returns_stored_user(service: Arc<UserStoreService>) {
    let uri = format!("/api/users/{MARTHA_ID}");
    let (status, body) = call(service, actix_test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "_id": MARTHA_ID,
            "firstname": "Martha",
            "lastname": "Peach",
            "age": 32,
            "gender": "Female",
        })
    );
}

#[rstest]
#[case::get(actix_test::TestRequest::get())]
#[case::delete(actix_test::TestRequest::delete())]
#[case::patch(actix_test::TestRequest::patch().set_json(json!({"age": 40})))]
#[actix_web::test]
async fn unknown_ids_answer_404_with_null(
    service: Arc<UserStoreService>,
    #[case] request: actix_test::TestRequest,
) {
    let (status, body) = call(service, request.uri("/api/users/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn patch_merges_fields(service: Arc<UserStoreService>) {
    let uri = format!("/api/users/{MARTHA_ID}");
    let request = actix_test::TestRequest::patch()
        .uri(&uri)
        .set_json(json!({"age": 34, "_id": "ignored"}));
    let (status, body) = call(service.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], MARTHA_ID);
    assert_eq!(body["age"], 34);
    assert_eq!(body["firstname"], "Martha");

    let (_, stored) = call(service, actix_test::TestRequest::get().uri(&uri)).await;
    assert_eq!(stored, body);
}

#[rstest]
#[actix_web::test]
async fn post_creates_user_with_fresh_id(service: Arc<UserStoreService>) {
    let request = actix_test::TestRequest::post().uri("/api/users").set_json(json!({
        "_id": MARTHA_ID,
        "firstname": "Timmy",
        "lastname": "Timmerson",
        "age": 19,
        "gender": "Male",
    }));
    let (status, body) = call(service.clone(), request).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["_id"].as_str().expect("generated id");
    assert_ne!(id, MARTHA_ID);
    assert_eq!(body["firstname"], "Timmy");
    assert_eq!(body["gender"], Gender::Male.as_str());
    assert_eq!(service.len().expect("healthy lock"), 4);
}

#[rstest]
#[actix_web::test]
async fn delete_then_get_is_404(service: Arc<UserStoreService>) {
    let uri = format!("/api/users/{MARTHA_ID}");
    let (status, body) = call(service.clone(), actix_test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lastname"], "Peach");

    let (status, body) = call(service, actix_test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
}

#[rstest]
#[case::syntax("{\"firstname\":")]
#[case::wrong_type("{\"firstname\":\"Timmy\",\"lastname\":\"Timmerson\",\"age\":\"old\",\"gender\":\"Male\"}")]
#[case::missing_field("{\"firstname\":\"Timmy\"}")]
#[case::unknown_gender("{\"firstname\":\"Timmy\",\"lastname\":\"Timmerson\",\"age\":19,\"gender\":\"Other\"}")]
#[actix_web::test]
async fn malformed_post_bodies_answer_500(service: Arc<UserStoreService>, #[case] body: &str) {
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_owned());
    let (status, value) = call(service.clone(), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["code"], "malformed_request");
    assert_eq!(value["details"]["kind"], "deserialize");
    assert_eq!(service.len().expect("healthy lock"), 3);
}

#[rstest]
#[actix_web::test]
async fn malformed_patch_of_known_user_answers_500(service: Arc<UserStoreService>) {
    let request = actix_test::TestRequest::patch()
        .uri(&format!("/api/users/{MARTHA_ID}"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"age\": \"thirty\"}");
    let (status, value) = call(service, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["code"], "malformed_request");
}

#[rstest]
#[actix_web::test]
async fn malformed_patch_of_unknown_user_answers_404(service: Arc<UserStoreService>) {
    let request = actix_test::TestRequest::patch()
        .uri("/api/users/does-not-exist")
        .insert_header(("content-type", "application/json"))
        .set_payload("not json");
    let (status, value) = call(service, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .times(1)
        .returning(|| Err(Error::internal("user store unavailable")));
    let command = MockUsersCommand::new();
    let state = HttpState::new(Arc::new(query), Arc::new(command));

    let (status, body) = call_state(state, actix_test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn delete_failure_after_lookup_is_500() {
    let query = MockUsersQuery::new();
    let mut command = MockUsersCommand::new();
    command
        .expect_delete_user()
        .times(1)
        .returning(|_| Err(Error::internal("removal failed")));
    let state = HttpState::new(Arc::new(query), Arc::new(command));

    let request = actix_test::TestRequest::delete().uri(&format!("/api/users/{MARTHA_ID}"));
    let (status, body) = call_state(state, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal_error");
}
