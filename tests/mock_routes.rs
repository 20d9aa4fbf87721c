use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
    middleware,
    routing::get,
};
use chrono::{FixedOffset, TimeZone};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use serde_json::{Value, json};
use tower::ServiceExt;

use todo_backend::{
    db::entities::todo,
    middleware::{catch_panic_layer, json_error_middleware},
    test_helpers::{test_app, test_app_with_db},
};

const LEAKY_CAUSE: &str = "password authentication failed for user \"todo\"";

async fn json_response(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request should succeed");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json: Value = serde_json::from_slice(&body).expect("body should be json");
    (status, json)
}

fn failing_db() -> sea_orm::DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom(LEAKY_CAUSE.to_string())])
        .into_connection()
}

fn stored_todo(id: i32) -> todo::Model {
    let ts = FixedOffset::east_opt(0)
        .expect("offset should be valid")
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("timestamp should be valid");
    todo::Model {
        id,
        title: "stored".to_string(),
        completed: false,
        created_at: ts,
        updated_at: ts,
    }
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn store_failures_map_to_generic_500_without_details() {
    let cases = [
        (request("GET", "/api/todos/", None), "failed to fetch todos"),
        (request("GET", "/api/todos/1", None), "failed to fetch todo"),
        (
            request("POST", "/api/todos/", Some(json!({ "title": "x" }))),
            "failed to create todo",
        ),
        (
            request(
                "PUT",
                "/api/todos/1",
                Some(json!({ "title": "x", "completed": true })),
            ),
            "failed to update todo",
        ),
        (request("DELETE", "/api/todos/1", None), "failed to delete todo"),
    ];

    for (request, expected) in cases {
        let (status, json) = json_response(test_app_with_db(&failing_db()), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": expected }));
        assert!(!json.to_string().contains("password"));
    }
}

#[tokio::test]
async fn update_that_loses_a_race_surfaces_as_failed_write() {
    // The row is found, then the write fails as if it had been deleted meanwhile.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[stored_todo(1)]])
        .append_query_errors([DbErr::RecordNotUpdated])
        .into_connection();

    let (status, json) = json_response(
        test_app_with_db(&db),
        request(
            "PUT",
            "/api/todos/1",
            Some(json!({ "title": "renamed", "completed": true })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "failed to update todo" }));
}

#[tokio::test]
async fn validation_errors_never_touch_the_store() {
    // Any store access would fail this test with a 500.
    let (status, json) = json_response(
        test_app_with_db(&failing_db()),
        request("POST", "/api/todos/", Some(json!({ "title": "" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "title is required" }));

    let (status, json) = json_response(
        test_app_with_db(&failing_db()),
        request("DELETE", "/api/todos/abc", None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "invalid id" }));
}

#[tokio::test]
async fn unknown_route_is_normalized_to_json_error() {
    let (status, json) = json_response(test_app(), request("GET", "/api/unknown", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "Not Found" }));
}

#[tokio::test]
async fn unsupported_method_is_normalized_to_json_error() {
    let (status, json) = json_response(test_app(), request("PATCH", "/api/todos/1", None)).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json, json!({ "error": "Method Not Allowed" }));
}

#[tokio::test]
async fn panic_is_caught_and_returned_as_json() {
    async fn boom() -> &'static str {
        panic!("exploded while holding secrets")
    }

    let app = Router::new()
        .route("/boom", get(boom))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer());

    let (status, json) = json_response(app, request("GET", "/boom", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn cors_allows_configured_origin_only() {
    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/todos/")
        .header(header::ORIGIN, "http://localhost:4321")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = test_app()
        .oneshot(preflight)
        .await
        .expect("request should succeed");

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:4321"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    let foreign = Request::builder()
        .method("GET")
        .uri("/api/todos/")
        .header(header::ORIGIN, "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = test_app()
        .oneshot(foreign)
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
