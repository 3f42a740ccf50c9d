mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use weekly_timetable::server;

async fn post_solve(body: Value) -> (StatusCode, Vec<u8>) {
    let response = server::app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/timetable/solve")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn solve_returns_the_timetable() {
    let (status, body) = post_solve(common::paired_programs()).await;
    assert_eq!(status, StatusCode::OK);

    let output: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(output["cells"].as_array().unwrap().len(), 13);
    assert!(output["shortfalls"].as_array().unwrap().is_empty());
    assert_eq!(output["table"]["header"][2], "Software / Year 1");
    assert_eq!(output["table"]["rows"].as_array().unwrap().len(), 60);
}

#[tokio::test]
async fn missing_instructors_is_a_bad_request() {
    let mut input = common::paired_programs();
    input["instructors"] = json!([]);
    let (status, body) = post_solve(input).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("no instructor data"));
}

#[tokio::test]
async fn invalid_config_is_a_bad_request() {
    let mut input = common::paired_programs();
    input["config"]["sharedPairs"] = json!([[1, 5]]);
    let (status, _) = post_solve(input).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn slot_catalog_is_served() {
    let response = server::app()
        .oneshot(
            Request::builder()
                .uri("/v1/timetable/slots")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let catalog: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(catalog["days"].as_array().unwrap().len(), 5);
    assert_eq!(catalog["days"][0], "monday");
    assert_eq!(catalog["slots"][0], "09:00-10:00");
    assert_eq!(catalog["slots"][11], "20:00-21:00");
}
