#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use nw_plant_explorer::http::{create_router, AppState};
use nw_plant_explorer::models::{PlantObservation, RawObservationBatch, Region};
use nw_plant_explorer::services::PlantIdentifier;
use nw_plant_explorer::upstream::{FetchError, StaticSource};

mod support;

fn app_with(source: StaticSource) -> Router {
    create_router(AppState::new(Arc::new(source), PlantIdentifier::mock_only()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_upload(app: Router, field: &str, content_type: &str, bytes: &[u8]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/identify")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", support::BOUNDARY),
        )
        .body(Body::from(support::multipart_body(field, content_type, bytes)))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_and_health() {
    let (status, body) = get(app_with(StaticSource::new()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "NW Native Plant Explorer API");
    assert!(body["endpoints"]["/api/plants"].is_string());

    let (status, body) = get(app_with(StaticSource::new()), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "nw-native-plant-api");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_plants_default_region() {
    let source = StaticSource::new().with_batch(Region::Washington, support::sample_batch());
    let (status, body) = get(app_with(source.clone()), "/api/plants").await;

    assert_eq!(status, StatusCode::OK);
    let plants: Vec<PlantObservation> = serde_json::from_value(body.clone()).unwrap();
    let ids: Vec<i64> = plants.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![101, 102, 104, 105]);

    let first = &body[0];
    assert_eq!(first["scientific_name"], "Polystichum munitum");
    assert_eq!(first["climate_zone"], "Puget Sound Lowlands");
    assert_eq!(
        first["photo_url"],
        "https://inaturalist-open-data.s3.amazonaws.com/photos/1/medium.jpg"
    );
    assert!(body[1]["photo_url"].is_null());
    assert!(body[2]["common_name"].is_null());

    let sent = source.queries();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].place_id, 14);
    assert_eq!(sent[0].per_page, 50);
}

#[tokio::test]
async fn test_plants_climate_filter_and_search() {
    let source = StaticSource::new().with_batch(Region::Washington, support::sample_batch());
    let (status, body) = get(
        app_with(source.clone()),
        "/api/plants?region=washington&climate_type=cascade-east&taxon=pine&per_page=20",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let plants = body.as_array().unwrap();
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0]["id"], 102);
    assert_eq!(plants[0]["climate_zone"], "East Cascades (Dry/Rain Shadow)");

    let sent = source.queries();
    assert_eq!(sent[0].q.as_deref(), Some("pine"));
    assert_eq!(sent[0].per_page, 20);
}

#[tokio::test]
async fn test_plants_rejects_invalid_parameters() {
    for uri in [
        "/api/plants?region=montana",
        "/api/plants?climate_type=alpine",
        "/api/plants?per_page=0",
        "/api/plants?per_page=500",
        "/api/plants?per_page=lots",
    ] {
        let (status, body) = get(app_with(StaticSource::new()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_plants_upstream_error_passes_status_through() {
    let source = StaticSource::new()
        .with_failure(Region::Oregon, FetchError::upstream(422, "{\"error\":\"bad place\"}"));
    let (status, body) = get(app_with(source), "/api/plants?region=oregon").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert_eq!(body["message"], "iNaturalist API error: {\"error\":\"bad place\"}");
}

#[tokio::test]
async fn test_plants_unavailable_is_503() {
    let source = StaticSource::new()
        .with_failure(Region::Idaho, FetchError::unavailable("connection refused"));
    let (status, body) = get(app_with(source), "/api/plants?region=idaho").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body["message"],
        "Failed to connect to iNaturalist API: connection refused"
    );
}

#[tokio::test]
async fn test_stats_with_one_failed_region() {
    let source = StaticSource::new()
        .with_batch(Region::Washington, RawObservationBatch::new(1000, vec![]))
        .with_batch(Region::Oregon, RawObservationBatch::new(500, vec![]))
        .with_failure(Region::Idaho, FetchError::upstream(500, "oops"))
        .with_batch(Region::California, RawObservationBatch::new(250, vec![]));

    let (status, body) = get(app_with(source), "/api/stats").await;

    assert_eq!(status, StatusCode::OK);
    let regions = body["regions"].as_object().unwrap();
    // Three regions plus the total.
    assert_eq!(regions.len(), 4);
    assert!(regions.get("idaho").is_none());
    assert_eq!(regions["washington"]["total_observations"], 1000);
    assert_eq!(regions["washington"]["place_id"], 14);
    assert_eq!(regions["total_pnw"], 1750);
    assert_eq!(body["total_pnw"], 1750);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_identify_returns_mock_results() {
    let png = support::png_bytes();
    let (status, body) =
        post_upload(app_with(StaticSource::new()), "file", "image/png", &png).await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["scientific_name"], "Pseudotsuga menziesii");
    assert_eq!(results[0]["confidence"], 0.87);
    assert!(body["processing_time"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_identify_rejects_non_image() {
    let (status, body) = post_upload(
        app_with(StaticSource::new()),
        "file",
        "text/plain",
        b"hello",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("image"));
}

#[tokio::test]
async fn test_identify_rejects_corrupt_image() {
    let (status, body) = post_upload(
        app_with(StaticSource::new()),
        "image",
        "image/jpeg",
        b"\xff\xd8\xff\xe0 truncated",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid image file"));
}

#[tokio::test]
async fn test_identify_requires_file_field() {
    let png = support::png_bytes();
    let (status, body) =
        post_upload(app_with(StaticSource::new()), "attachment", "image/png", &png).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn test_identify_rejects_non_multipart_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/identify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app_with(StaticSource::new()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}
