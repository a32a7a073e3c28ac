//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    extract::{multipart::MultipartRejection, rejection::QueryRejection, Multipart, Query, State},
    Json,
};
use tracing::info;

use super::dto::{
    HealthResponse, IdentifyResponse, PlantObservation, PlantsQueryParams, RootResponse,
    StatsResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Multipart field names accepted for the uploaded image.
const UPLOAD_FIELDS: [&str; 2] = ["file", "image"];

fn utc_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

// =============================================================================
// Informational
// =============================================================================

/// GET /
pub async fn root() -> Json<RootResponse> {
    let endpoints = [
        ("/api/plants", "Query plant observations by region and filters"),
        ("/api/stats", "Observation counts per region"),
        ("/api/identify", "Identify a plant from an uploaded photo"),
        ("/api/health", "Health check endpoint"),
    ]
    .into_iter()
    .map(|(path, description)| (path.to_string(), description.to_string()))
    .collect::<BTreeMap<_, _>>();

    Json(RootResponse {
        name: "NW Native Plant Explorer API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Discover native plants of the Pacific Northwest".to_string(),
        endpoints,
        data_source: "iNaturalist API (api.inaturalist.org)".to_string(),
    })
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: utc_timestamp(),
        service: "nw-native-plant-api".to_string(),
    })
}

// =============================================================================
// Plants
// =============================================================================

/// GET /api/plants
///
/// Research-grade native plant observations for a region, optionally
/// filtered by climate zone and a name search.
pub async fn get_plants(
    State(state): State<AppState>,
    params: Result<Query<PlantsQueryParams>, QueryRejection>,
) -> HandlerResult<Vec<PlantObservation>> {
    let Query(params) = params?;
    let query = params.validate().map_err(AppError::BadRequest)?;

    let observations = services::query_plants(state.source.as_ref(), &query).await?;
    Ok(Json(observations))
}

/// GET /api/stats
///
/// Observation counts for every region. Regions whose count could not be
/// fetched are left out.
pub async fn get_stats(State(state): State<AppState>) -> HandlerResult<StatsResponse> {
    let regions = services::aggregate_region_stats(state.source.as_ref()).await;

    Ok(Json(StatsResponse {
        total_pnw: regions.total_pnw,
        regions,
        timestamp: utc_timestamp(),
    }))
}

// =============================================================================
// Identification
// =============================================================================

/// POST /api/identify
///
/// Multipart upload with the photo in a `file` (or `image`) field.
pub async fn identify_plant(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> HandlerResult<IdentifyResponse> {
    let started = Instant::now();
    let mut multipart = multipart?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if !UPLOAD_FIELDS.contains(&name.as_str()) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        upload = Some((bytes.to_vec(), content_type));
        break;
    }

    let (bytes, content_type) = upload
        .ok_or_else(|| AppError::BadRequest("Missing image upload field 'file'".to_string()))?;
    info!(bytes = bytes.len(), content_type = ?content_type, "Identification requested");

    let results = state
        .identifier
        .identify(bytes, content_type.as_deref())
        .await?;

    Ok(Json(IdentifyResponse {
        results,
        processing_time: started.elapsed().as_secs_f64(),
    }))
}
