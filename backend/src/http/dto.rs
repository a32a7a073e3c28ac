//! Data Transfer Objects for the HTTP API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ClimateFilter, IdentificationMatch, Region, RegionStats};
use crate::services::{PlantQuery, DEFAULT_PER_PAGE, MAX_PER_PAGE};

pub use crate::models::PlantObservation;

/// Query parameters for `GET /api/plants`, as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlantsQueryParams {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub climate_type: Option<String>,
    /// Common or scientific name search, e.g. "fern" or "Polystichum"
    #[serde(default)]
    pub taxon: Option<String>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PlantsQueryParams {
    /// Validate against the accepted values and apply defaults.
    pub fn validate(self) -> Result<PlantQuery, String> {
        let region = match self.region.as_deref() {
            None => Region::default(),
            Some(value) => value.parse::<Region>()?,
        };
        let climate = match self.climate_type.as_deref() {
            None => ClimateFilter::All,
            Some(value) => value.parse::<ClimateFilter>()?,
        };
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(format!(
                "per_page must be between 1 and {} (got {})",
                MAX_PER_PAGE, per_page
            ));
        }

        Ok(PlantQuery {
            region,
            climate,
            search: self.taxon,
            per_page,
        })
    }
}

/// Response for `GET /api/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Per-region counts, plus `total_pnw`
    pub regions: RegionStats,
    pub total_pnw: u64,
    pub timestamp: String,
}

/// Response for `POST /api/identify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyResponse {
    pub results: Vec<IdentificationMatch>,
    /// Seconds spent handling the upload
    pub processing_time: f64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// Service description served at `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: BTreeMap<String, String>,
    pub data_source: String,
}
