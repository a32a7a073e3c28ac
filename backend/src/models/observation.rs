//! Observation records: the raw upstream shape and the normalized output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ClimateZone, Region};

/// A plant observation as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantObservation {
    /// iNaturalist observation ID
    pub id: i64,
    /// Scientific name, `"Unknown"` when the upstream taxon has none
    pub scientific_name: String,
    pub common_name: Option<String>,
    /// Medium-size rendition of the first photo
    pub photo_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Observation date (YYYY-MM-DD), empty when unknown
    pub observed_on: String,
    /// Human-readable location description
    pub place_guess: String,
    pub climate_zone: ClimateZone,
    /// research, needs_id or casual
    pub quality_grade: String,
    /// species, genus, ...
    pub taxon_rank: Option<String>,
}

/// One record of the upstream `results` array.
///
/// Every field is optional; what is required for output is decided by the
/// mapper, not by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(default)]
    pub id: Option<i64>,
    /// `"lat,lon"`
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub taxon: Option<RawTaxon>,
    #[serde(default)]
    pub photos: Option<Vec<RawPhoto>>,
    #[serde(default)]
    pub observed_on: Option<String>,
    #[serde(default)]
    pub place_guess: Option<String>,
    #[serde(default)]
    pub quality_grade: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTaxon {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferred_common_name: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub url: Option<String>,
}

/// The upstream search envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawObservationBatch {
    pub total_results: u64,
    pub results: Vec<RawObservation>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    results: Option<Vec<serde_json::Value>>,
}

impl RawObservationBatch {
    pub fn new(total_results: u64, results: Vec<RawObservation>) -> Self {
        Self {
            total_results,
            results,
        }
    }

    /// Parse an upstream envelope.
    ///
    /// Records are decoded one at a time; a record whose fields have the
    /// wrong JSON types is dropped instead of failing the whole batch.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let envelope: Envelope = serde_json::from_str(body)?;

        let results = envelope
            .results
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<RawObservation>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("Dropping malformed observation record: {}", e);
                    None
                }
            })
            .collect();

        Ok(Self {
            total_results: envelope.total_results.unwrap_or(0),
            results,
        })
    }
}

/// Observation count for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStat {
    pub total_observations: u64,
    pub place_id: u32,
}

/// Per-region counts plus their sum.
///
/// Only regions whose fetch succeeded are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStats {
    #[serde(flatten)]
    pub regions: BTreeMap<Region, RegionStat>,
    pub total_pnw: u64,
}

impl RegionStats {
    pub fn from_regions(regions: BTreeMap<Region, RegionStat>) -> Self {
        let total_pnw = regions.values().map(|stat| stat.total_observations).sum();
        Self { regions, total_pnw }
    }
}
