//! Fetch → map → climate filter → collect.

use tracing::{debug, info};

use crate::models::{ClimateFilter, PlantObservation, RawObservationBatch, Region};
use crate::upstream::{FetchResult, ObservationQuery, ObservationSource};

use super::mapper::map_observation;

pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 200;

/// A validated plant query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantQuery {
    pub region: Region,
    pub climate: ClimateFilter,
    pub search: Option<String>,
    pub per_page: u32,
}

impl Default for PlantQuery {
    fn default() -> Self {
        Self {
            region: Region::default(),
            climate: ClimateFilter::All,
            search: None,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PlantQuery {
    pub fn to_observation_query(&self) -> ObservationQuery {
        ObservationQuery::builder(self.region)
            .per_page(self.per_page)
            .search(self.search.as_deref())
            .build()
    }
}

/// Map and filter a raw batch, keeping upstream order.
pub fn filter_batch(batch: &RawObservationBatch, climate: ClimateFilter) -> Vec<PlantObservation> {
    batch
        .results
        .iter()
        .filter_map(map_observation)
        .filter(|obs| {
            let admitted = climate.admits(obs.climate_zone);
            if !admitted {
                debug!(id = obs.id, zone = %obs.climate_zone, filter = %climate, "Excluded by climate filter");
            }
            admitted
        })
        .collect()
}

/// Run a plant query against `source`.
///
/// Upstream failures propagate unchanged; record-level problems never do.
pub async fn query_plants(
    source: &dyn ObservationSource,
    query: &PlantQuery,
) -> FetchResult<Vec<PlantObservation>> {
    let params = query.to_observation_query();
    let batch = source.fetch(&params).await?;
    let observations = filter_batch(&batch, query.climate);

    info!(
        region = %query.region,
        climate = %query.climate,
        fetched = batch.results.len(),
        returned = observations.len(),
        "Plant query complete"
    );

    Ok(observations)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;
