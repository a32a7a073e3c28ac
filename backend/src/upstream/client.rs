//! reqwest-backed client for the iNaturalist observations endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::error::{FetchError, FetchResult};
use super::query::ObservationQuery;
use super::source::ObservationSource;
use crate::config::InaturalistSettings;
use crate::models::RawObservationBatch;

const USER_AGENT: &str = concat!("nw-plant-explorer/", env!("CARGO_PKG_VERSION"));

/// Live observation source.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct InatClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl InatClient {
    pub fn new(settings: &InaturalistSettings) -> FetchResult<Self> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn observations_url(&self) -> String {
        format!("{}/observations", self.base_url)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ObservationSource for InatClient {
    async fn fetch(&self, query: &ObservationQuery) -> FetchResult<RawObservationBatch> {
        let url = self.observations_url();
        let started = Instant::now();
        debug!(place_id = query.place_id, per_page = query.per_page, "GET {}", url);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                place_id = query.place_id,
                "iNaturalist returned an error status"
            );
            return Err(FetchError::upstream(status.as_u16(), body));
        }

        let batch = RawObservationBatch::from_json(&body).map_err(|e| {
            FetchError::internal(format!("Invalid response from iNaturalist: {}", e))
        })?;

        info!(
            place_id = query.place_id,
            total_results = batch.total_results,
            returned = batch.results.len(),
            "Fetched observations in {:.3}s",
            started.elapsed().as_secs_f64()
        );

        Ok(batch)
    }
}
