//! In-memory observation source.
//!
//! Answers queries from canned batches keyed by place identifier, and keeps
//! every query it receives so tests can assert on what would have been
//! sent upstream. The query log is never trimmed; use one source per test.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{FetchError, FetchResult};
use super::query::ObservationQuery;
use super::source::ObservationSource;
use crate::models::{RawObservationBatch, Region};

#[derive(Clone, Default)]
pub struct StaticSource {
    data: Arc<Mutex<StaticData>>,
}

#[derive(Default)]
struct StaticData {
    responses: HashMap<u32, FetchResult<RawObservationBatch>>,
    queries: Vec<ObservationQuery>,
}

impl StaticSource {
    /// Create a source with no canned responses; every fetch returns an
    /// empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries for `region` with `batch`.
    pub fn with_batch(self, region: Region, batch: RawObservationBatch) -> Self {
        self.data
            .lock()
            .responses
            .insert(region.place_id(), Ok(batch));
        self
    }

    /// Fail queries for `region` with `error`.
    pub fn with_failure(self, region: Region, error: FetchError) -> Self {
        self.data
            .lock()
            .responses
            .insert(region.place_id(), Err(error));
        self
    }

    /// Every query received so far, in arrival order.
    pub fn queries(&self) -> Vec<ObservationQuery> {
        self.data.lock().queries.clone()
    }
}

#[async_trait]
impl ObservationSource for StaticSource {
    async fn fetch(&self, query: &ObservationQuery) -> FetchResult<RawObservationBatch> {
        let mut data = self.data.lock();
        data.queries.push(query.clone());

        match data.responses.get(&query.place_id) {
            Some(Ok(batch)) => {
                let mut batch = batch.clone();
                batch.results.truncate(query.per_page as usize);
                Ok(batch)
            }
            Some(Err(e)) => Err(e.clone()),
            None => Ok(RawObservationBatch::default()),
        }
    }
}
