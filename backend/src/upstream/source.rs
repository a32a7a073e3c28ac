//! The seam between services and the observations API.

use async_trait::async_trait;

use super::error::FetchResult;
use super::query::ObservationQuery;
use crate::models::RawObservationBatch;

/// Something that can answer an observation search.
///
/// Services only depend on this trait, so they run unchanged against the
/// live API ([`InatClient`](super::InatClient)) or an in-memory source
/// ([`StaticSource`](super::StaticSource)).
///
/// A fetch is a single attempt: implementations do not retry.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    async fn fetch(&self, query: &ObservationQuery) -> FetchResult<RawObservationBatch>;
}
