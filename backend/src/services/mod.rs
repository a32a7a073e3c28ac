//! Service layer: business logic between the HTTP handlers and the
//! upstream APIs.
//!
//! - [`mapper`]: raw record → [`PlantObservation`](crate::models::PlantObservation)
//! - [`pipeline`]: plant queries (fetch, map, climate filter)
//! - [`stats`]: per-region observation counts
//! - [`identification`]: photo identification with mock fallback

pub mod identification;
pub mod mapper;
pub mod pipeline;
pub mod stats;

pub use identification::{IdentifyError, PlantIdentifier};
pub use mapper::map_observation;
pub use pipeline::{filter_batch, query_plants, PlantQuery, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use stats::aggregate_region_stats;
