//! Outbound access to the iNaturalist observations API.
//!
//! - [`query`]: request parameters and the fixed query policy
//! - [`source`]: the [`ObservationSource`] trait services depend on
//! - [`client`]: live implementation over reqwest
//! - [`fixture`]: in-memory implementation
//! - [`error`]: failure taxonomy

pub mod client;
pub mod error;
pub mod fixture;
pub mod query;
pub mod source;

pub use client::InatClient;
pub use error::{FetchError, FetchResult};
pub use fixture::StaticSource;
pub use query::{ObservationQuery, ObservationQueryBuilder, PLANTAE_TAXON_ID};
pub use source::ObservationSource;
