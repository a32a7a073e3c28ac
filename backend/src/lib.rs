//! # NW Native Plant Explorer Backend
//!
//! A thin service in front of the iNaturalist observations API for
//! discovering native plants of the Pacific Northwest.
//!
//! ## Features
//!
//! - **Plant queries**: research-grade, native-only plant observations per
//!   region, normalized into [`models::PlantObservation`]
//! - **Climate zones**: every observation is classified into one of four
//!   coarse zones from its coordinates, and queries can filter on them
//! - **Statistics**: observation counts per region, fetched concurrently
//! - **Identification**: photo upload forwarded to a hosted vision model,
//!   degrading to fixed sample results when the model is unavailable
//! - **HTTP API**: axum server behind the `http-server` feature
//!
//! ## Architecture
//!
//! - [`models`]: domain values (regions, climate zones, observations)
//! - [`upstream`]: the [`upstream::ObservationSource`] seam and its live and
//!   in-memory implementations
//! - [`services`]: mapping, filtering, aggregation, identification
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod config;
pub mod models;
pub mod services;
pub mod upstream;

#[cfg(feature = "http-server")]
pub mod http;
