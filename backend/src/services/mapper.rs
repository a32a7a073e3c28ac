//! Normalization of raw upstream records into [`PlantObservation`]s.

use tracing::debug;

use crate::models::{ClimateZone, PlantObservation, RawObservation};

/// Scientific name used when the upstream taxon has none.
pub const UNKNOWN_SCIENTIFIC_NAME: &str = "Unknown";

/// Parse a `"lat,lon"` location string.
///
/// Exactly two comma-separated finite floats are required; surrounding
/// whitespace is tolerated. `NaN` and infinities are rejected.
pub fn parse_location(location: &str) -> Option<(f64, f64)> {
    let mut parts = location.split(',');
    let lat = parts.next()?.trim().parse::<f64>().ok()?;
    let lon = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() || !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    Some((lat, lon))
}

/// Swap the `square` size token for `medium` in a photo URL.
pub fn medium_photo_url(url: &str) -> String {
    url.replace("square", "medium")
}

/// Map one raw record, or `None` if it has to be skipped.
///
/// Records without an id or a parseable location are skipped; they are
/// never treated as errors.
pub fn map_observation(raw: &RawObservation) -> Option<PlantObservation> {
    let Some((latitude, longitude)) = raw.location.as_deref().and_then(parse_location) else {
        debug!(id = ?raw.id, location = ?raw.location, "Skipping observation without usable location");
        return None;
    };

    let Some(id) = raw.id else {
        debug!("Skipping observation without id");
        return None;
    };

    // Location is "lat,lon" but the classifier takes longitude first.
    let climate_zone = ClimateZone::classify(longitude, latitude);

    let taxon = raw.taxon.as_ref();
    let scientific_name = taxon
        .and_then(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN_SCIENTIFIC_NAME.to_string());
    let common_name = taxon.and_then(|t| t.preferred_common_name.clone());
    let taxon_rank = taxon.and_then(|t| t.rank.clone());

    let photo_url = raw
        .photos
        .as_deref()
        .and_then(|photos| photos.first())
        .map(|photo| medium_photo_url(photo.url.as_deref().unwrap_or_default()));

    Some(PlantObservation {
        id,
        scientific_name,
        common_name,
        photo_url,
        latitude,
        longitude,
        observed_on: raw.observed_on.clone().unwrap_or_default(),
        place_guess: raw.place_guess.clone().unwrap_or_default(),
        climate_zone,
        quality_grade: raw.quality_grade.clone().unwrap_or_default(),
        taxon_rank,
    })
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod mapper_tests;
