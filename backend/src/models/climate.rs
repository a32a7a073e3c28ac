//! Coarse climate zones of the Pacific Northwest.
//!
//! Zones are derived from an observation's coordinates using fixed
//! thresholds approximating the Cascade Range crest and the Puget Sound
//! basin. Nothing upstream supplies a zone; it is always computed here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Longitude of the Cascade crest; anything east of it is rain shadow.
const CASCADE_CREST_LON: f64 = -121.0;
/// Puget Sound basin: north of this latitude...
const PUGET_SOUND_MIN_LAT: f64 = 47.0;
/// ...and west of this longitude.
const PUGET_SOUND_MAX_LON: f64 = -122.0;
/// Coastal band: south of this latitude...
const COASTAL_MAX_LAT: f64 = 45.0;
/// ...and west of this longitude.
const COASTAL_MAX_LON: f64 = -123.0;

/// One of the four fixed zone labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateZone {
    #[serde(rename = "East Cascades (Dry/Rain Shadow)")]
    EastCascades,
    #[serde(rename = "Puget Sound Lowlands")]
    PugetSoundLowlands,
    #[serde(rename = "Coastal")]
    Coastal,
    #[serde(rename = "West Cascades (Wet)")]
    WestCascades,
}

impl ClimateZone {
    /// Classify a point. Takes longitude first.
    ///
    /// First match wins and every comparison is strict, so points sitting
    /// exactly on a threshold fall through to the next branch.
    pub fn classify(longitude: f64, latitude: f64) -> Self {
        if longitude > CASCADE_CREST_LON {
            return ClimateZone::EastCascades;
        }

        if latitude > PUGET_SOUND_MIN_LAT && longitude < PUGET_SOUND_MAX_LON {
            return ClimateZone::PugetSoundLowlands;
        }

        if latitude < COASTAL_MAX_LAT && longitude < COASTAL_MAX_LON {
            return ClimateZone::Coastal;
        }

        ClimateZone::WestCascades
    }

    /// Human-readable label, also the wire form.
    pub fn label(&self) -> &'static str {
        match self {
            ClimateZone::EastCascades => "East Cascades (Dry/Rain Shadow)",
            ClimateZone::PugetSoundLowlands => "Puget Sound Lowlands",
            ClimateZone::Coastal => "Coastal",
            ClimateZone::WestCascades => "West Cascades (Wet)",
        }
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Climate filter accepted by the plant query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClimateFilter {
    #[default]
    All,
    Coastal,
    CascadeWest,
    CascadeEast,
    PugetSound,
}

impl ClimateFilter {
    pub const VALUES: [&'static str; 5] =
        ["all", "coastal", "cascade-west", "cascade-east", "puget-sound"];

    /// Parse a filter, treating any unrecognized value as [`ClimateFilter::All`].
    ///
    /// An unrecognized filter has no substring of its own and behaves like
    /// the empty needle, which every label contains, so everything passes.
    /// Callers that want strictness validate with [`FromStr`] first.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or(ClimateFilter::All)
    }

    /// Substring that must occur in a zone label, `None` for no filtering.
    pub fn needle(&self) -> Option<&'static str> {
        match self {
            ClimateFilter::All => None,
            ClimateFilter::Coastal => Some("Coastal"),
            ClimateFilter::CascadeWest => Some("West Cascades"),
            ClimateFilter::CascadeEast => Some("East Cascades"),
            ClimateFilter::PugetSound => Some("Puget Sound"),
        }
    }

    /// Whether an observation in `zone` passes this filter.
    pub fn admits(&self, zone: ClimateZone) -> bool {
        match self.needle() {
            None => true,
            Some(needle) => zone.label().contains(needle),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateFilter::All => "all",
            ClimateFilter::Coastal => "coastal",
            ClimateFilter::CascadeWest => "cascade-west",
            ClimateFilter::CascadeEast => "cascade-east",
            ClimateFilter::PugetSound => "puget-sound",
        }
    }
}

impl FromStr for ClimateFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ClimateFilter::All),
            "coastal" => Ok(ClimateFilter::Coastal),
            "cascade-west" => Ok(ClimateFilter::CascadeWest),
            "cascade-east" => Ok(ClimateFilter::CascadeEast),
            "puget-sound" => Ok(ClimateFilter::PugetSound),
            other => Err(format!(
                "Unknown climate_type '{}'. Expected one of: {}",
                other,
                Self::VALUES.join(", ")
            )),
        }
    }
}

impl fmt::Display for ClimateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "climate_tests.rs"]
mod climate_tests;
