//! Regions the explorer can query and their upstream place identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A state-level region with a fixed iNaturalist place identifier.
///
/// Ordering follows declaration order, which is also the order regions are
/// reported in statistics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Washington,
    Oregon,
    Idaho,
    California,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Washington,
        Region::Oregon,
        Region::Idaho,
        Region::California,
    ];

    /// Upstream place identifier.
    pub fn place_id(&self) -> u32 {
        match self {
            Region::Washington => 14,
            Region::Oregon => 41,
            Region::Idaho => 42,
            Region::California => 43,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Washington => "washington",
            Region::Oregon => "oregon",
            Region::Idaho => "idaho",
            Region::California => "california",
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown region '{}'. Expected one of: washington, oregon, idaho, california",
                    s
                )
            })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
