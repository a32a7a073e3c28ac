//! Results of photo-based plant identification.

use serde::{Deserialize, Serialize};

/// One candidate species for an uploaded photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentificationMatch {
    pub scientific_name: String,
    pub common_name: Option<String>,
    /// Always within [0, 1]
    pub confidence: f64,
    pub description: Option<String>,
    /// Native to the Pacific Northwest
    pub is_native: bool,
    pub taxon_id: Option<u64>,
}
