//! Translation of a plant query into upstream search parameters.

use serde::Serialize;

use crate::models::Region;

/// iNaturalist taxon identifier for kingdom Plantae.
pub const PLANTAE_TAXON_ID: u32 = 47126;

pub const DEFAULT_QUALITY_GRADE: &str = "research";

/// Query string sent to `GET /observations`.
///
/// Field order is the order parameters appear in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationQuery {
    pub place_id: u32,
    pub taxon_id: u32,
    pub quality_grade: String,
    pub native: bool,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl ObservationQuery {
    pub fn builder(region: Region) -> ObservationQueryBuilder {
        ObservationQueryBuilder::new(region)
    }
}

/// Builder carrying the fixed query policy: plants only, research grade,
/// native only, newest first.
#[derive(Debug, Clone)]
pub struct ObservationQueryBuilder {
    region: Region,
    quality_grade: String,
    native_only: bool,
    per_page: u32,
    newest_first: bool,
    search: Option<String>,
}

impl ObservationQueryBuilder {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            quality_grade: DEFAULT_QUALITY_GRADE.to_string(),
            native_only: true,
            per_page: 50,
            newest_first: true,
            search: None,
        }
    }

    pub fn quality_grade(mut self, grade: impl Into<String>) -> Self {
        self.quality_grade = grade.into();
        self
    }

    pub fn native_only(mut self, native_only: bool) -> Self {
        self.native_only = native_only;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Leave ordering to the API. Count-only queries have no use for it.
    pub fn unordered(mut self) -> Self {
        self.newest_first = false;
        self
    }

    /// Free-text search, passed through verbatim. Empty strings are ignored.
    pub fn search(mut self, term: Option<&str>) -> Self {
        self.search = term.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    pub fn build(self) -> ObservationQuery {
        ObservationQuery {
            place_id: self.region.place_id(),
            taxon_id: PLANTAE_TAXON_ID,
            quality_grade: self.quality_grade,
            native: self.native_only,
            per_page: self.per_page,
            order: self.newest_first.then(|| "desc".to_string()),
            order_by: self.newest_first.then(|| "created_at".to_string()),
            q: self.search,
        }
    }
}
