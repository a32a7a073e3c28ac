//! Photo-based plant identification.
//!
//! Uploads are validated (declared image type, decodable bytes), re-encoded
//! as JPEG and sent to a vision model with a fixed prompt. Once an upload
//! is valid this never fails: if the model is unconfigured, unreachable or
//! answers with something unparseable, the fixed results from [`mock`] are
//! returned instead.

pub mod image_prep;
pub mod mock;
pub mod reply;
pub mod vision;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::VisionSettings;
use crate::models::IdentificationMatch;

pub use mock::mock_matches;
pub use reply::parse_reply;
pub use vision::{ChatVisionClient, VisionModel, IDENTIFICATION_PROMPT};

/// Upload rejected before any identification was attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifyError {
    #[error("File must be an image (got {0})")]
    InvalidContentType(String),

    #[error("Invalid image file: {0}")]
    InvalidImage(String),
}

/// Why a model call produced no usable matches. Never shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisionError {
    #[error("vision model API key not configured")]
    MissingCredentials,

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("vision model request failed: {0}")]
    Transport(String),

    #[error("vision model returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not parse vision model reply: {0}")]
    MalformedReply(String),
}

/// Identification service. Cheap to clone.
#[derive(Clone, Default)]
pub struct PlantIdentifier {
    model: Option<Arc<dyn VisionModel>>,
}

impl PlantIdentifier {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Identifier that always serves mock results.
    pub fn mock_only() -> Self {
        Self { model: None }
    }

    /// Use the configured chat-completions endpoint, or mock results when
    /// it cannot be set up.
    pub fn from_settings(settings: &VisionSettings) -> Self {
        match ChatVisionClient::new(settings) {
            Ok(client) => {
                info!(model = %settings.model, "Vision model configured");
                Self::new(Arc::new(client))
            }
            Err(e) => {
                warn!("Plant identification will return mock results: {}", e);
                Self::mock_only()
            }
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Identify the plant in an uploaded image: 1 to 3 matches, best first.
    pub async fn identify(
        &self,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<Vec<IdentificationMatch>, IdentifyError> {
        image_prep::validate_content_type(content_type)?;

        let prepared = tokio::task::spawn_blocking(move || {
            let image = image_prep::decode_image(&bytes)?;
            Ok::<_, IdentifyError>(image_prep::to_data_url(&image))
        })
        .await
        .map_err(|e| IdentifyError::InvalidImage(format!("image decoding aborted: {}", e)))??;

        match self.ask_model(prepared).await {
            Ok(matches) => {
                if let Some(top) = matches.first() {
                    info!(matches = matches.len(), top = %top.scientific_name, "Plant identified");
                }
                Ok(matches)
            }
            Err(e) => {
                warn!("Falling back to mock identification: {}", e);
                Ok(mock_matches())
            }
        }
    }

    async fn ask_model(
        &self,
        prepared: Result<String, VisionError>,
    ) -> Result<Vec<IdentificationMatch>, VisionError> {
        let model = self.model.as_ref().ok_or(VisionError::MissingCredentials)?;
        let data_url = prepared?;
        let reply = model.describe(&data_url, IDENTIFICATION_PROMPT).await?;
        parse_reply(&reply)
    }
}
