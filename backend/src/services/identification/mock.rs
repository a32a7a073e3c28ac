//! Fixed results served whenever the vision model cannot be used.

use crate::models::IdentificationMatch;

/// Two well-known native conifers with fixed confidences.
pub fn mock_matches() -> Vec<IdentificationMatch> {
    vec![
        IdentificationMatch {
            scientific_name: "Pseudotsuga menziesii".to_string(),
            common_name: Some("Douglas Fir".to_string()),
            confidence: 0.87,
            description: Some(
                "Tall evergreen conifer with soft, flat needles and distinctive cones \
                 bearing three-pointed bracts."
                    .to_string(),
            ),
            is_native: true,
            taxon_id: None,
        },
        IdentificationMatch {
            scientific_name: "Thuja plicata".to_string(),
            common_name: Some("Western Redcedar".to_string()),
            confidence: 0.65,
            description: Some(
                "Large evergreen with flat sprays of scale-like leaves and fibrous, \
                 reddish-brown bark."
                    .to_string(),
            ),
            is_native: true,
            taxon_id: None,
        },
    ]
}
