//! Parsing of the vision model's free-text reply.
//!
//! The model is asked for a JSON object but may wrap it in prose or code
//! fences, and tends to be loose with types: confidences arrive as `0.8`,
//! `80` or `"80%"`, native flags as booleans or `"yes"`.

use serde_json::{Map, Value};

use super::VisionError;
use crate::models::IdentificationMatch;

/// Share of the primary confidence given to each alternative.
pub const ALTERNATIVE_CONFIDENCE_FACTOR: f64 = 0.7;
/// At most this many alternatives follow the primary match.
pub const MAX_ALTERNATIVES: usize = 2;

/// Locate the outermost `{ ... }` span in `text`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Bring a confidence value into [0, 1].
///
/// Numbers above 1 are percentages. Strings with a `%` use their leading
/// digits as a percentage; other strings are parsed as numbers.
pub fn normalize_confidence(value: &Value) -> f64 {
    let scaled = match value {
        Value::Number(n) => percent_if_above_one(n.as_f64().unwrap_or(0.0)),
        Value::String(s) if s.contains('%') => leading_digits(s) / 100.0,
        Value::String(s) => percent_if_above_one(s.trim().parse().unwrap_or(0.0)),
        _ => 0.0,
    };
    if scaled.is_finite() {
        scaled.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn percent_if_above_one(raw: f64) -> f64 {
    if raw > 1.0 {
        raw / 100.0
    } else {
        raw
    }
}

fn leading_digits(s: &str) -> f64 {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0.0)
}

/// `true`, `"yes"` and `"true"` (any case) are native; anything else is not.
pub fn parse_native_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("true")
        }
        _ => false,
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn taxon_id_field(object: &Map<String, Value>) -> Option<u64> {
    match object.get("taxon_id")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn alternative(value: &Value, confidence: f64) -> Option<IdentificationMatch> {
    match value {
        Value::String(name) if !name.trim().is_empty() => Some(IdentificationMatch {
            scientific_name: name.trim().to_string(),
            common_name: None,
            confidence,
            description: None,
            is_native: false,
            taxon_id: None,
        }),
        Value::Object(object) => Some(IdentificationMatch {
            scientific_name: string_field(object, "scientific_name")?,
            common_name: string_field(object, "common_name"),
            confidence,
            description: string_field(object, "description"),
            is_native: parse_native_flag(object.get("is_native")),
            taxon_id: taxon_id_field(object),
        }),
        _ => None,
    }
}

/// Turn a model reply into one primary match plus up to two alternatives.
pub fn parse_reply(text: &str) -> Result<Vec<IdentificationMatch>, VisionError> {
    let json = extract_json_object(text)
        .ok_or_else(|| VisionError::MalformedReply("no JSON object in reply".to_string()))?;
    let value: Value =
        serde_json::from_str(json).map_err(|e| VisionError::MalformedReply(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| VisionError::MalformedReply("reply is not an object".to_string()))?;

    let scientific_name = string_field(object, "scientific_name")
        .ok_or_else(|| VisionError::MalformedReply("missing scientific_name".to_string()))?;
    let confidence = object
        .get("confidence")
        .map(normalize_confidence)
        .unwrap_or(0.0);

    let primary = IdentificationMatch {
        scientific_name,
        common_name: string_field(object, "common_name"),
        confidence,
        description: string_field(object, "description"),
        is_native: parse_native_flag(object.get("is_native")),
        taxon_id: taxon_id_field(object),
    };

    let alternative_confidence = confidence * ALTERNATIVE_CONFIDENCE_FACTOR;
    let alternatives = object
        .get("alternatives")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| alternative(item, alternative_confidence))
                .take(MAX_ALTERNATIVES)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut matches = Vec::with_capacity(1 + alternatives.len());
    matches.push(primary);
    matches.extend(alternatives);
    Ok(matches)
}

#[cfg(test)]
#[path = "reply_tests.rs"]
mod reply_tests;
