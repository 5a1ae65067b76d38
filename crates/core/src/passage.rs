//! Passages — the unit of retrieval — and their provenance metadata.
//!
//! Candidate stores hand back loosely-typed metadata. [`PassageMetadata`]
//! parses it leniently: each recognized key is coerced to its expected type,
//! and a value that cannot be coerced is treated as absent. Defaults are
//! applied by the `*_or_default` accessors, so every consumer sees the same
//! fallback values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

/// Age assumed for passages that do not report one ("old").
pub const DEFAULT_AGE_DAYS: u64 = 365;

/// Risk category assumed for passages that do not report one.
pub const DEFAULT_RISK: &str = "general";

/// A candidate passage returned by a candidate source.
///
/// Deserializes from any JSON object. A non-string `id` or `text` is treated
/// as absent, and metadata (under `metadata` or `meta`) that is not an object
/// is replaced by the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Passage {
    /// Identifier, unique within a single retrieval call. Empty when the
    /// store did not supply one.
    pub id: String,

    /// Full passage text.
    pub text: String,

    /// Provenance metadata.
    pub metadata: PassageMetadata,
}

impl Passage {
    pub fn new(id: impl Into<String>, text: impl Into<String>, metadata: PassageMetadata) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata,
        }
    }
}

impl From<Map<String, Value>> for Passage {
    fn from(mut map: Map<String, Value>) -> Self {
        let mut string_field = |key: &str| match map.remove(key) {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => {
                trace!(key, value = %other, "Ignoring non-string passage field");
                String::new()
            }
        };
        let id = string_field("id");
        let text = string_field("text");

        let metadata = match map.remove("metadata").or_else(|| map.remove("meta")) {
            Some(Value::Object(meta)) => PassageMetadata::from(meta),
            Some(Value::Null) | None => PassageMetadata::default(),
            Some(other) => {
                trace!(value = %other, "Ignoring non-object passage metadata");
                PassageMetadata::default()
            }
        };

        Self { id, text, metadata }
    }
}

/// Structured provenance metadata for a [`Passage`].
///
/// Deserializes from any JSON object. Unrecognized keys are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct PassageMetadata {
    /// Origin identifier or URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Free-form date label as reported by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Age of the passage in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_days: Option<u64>,

    /// Capture method: `manual`, `ocr`, `asr`, or anything else
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Curated trust score, expected in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<f64>,

    /// Number of independent corroborating sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triangulation_count: Option<u64>,

    /// Free-text risk category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,

    /// Whether the passage is marked speculative
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speculative: Option<bool>,

    /// Keys this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PassageMetadata {
    pub fn age_days_or_default(&self) -> u64 {
        self.age_days.unwrap_or(DEFAULT_AGE_DAYS)
    }

    pub fn authority_or_default(&self) -> f64 {
        self.authority.unwrap_or(0.0)
    }

    pub fn triangulation_count_or_default(&self) -> u64 {
        self.triangulation_count.unwrap_or(0)
    }

    pub fn risk_or_default(&self) -> &str {
        self.risk.as_deref().unwrap_or(DEFAULT_RISK)
    }

    pub fn is_speculative(&self) -> bool {
        self.speculative.unwrap_or(false)
    }
}

impl From<Map<String, Value>> for PassageMetadata {
    fn from(mut map: Map<String, Value>) -> Self {
        let mut take = |key: &str, coerce: fn(&Value) -> bool| -> Option<Value> {
            let value = map.remove(key)?;
            if value.is_null() {
                return None;
            }
            if coerce(&value) {
                Some(value)
            } else {
                trace!(key, value = %value, "Ignoring malformed metadata value");
                None
            }
        };

        let source = take("source", |v| as_label(v).is_some()).and_then(|v| as_label(&v));
        let date = take("date", |v| as_label(v).is_some()).and_then(|v| as_label(&v));
        let age_days = take("age_days", |v| as_count(v).is_some()).and_then(|v| as_count(&v));
        let method = take("method", Value::is_string).and_then(|v| as_label(&v));
        let authority = take("authority", |v| as_real(v).is_some()).and_then(|v| as_real(&v));
        let triangulation_count =
            take("triangulation_count", |v| as_count(v).is_some()).and_then(|v| as_count(&v));
        let risk = take("risk", Value::is_string).and_then(|v| as_label(&v));
        let speculative = take("speculative", |v| as_flag(v).is_some()).and_then(|v| as_flag(&v));

        Self {
            source,
            date,
            age_days,
            method,
            authority,
            triangulation_count,
            risk,
            speculative,
            extra: map,
        }
    }
}

/// Render a scalar as a string label.
fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A non-negative integer, accepting integral floats and numeric strings.
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// A finite real number, accepting numeric strings.
fn as_real(value: &Value) -> Option<f64> {
    let real = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    real.filter(|f| f.is_finite())
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> PassageMetadata {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_metadata_uses_defaults() {
        let meta = parse(json!({}));
        assert_eq!(meta.age_days_or_default(), 365);
        assert_eq!(meta.triangulation_count_or_default(), 0);
        assert_eq!(meta.authority_or_default(), 0.0);
        assert_eq!(meta.risk_or_default(), "general");
        assert!(!meta.is_speculative());
        assert!(meta.method.is_none());
    }

    #[test]
    fn well_typed_metadata_parses() {
        let meta = parse(json!({
            "source": "docs/guide.md",
            "date": "2025-08-13",
            "age_days": 12,
            "method": "ocr",
            "authority": 0.7,
            "triangulation_count": 2,
            "risk": "medical",
            "speculative": true
        }));
        assert_eq!(meta.source.as_deref(), Some("docs/guide.md"));
        assert_eq!(meta.date.as_deref(), Some("2025-08-13"));
        assert_eq!(meta.age_days, Some(12));
        assert_eq!(meta.method.as_deref(), Some("ocr"));
        assert_eq!(meta.authority, Some(0.7));
        assert_eq!(meta.triangulation_count, Some(2));
        assert_eq!(meta.risk_or_default(), "medical");
        assert!(meta.is_speculative());
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let meta = parse(json!({
            "age_days": " 30 ",
            "authority": "0.25",
            "triangulation_count": "3",
            "speculative": "false"
        }));
        assert_eq!(meta.age_days, Some(30));
        assert_eq!(meta.authority, Some(0.25));
        assert_eq!(meta.triangulation_count, Some(3));
        assert_eq!(meta.speculative, Some(false));
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let meta = parse(json!({
            "age_days": "last week",
            "authority": "very high",
            "triangulation_count": -2,
            "speculative": "maybe",
            "method": 42,
            "risk": ["a", "b"]
        }));
        assert_eq!(meta.age_days_or_default(), 365);
        assert_eq!(meta.authority_or_default(), 0.0);
        assert_eq!(meta.triangulation_count_or_default(), 0);
        assert!(!meta.is_speculative());
        assert!(meta.method.is_none());
        assert_eq!(meta.risk_or_default(), "general");
    }

    #[test]
    fn nan_string_authority_is_rejected() {
        let meta = parse(json!({ "authority": "NaN" }));
        assert!(meta.authority.is_none());
    }

    #[test]
    fn integral_float_counts_are_accepted() {
        let meta = parse(json!({ "age_days": 7.0, "triangulation_count": 2.5 }));
        assert_eq!(meta.age_days, Some(7));
        assert!(meta.triangulation_count.is_none());
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let meta = parse(json!({ "source": "a", "lang": "en" }));
        assert_eq!(meta.extra.get("lang"), Some(&json!("en")));

        let out = serde_json::to_value(&meta).unwrap();
        assert_eq!(out["lang"], "en");
        assert_eq!(out["source"], "a");
        assert!(out.get("age_days").is_none());
    }

    #[test]
    fn passage_accepts_meta_alias() {
        let passage: Passage = serde_json::from_value(json!({
            "id": "p1",
            "text": "hello",
            "meta": { "age_days": 3 }
        }))
        .unwrap();
        assert_eq!(passage.metadata.age_days, Some(3));
    }

    #[test]
    fn passage_without_metadata_deserializes() {
        let passage: Passage = serde_json::from_value(json!({ "text": "bare" })).unwrap();
        assert!(passage.id.is_empty());
        assert_eq!(passage.metadata, PassageMetadata::default());
    }

    #[test]
    fn null_metadata_is_defaulted() {
        let passage: Passage = serde_json::from_value(json!({
            "id": "bad",
            "text": "drift",
            "metadata": null
        }))
        .unwrap();
        assert_eq!(passage.id, "bad");
        assert_eq!(passage.metadata, PassageMetadata::default());
    }

    #[test]
    fn non_object_metadata_is_defaulted() {
        let passage: Passage =
            serde_json::from_value(json!({ "text": "t", "metadata": [1, 2] })).unwrap();
        assert_eq!(passage.metadata, PassageMetadata::default());
    }

    #[test]
    fn non_string_id_and_text_are_absent() {
        let passage: Passage =
            serde_json::from_value(json!({ "id": 7, "text": {"nested": true} })).unwrap();
        assert!(passage.id.is_empty());
        assert!(passage.text.is_empty());
    }

    #[test]
    fn non_object_passage_is_rejected() {
        assert!(serde_json::from_value::<Passage>(json!("just text")).is_err());
    }
}
