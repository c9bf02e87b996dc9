//! Extracted entity records and their values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The value carried by an entity.
///
/// Extractors almost always emit text, but training files may annotate
/// numbers, booleans or structured values. Text is case-folded when used as
/// a synonym key; everything else is compared by its JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityValue {
    /// Textual value.
    Text(String),
    /// Any non-textual JSON value.
    Other(Value),
}

impl EntityValue {
    /// Normalized form used as a synonym table key or target.
    pub fn normalized(&self) -> String {
        match self {
            EntityValue::Text(text) => text.to_lowercase(),
            EntityValue::Other(Value::String(text)) => text.clone(),
            EntityValue::Other(value) => value.to_string(),
        }
    }
}

impl From<&str> for EntityValue {
    fn from(text: &str) -> Self {
        EntityValue::Text(text.to_string())
    }
}

impl From<String> for EntityValue {
    fn from(text: String) -> Self {
        EntityValue::Text(text)
    }
}

/// An entity recognized in a message.
///
/// Only `start`, `end` and `value` matter to synonym mapping. Fields this
/// crate does not know about are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Character offset where the entity starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,

    /// Character offset one past the end of the entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,

    /// Entity type label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Extracted or annotated value. Always serialized, `null` included.
    #[serde(default)]
    pub value: Option<EntityValue>,

    /// Name of the extractor that produced the entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    /// Create an entity holding only a value.
    pub fn with_value(value: impl Into<EntityValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Create an annotated entity spanning `start..end` of its message.
    pub fn new(
        start: usize,
        end: usize,
        label: impl Into<String>,
        value: impl Into<EntityValue>,
    ) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            entity: Some(label.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Get the span as a tuple, if both offsets are present.
    pub fn span(&self) -> Option<(usize, usize)> {
        Some((self.start?, self.end?))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalized_text_is_lowercased() {
        assert_eq!(EntityValue::from("New York").normalized(), "new york");
        assert_eq!(EntityValue::from("ÉCOLE").normalized(), "école");
    }

    #[test]
    fn test_normalized_other_is_not_lowercased() {
        assert_eq!(EntityValue::Other(json!(5)).normalized(), "5");
        assert_eq!(EntityValue::Other(json!(true)).normalized(), "true");
        assert_eq!(
            EntityValue::Other(json!({"unit": "KM"})).normalized(),
            r#"{"unit":"KM"}"#
        );
    }

    #[test]
    fn test_value_deserializes_by_kind() {
        let entity: Entity = serde_json::from_value(json!({"value": "NYC"})).unwrap();
        assert_eq!(entity.value, Some(EntityValue::Text("NYC".to_string())));

        let entity: Entity = serde_json::from_value(json!({"value": 42})).unwrap();
        assert_eq!(entity.value, Some(EntityValue::Other(json!(42))));

        let entity: Entity = serde_json::from_value(json!({"value": null})).unwrap();
        assert_eq!(entity.value, None);
    }

    #[test]
    fn test_null_value_is_serialized() {
        let input = json!({"entity": "city", "value": null});
        let entity: Entity = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&entity).unwrap(), input);
    }

    #[test]
    fn test_unknown_fields_survive() {
        let input = json!({
            "start": 0,
            "end": 3,
            "entity": "city",
            "value": "NYC",
            "confidence": 0.87
        });
        let entity: Entity = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(entity.span(), Some((0, 3)));
        assert_eq!(entity.extra.get("confidence"), Some(&json!(0.87)));
        assert_eq!(serde_json::to_value(&entity).unwrap(), input);
    }
}
