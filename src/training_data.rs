//! Training data consumed by pipeline components.
//!
//! Training files use the common NLU-data JSON layout:
//!
//! ```json
//! {
//!   "nlu_data": {
//!     "common_examples": [
//!       {
//!         "text": "I live in NYC",
//!         "intent": "inform",
//!         "entities": [{"start": 10, "end": 13, "value": "New York", "entity": "city"}]
//!       }
//!     ],
//!     "entity_synonyms": [{"value": "New York", "synonyms": ["NYC", "the big apple"]}]
//!   }
//! }
//! ```
//!
//! The legacy top-level key `rasa_nlu_data` is accepted as well.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{Result, SynonymError};

/// A single training message with its annotated entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Raw message text.
    pub text: String,

    /// Intent label, if annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    /// Annotated entity spans.
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Message {
    /// Create a message without annotations.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Attach entity annotations.
    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    /// Text covered by `entity`, or `None` when the entity has no span.
    ///
    /// Offsets count characters, not bytes. Offsets past the end are clamped
    /// and an inverted span yields an empty string.
    pub fn entity_text(&self, entity: &Entity) -> Option<&str> {
        let (start, end) = entity.span()?;
        Some(char_slice(&self.text, start, end))
    }
}

fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_offset = |chars: usize| {
        text.char_indices()
            .nth(chars)
            .map_or(text.len(), |(offset, _)| offset)
    };
    let begin = byte_offset(start);
    let finish = byte_offset(end).max(begin);
    &text[begin..finish]
}

/// A group of surface forms sharing one canonical value.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SynonymGroup {
    value: String,
    #[serde(default)]
    synonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NluFile {
    #[serde(alias = "rasa_nlu_data")]
    nlu_data: NluSections,
}

#[derive(Debug, Default, Deserialize)]
struct NluSections {
    #[serde(default)]
    common_examples: Vec<Message>,
    #[serde(default)]
    entity_synonyms: Vec<SynonymGroup>,
}

/// Training messages plus an explicit synonym table.
///
/// Synonym pairs keep their insertion order so that later pairs
/// deterministically overwrite earlier ones during training.
#[derive(Debug, Clone, Default)]
pub struct TrainingData {
    entity_synonyms: Vec<(String, String)>,
    training_examples: Vec<Message>,
}

impl TrainingData {
    /// Create empty training data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load training data from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SynonymError::training_data(format!(
                "Failed to read training data file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let data = Self::from_json_str(&content).map_err(|e| {
            SynonymError::training_data(format!(
                "Failed to parse training data from '{}': {}",
                path.display(),
                e
            ))
        })?;

        log::debug!(
            "Loaded {} examples and {} synonym pairs from {}",
            data.training_examples.len(),
            data.entity_synonyms.len(),
            path.display()
        );
        Ok(data)
    }

    /// Parse training data from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: NluFile = serde_json::from_str(content)?;

        let mut data = Self::new();
        for group in file.nlu_data.entity_synonyms {
            for synonym in group.synonyms {
                data.add_synonym(synonym, group.value.clone());
            }
        }
        data.training_examples = file.nlu_data.common_examples;
        Ok(data)
    }

    /// Register `surface` as a synonym of `canonical`.
    pub fn add_synonym(&mut self, surface: impl Into<String>, canonical: impl Into<String>) {
        self.entity_synonyms.push((surface.into(), canonical.into()));
    }

    /// Append a training message.
    pub fn add_example(&mut self, message: Message) {
        self.training_examples.push(message);
    }

    /// Explicit synonym pairs in insertion order.
    pub fn entity_synonyms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entity_synonyms
            .iter()
            .map(|(surface, canonical)| (surface.as_str(), canonical.as_str()))
    }

    /// All training messages.
    pub fn training_examples(&self) -> &[Message] {
        &self.training_examples
    }

    /// Messages carrying at least one entity annotation.
    pub fn entity_examples(&self) -> impl Iterator<Item = &Message> {
        self.training_examples
            .iter()
            .filter(|message| !message.entities.is_empty())
    }

    /// Whether there is nothing to train on.
    pub fn is_empty(&self) -> bool {
        self.entity_synonyms.is_empty() && self.training_examples.is_empty()
    }
}
