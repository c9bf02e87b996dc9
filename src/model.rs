//! Model directory metadata.
//!
//! A trained model directory holds each component's persisted files plus a
//! `metadata.json` recording what was written, so components can be loaded
//! again without guessing file names.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::component::{Component, PersistMetadata};
use crate::error::{Result, SynonymError};
use crate::synonym::{ENTITY_SYNONYMS_FILE, EntitySynonymMapper, LoadOutcome};
use crate::training_data::TrainingData;

/// Name of the metadata file inside a model directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Metadata describing a trained model directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Component names in pipeline order.
    pub pipeline: Vec<String>,

    /// When training finished.
    pub trained_at: DateTime<Utc>,

    /// Language of the training data, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Crate version that wrote the model.
    #[serde(default)]
    pub version: String,

    /// Files persisted by the components.
    #[serde(flatten)]
    pub components: PersistMetadata,
}

impl ModelMetadata {
    /// Metadata for a freshly persisted pipeline.
    pub fn new(
        pipeline: Vec<String>,
        language: Option<String>,
        components: PersistMetadata,
    ) -> Self {
        Self {
            pipeline,
            trained_at: Utc::now(),
            language,
            version: crate::VERSION.to_string(),
            components,
        }
    }

    /// Write the metadata into `model_dir`.
    pub fn save<P: AsRef<Path>>(&self, model_dir: P) -> Result<()> {
        let path = model_dir.as_ref().join(METADATA_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        log::debug!("Wrote model metadata to {}", path.display());
        Ok(())
    }

    /// Read the metadata from `model_dir`, or `None` if there is none.
    pub fn load<P: AsRef<Path>>(model_dir: P) -> Result<Option<Self>> {
        let path = model_dir.as_ref().join(METADATA_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let metadata = serde_json::from_str(&content).map_err(|e| {
            SynonymError::model(format!(
                "Failed to parse model metadata from '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Some(metadata))
    }
}

/// Train a synonym mapper and persist it with its metadata into `model_dir`.
///
/// The directory is created if needed.
pub fn train_and_persist<P: AsRef<Path>>(
    training_data: &TrainingData,
    model_dir: P,
    language: Option<String>,
) -> Result<(EntitySynonymMapper, ModelMetadata)> {
    let model_dir = model_dir.as_ref();
    fs::create_dir_all(model_dir)?;

    let mut mapper = EntitySynonymMapper::new();
    mapper.train(training_data)?;
    let components = mapper.persist(model_dir)?;

    let metadata = ModelMetadata::new(vec![mapper.name().to_string()], language, components);
    metadata.save(model_dir)?;
    Ok((mapper, metadata))
}

/// Load the synonym mapper stored in `model_dir`.
///
/// Without a metadata file the default synonym file name is tried.
pub fn load_mapper<P: AsRef<Path>>(model_dir: P) -> Result<LoadOutcome> {
    let model_dir = model_dir.as_ref();
    if !model_dir.is_dir() {
        return Err(SynonymError::model(format!(
            "Model directory '{}' does not exist",
            model_dir.display()
        )));
    }

    let file_name = match ModelMetadata::load(model_dir)? {
        Some(metadata) => metadata.components.entity_synonyms,
        None => Some(ENTITY_SYNONYMS_FILE.to_string()),
    };
    EntitySynonymMapper::load(Some(model_dir), file_name.as_deref())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_metadata_round_trip() {
        let dir = TempDir::new().unwrap();
        let metadata = ModelMetadata::new(
            vec!["ner_synonyms".to_string()],
            Some("en".to_string()),
            PersistMetadata {
                entity_synonyms: Some(ENTITY_SYNONYMS_FILE.to_string()),
            },
        );
        metadata.save(dir.path()).unwrap();

        let loaded = ModelMetadata::load(dir.path()).unwrap().unwrap();
        assert_eq!(loaded, metadata);

        let raw: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join(METADATA_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(raw["entity_synonyms"], "entity_synonyms.json");
        assert_eq!(raw["pipeline"][0], "ner_synonyms");
        assert_eq!(raw["version"], crate::VERSION);
    }

    #[test]
    fn test_missing_metadata() {
        let dir = TempDir::new().unwrap();
        assert!(ModelMetadata::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_mapper_requires_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(load_mapper(&missing), Err(SynonymError::Model(_))));
    }

    #[test]
    fn test_empty_model_records_null_file() {
        let dir = TempDir::new().unwrap();
        let (mapper, metadata) = train_and_persist(&TrainingData::new(), dir.path(), None).unwrap();

        assert!(mapper.is_empty());
        assert_eq!(metadata.components.entity_synonyms, None);

        let outcome = load_mapper(dir.path()).unwrap();
        assert!(outcome.mapper.is_empty());
        assert!(outcome.diagnostic.is_none());
    }
}
