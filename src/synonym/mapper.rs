//! Pipeline component that rewrites entity values to their canonical forms.

use std::fs;
use std::path::{Path, PathBuf};

use crate::component::{Component, ENTITIES, PersistMetadata, ProcessOutput};
use crate::entity::{Entity, EntityValue};
use crate::error::Result;
use crate::training_data::TrainingData;

use super::table::SynonymTable;

/// File name the synonym table is persisted under.
pub const ENTITY_SYNONYMS_FILE: &str = "entity_synonyms.json";

/// Learns a synonym table from training data and maps extracted entity
/// values onto canonical values.
///
/// ```
/// use entity_synonyms::component::Component;
/// use entity_synonyms::entity::Entity;
/// use entity_synonyms::synonym::EntitySynonymMapper;
/// use entity_synonyms::training_data::TrainingData;
///
/// let mut data = TrainingData::new();
/// data.add_synonym("NYC", "New York");
///
/// let mut mapper = EntitySynonymMapper::new();
/// mapper.train(&data).unwrap();
///
/// let output = mapper.process(&[Entity::with_value("nyc")]);
/// assert_eq!(output.entities[0].value, Some("new york".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntitySynonymMapper {
    synonyms: SynonymTable,
}

/// Why `load` fell back to an empty mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// The synonym file named in the model metadata does not exist.
    MissingFile { path: PathBuf },
}

/// A loaded mapper together with anything worth reporting about the load.
#[derive(Debug)]
pub struct LoadOutcome {
    pub mapper: EntitySynonymMapper,
    pub diagnostic: Option<LoadDiagnostic>,
}

impl LoadOutcome {
    fn loaded(mapper: EntitySynonymMapper) -> Self {
        Self {
            mapper,
            diagnostic: None,
        }
    }
}

impl EntitySynonymMapper {
    /// Component name used in pipeline definitions and model metadata.
    pub const NAME: &'static str = "ner_synonyms";

    /// Create a mapper with an empty synonym table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper from an existing table.
    pub fn with_synonyms(synonyms: SynonymTable) -> Self {
        Self { synonyms }
    }

    /// Load a persisted mapper from `model_dir`.
    ///
    /// With either argument missing an empty mapper is returned. A missing
    /// file is logged and reported through [`LoadOutcome::diagnostic`]; a
    /// file that exists but is not a valid synonym table is an error.
    pub fn load(model_dir: Option<&Path>, entity_synonyms: Option<&str>) -> Result<LoadOutcome> {
        let (Some(model_dir), Some(file_name)) = (model_dir, entity_synonyms) else {
            return Ok(LoadOutcome::loaded(Self::new()));
        };
        if file_name.is_empty() || model_dir.as_os_str().is_empty() {
            return Ok(LoadOutcome::loaded(Self::new()));
        }

        let path = model_dir.join(file_name);
        if !path.is_file() {
            log::warn!("Failed to load synonyms file from '{}'", path.display());
            return Ok(LoadOutcome {
                mapper: Self::new(),
                diagnostic: Some(LoadDiagnostic::MissingFile { path }),
            });
        }

        let content = fs::read_to_string(&path)?;
        let synonyms: SynonymTable = serde_json::from_str(&content)?;
        log::debug!("Loaded {} synonyms from {}", synonyms.len(), path.display());
        Ok(LoadOutcome::loaded(Self::with_synonyms(synonyms)))
    }

    /// The learned synonym table.
    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Canonical value for a surface form, matched case-insensitively.
    pub fn get(&self, surface: &str) -> Option<&str> {
        self.synonyms.get(surface)
    }

    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }

    /// Register a synonym pair; see [`SynonymTable::add_if_synonyms`].
    pub fn add_entities_if_synonyms(
        &mut self,
        surface: &EntityValue,
        canonical: Option<&EntityValue>,
    ) -> bool {
        self.synonyms.add_if_synonyms(surface, canonical)
    }

    /// Replace mapped entity values in place.
    pub fn replace_synonyms(&self, entities: &mut [Entity]) {
        for entity in entities.iter_mut() {
            let Some(value) = &entity.value else {
                continue;
            };
            if let Some(canonical) = self.synonyms.lookup(value) {
                entity.value = Some(EntityValue::Text(canonical.to_string()));
            }
        }
    }
}

impl Component for EntitySynonymMapper {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn context_requires(&self) -> &[&'static str] {
        &[ENTITIES]
    }

    fn context_provides(&self) -> &[&'static str] {
        &[ENTITIES]
    }

    fn output_provides(&self) -> &[&'static str] {
        &[ENTITIES]
    }

    fn train(&mut self, training_data: &TrainingData) -> Result<()> {
        for (surface, canonical) in training_data.entity_synonyms() {
            self.add_entities_if_synonyms(&surface.into(), Some(&canonical.into()));
        }

        for example in training_data.entity_examples() {
            for entity in &example.entities {
                let Some(surface) = example.entity_text(entity) else {
                    continue;
                };
                self.add_entities_if_synonyms(&surface.into(), entity.value.as_ref());
            }
        }

        log::debug!("Trained {} with {} synonyms", Self::NAME, self.len());
        Ok(())
    }

    fn process(&self, entities: &[Entity]) -> ProcessOutput {
        let mut updated_entities = entities.to_vec();
        self.replace_synonyms(&mut updated_entities);
        ProcessOutput {
            entities: updated_entities,
        }
    }

    fn persist(&self, model_dir: &Path) -> Result<PersistMetadata> {
        if self.synonyms.is_empty() {
            return Ok(PersistMetadata {
                entity_synonyms: None,
            });
        }

        let path = model_dir.join(ENTITY_SYNONYMS_FILE);
        fs::write(&path, serde_json::to_string(&self.synonyms)?)?;
        log::info!("Persisted {} synonyms to {}", self.len(), path.display());

        Ok(PersistMetadata {
            entity_synonyms: Some(ENTITY_SYNONYMS_FILE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::training_data::Message;

    fn trained(data: &TrainingData) -> EntitySynonymMapper {
        let mut mapper = EntitySynonymMapper::new();
        mapper.train(data).unwrap();
        mapper
    }

    #[test]
    fn test_train_from_explicit_synonyms() {
        let mut data = TrainingData::new();
        data.add_synonym("NYC", "New York");
        let mapper = trained(&data);

        let output = mapper.process(&[Entity::with_value("nyc")]);
        assert_eq!(output.entities, vec![Entity::with_value("new york")]);
    }

    #[test]
    fn test_train_from_example_spans() {
        let mut data = TrainingData::new();
        data.add_example(
            Message::new("I live in NYC")
                .with_entities(vec![Entity::new(10, 13, "city", "New York")]),
        );
        let mapper = trained(&data);

        assert_eq!(mapper.synonyms().get_normalized("nyc"), Some("new york"));
        assert_eq!(mapper.len(), 1);
    }

    #[test]
    fn test_train_skips_missing_values_and_spans() {
        let mut data = TrainingData::new();
        let mut no_value = Entity::new(10, 13, "city", "x");
        no_value.value = None;
        data.add_example(
            Message::new("I live in NYC")
                .with_entities(vec![no_value, Entity::with_value("New York")]),
        );
        data.add_example(
            Message::new("New York is big")
                .with_entities(vec![Entity::new(0, 8, "city", "New York")]),
        );
        let mapper = trained(&data);

        assert!(mapper.is_empty());
    }

    #[test]
    fn test_train_with_non_text_value() {
        let mut data = TrainingData::new();
        let mut entity = Entity::new(7, 11, "number", "");
        entity.value = Some(EntityValue::Other(json!(5)));
        data.add_example(Message::new("I want FIVE").with_entities(vec![entity]));
        let mapper = trained(&data);

        assert_eq!(mapper.get("FIVE"), Some("5"));
    }

    #[test]
    fn test_process_does_not_touch_input() {
        let mapper: EntitySynonymMapper =
            EntitySynonymMapper::with_synonyms([("nyc", "new york")].into_iter().collect());

        let input = vec![
            Entity::with_value("NYC"),
            Entity::with_value("Boston"),
            Entity::default(),
        ];
        let output = mapper.process(&input);

        assert_eq!(input[0].value, Some("NYC".into()));
        assert_eq!(output.entities[0].value, Some("new york".into()));
        assert_eq!(output.entities[1].value, Some("Boston".into()));
        assert_eq!(output.entities[2].value, None);
    }

    #[test]
    fn test_process_is_idempotent() {
        let mapper: EntitySynonymMapper = EntitySynonymMapper::with_synonyms(
            [("nyc", "new york"), ("big apple", "new york")]
                .into_iter()
                .collect(),
        );

        let once = mapper.process(&[Entity::with_value("Big Apple"), Entity::with_value("LA")]);
        let twice = mapper.process(&once.entities);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_persist_empty_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let metadata = EntitySynonymMapper::new().persist(dir.path()).unwrap();

        assert_eq!(metadata.entity_synonyms, None);
        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            json!({"entity_synonyms": null})
        );
        assert!(!dir.path().join(ENTITY_SYNONYMS_FILE).exists());
    }

    #[test]
    fn test_persist_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut data = TrainingData::new();
        data.add_synonym("NYC", "New York");
        data.add_synonym("New York City", "New York");
        let mapper = trained(&data);

        let metadata = mapper.persist(dir.path()).unwrap();
        assert_eq!(metadata.entity_synonyms.as_deref(), Some(ENTITY_SYNONYMS_FILE));

        let written: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join(ENTITY_SYNONYMS_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(
            written,
            json!({"nyc": "new york", "new york city": "new york"})
        );

        let outcome =
            EntitySynonymMapper::load(Some(dir.path()), metadata.entity_synonyms.as_deref())
                .unwrap();
        assert!(outcome.diagnostic.is_none());
        assert_eq!(outcome.mapper.synonyms(), mapper.synonyms());
    }

    #[test]
    fn test_load_missing_file_warns_and_falls_back() {
        let dir = TempDir::new().unwrap();
        let outcome =
            EntitySynonymMapper::load(Some(dir.path()), Some(ENTITY_SYNONYMS_FILE)).unwrap();

        assert!(outcome.mapper.is_empty());
        assert_eq!(
            outcome.diagnostic,
            Some(LoadDiagnostic::MissingFile {
                path: dir.path().join(ENTITY_SYNONYMS_FILE)
            })
        );
    }

    #[test]
    fn test_load_without_arguments_is_empty() {
        let dir = TempDir::new().unwrap();
        for (model_dir, file_name) in [
            (None, Some(ENTITY_SYNONYMS_FILE)),
            (Some(dir.path()), None),
            (Some(dir.path()), Some("")),
        ] {
            let outcome = EntitySynonymMapper::load(model_dir, file_name).unwrap();
            assert!(outcome.mapper.is_empty());
            assert!(outcome.diagnostic.is_none());
        }
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(ENTITY_SYNONYMS_FILE), "{\"nyc\": ").unwrap();

        let result = EntitySynonymMapper::load(Some(dir.path()), Some(ENTITY_SYNONYMS_FILE));
        assert!(matches!(result, Err(crate::error::SynonymError::Json(_))));
    }

    #[test]
    fn test_component_contract() {
        let mapper = EntitySynonymMapper::new();
        assert_eq!(mapper.name(), "ner_synonyms");
        assert_eq!(mapper.context_provides(), &["entities"]);
        assert_eq!(mapper.output_provides(), &["entities"]);
    }
}
