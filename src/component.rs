//! The contract between pipeline components and the orchestrator.

use std::fmt::Debug;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::Result;
use crate::training_data::TrainingData;

/// Key of the shared processing context holding extracted entities.
pub const ENTITIES: &str = "entities";

/// Result of running a component over a message's entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// Entities after the component rewrote them.
    pub entities: Vec<Entity>,
}

/// What a component wrote into the model directory.
///
/// Merged into the model metadata so `load` can find the file again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistMetadata {
    /// File name of the persisted synonym table, relative to the model
    /// directory, or `None` when nothing was written.
    pub entity_synonyms: Option<String>,
}

/// A trainable, persistable pipeline step operating on entities.
pub trait Component: Send + Sync + Debug {
    /// Registered component name.
    fn name(&self) -> &str;

    /// Context keys this component needs before it can process.
    fn context_requires(&self) -> &[&'static str] {
        &[]
    }

    /// Context keys this component (re)writes during processing.
    fn context_provides(&self) -> &[&'static str] {
        &[]
    }

    /// Keys this component contributes to the final parse output.
    fn output_provides(&self) -> &[&'static str] {
        &[]
    }

    /// Learn from training data.
    fn train(&mut self, training_data: &TrainingData) -> Result<()>;

    /// Rewrite a message's entities.
    fn process(&self, entities: &[Entity]) -> ProcessOutput;

    /// Write learned state into `model_dir`.
    fn persist(&self, model_dir: &Path) -> Result<PersistMetadata>;
}
