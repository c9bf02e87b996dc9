//! Command implementations for the entity-synonyms CLI.

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::component::Component;
use crate::entity::Entity;
use crate::error::{Result, SynonymError};
use crate::model::{self, ModelMetadata};
use crate::synonym::LoadDiagnostic;
use crate::training_data::TrainingData;

/// Execute a CLI command.
pub fn execute_command(args: EntitySynonymsArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Process(process_args) => process(process_args.clone(), &args),
        Command::Show(show_args) => show(show_args.clone(), &args),
    }
}

/// Train a model and persist it.
fn train(args: TrainArgs, cli_args: &EntitySynonymsArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading training data from: {}", args.data.display());
    }

    let start = Instant::now();
    let training_data = TrainingData::load(&args.data)?;
    if training_data.is_empty() {
        log::warn!(
            "Training data in '{}' contains no examples or synonyms",
            args.data.display()
        );
    }

    let (mapper, metadata) =
        model::train_and_persist(&training_data, &args.model_dir, args.language)?;

    output_result(
        "Model trained successfully",
        &TrainResult {
            model_dir: args.model_dir.to_string_lossy().to_string(),
            training_examples: training_data.training_examples().len(),
            synonyms_learned: mapper.len(),
            entity_synonyms: metadata.components.entity_synonyms,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Map entity values through a trained model.
fn process(args: ProcessArgs, cli_args: &EntitySynonymsArgs) -> Result<()> {
    let entities = match &args.input {
        Some(input) => load_entities(input)?,
        None if !args.values.is_empty() => args
            .values
            .iter()
            .map(|value| Entity::with_value(value.as_str()))
            .collect(),
        None => {
            return Err(SynonymError::invalid_argument(
                "Provide entities with --input or at least one --value",
            ));
        }
    };

    let outcome = model::load_mapper(&args.model_dir)?;
    report_diagnostic(outcome.diagnostic.as_ref(), cli_args);

    let output = outcome.mapper.process(&entities);
    let replaced = entities
        .iter()
        .zip(&output.entities)
        .filter(|(before, after)| before.value != after.value)
        .count();

    output_result(
        "Processed entities",
        &ProcessResults {
            entities: output.entities,
            replaced,
        },
        cli_args,
    )
}

/// Show the synonyms stored in a model.
fn show(args: ShowArgs, cli_args: &EntitySynonymsArgs) -> Result<()> {
    let metadata = ModelMetadata::load(&args.model_dir)?;
    let outcome = model::load_mapper(&args.model_dir)?;
    report_diagnostic(outcome.diagnostic.as_ref(), cli_args);

    output_result(
        "Model synonyms",
        &ModelSynonyms {
            model_dir: args.model_dir.to_string_lossy().to_string(),
            trained_at: metadata.map(|m| m.trained_at.to_rfc3339()),
            synonyms: outcome.mapper.synonyms().clone().into(),
        },
        cli_args,
    )
}

/// Read a JSON array of entities from a file.
fn load_entities(path: &Path) -> Result<Vec<Entity>> {
    let content = fs::read_to_string(path).map_err(|e| {
        SynonymError::invalid_argument(format!(
            "Failed to read entities file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn report_diagnostic(diagnostic: Option<&LoadDiagnostic>, cli_args: &EntitySynonymsArgs) {
    if let Some(LoadDiagnostic::MissingFile { path }) = diagnostic {
        if cli_args.verbosity() > 1 {
            println!(
                "Synonym file {} is missing, continuing without synonyms",
                path.display()
            );
        }
    }
}
