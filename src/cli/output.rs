//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{EntitySynonymsArgs, OutputFormat};
use crate::entity::Entity;
use crate::error::Result;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub model_dir: String,
    pub training_examples: usize,
    pub synonyms_learned: usize,
    pub entity_synonyms: Option<String>,
    pub duration_ms: u64,
}

/// Result structure for processing entities.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResults {
    pub entities: Vec<Entity>,
    pub replaced: usize,
}

/// Synonyms stored in a model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSynonyms {
    pub model_dir: String,
    pub trained_at: Option<String>,
    pub synonyms: BTreeMap<String, String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(
    message: &str,
    result: &T,
    args: &EntitySynonymsArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &EntitySynonymsArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;

    match value.get("entities").and_then(|e| e.as_array()) {
        Some(entities) => output_entities_human(entities),
        None => output_generic_human(&value),
    }
    Ok(())
}

/// Output processed entities, one per line.
fn output_entities_human(entities: &[serde_json::Value]) {
    for entity in entities {
        let value = entity.get("value").map_or_else(|| "null".to_string(), format_value);
        match entity.get("entity").and_then(|label| label.as_str()) {
            Some(label) => println!("{label}: {value}"),
            None => println!("{value}"),
        }
    }
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Object(nested) => {
                        println!("{key}:");
                        for (nested_key, nested_val) in nested {
                            let formatted_val = format_value(nested_val);
                            println!("  {nested_key} -> {formatted_val}");
                        }
                    }
                    _ => {
                        let formatted_val = format_value(val);
                        println!("{key}: {formatted_val}");
                    }
                }
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &EntitySynonymsArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => value.to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}
