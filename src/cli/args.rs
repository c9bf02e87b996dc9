//! Command line argument parsing for the entity-synonyms CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// entity-synonyms - learn and apply canonical entity values
#[derive(Parser, Debug, Clone)]
#[command(name = "entity-synonyms")]
#[command(about = "Learn entity synonyms and map entity values to canonical forms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct EntitySynonymsArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl EntitySynonymsArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log level for the effective verbosity: quiet shows errors only,
    /// the default shows warnings, and each `-v` opens one more level.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a synonym model from a training data file
    Train(TrainArgs),

    /// Map entity values through a trained model
    Process(ProcessArgs),

    /// Show the synonyms stored in a model
    Show(ShowArgs),
}

/// Arguments for training a model
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Training data file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Directory to write the model into
    #[arg(short, long, value_name = "DIR", env = "ENTITY_SYNONYMS_MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Language of the training data
    #[arg(short, long)]
    pub language: Option<String>,
}

/// Arguments for processing entities
#[derive(Parser, Debug, Clone)]
pub struct ProcessArgs {
    /// Directory containing a trained model
    #[arg(short, long, value_name = "DIR", env = "ENTITY_SYNONYMS_MODEL_DIR")]
    pub model_dir: PathBuf,

    /// JSON file with an array of entities
    #[arg(short, long, value_name = "FILE", conflicts_with = "values")]
    pub input: Option<PathBuf>,

    /// Entity values to map (repeatable)
    #[arg(long = "value", value_name = "VALUE")]
    pub values: Vec<String>,
}

/// Arguments for showing a model
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Directory containing a trained model
    #[arg(short, long, value_name = "DIR", env = "ENTITY_SYNONYMS_MODEL_DIR")]
    pub model_dir: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
