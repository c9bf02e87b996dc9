//! Error types for the entity-synonyms crate.
//!
//! All fallible operations return [`SynonymError`] through the crate-wide
//! [`Result`] alias.
//!
//! # Examples
//!
//! ```
//! use entity_synonyms::error::{Result, SynonymError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SynonymError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for entity-synonyms operations.
#[derive(Error, Debug)]
pub enum SynonymError {
    /// I/O errors (reading training data, writing model files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed training data
    #[error("Training data error: {0}")]
    TrainingData(String),

    /// Model directory or metadata problems
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with SynonymError.
pub type Result<T> = std::result::Result<T, SynonymError>;

impl SynonymError {
    /// Create a new training data error.
    pub fn training_data<S: Into<String>>(msg: S) -> Self {
        SynonymError::TrainingData(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SynonymError::Model(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SynonymError::InvalidArgument(msg.into())
    }
}
