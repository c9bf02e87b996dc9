//! # entity-synonyms
//!
//! Normalizes extracted entity values to canonical forms using a synonym
//! table learned from training data, so that "NYC" and "New York City"
//! both come out as "new york".
//!
//! ## Features
//!
//! - Learns from explicit synonym lists and annotated training examples
//! - Case-insensitive lookup
//! - JSON persistence inside a model directory
//! - Command line tool for training and applying models

pub mod cli;
pub mod component;
pub mod entity;
pub mod error;
pub mod model;
pub mod synonym;
pub mod training_data;

pub mod prelude {
    pub use crate::component::{Component, PersistMetadata, ProcessOutput};
    pub use crate::entity::{Entity, EntityValue};
    pub use crate::error::{Result, SynonymError};
    pub use crate::synonym::{EntitySynonymMapper, SynonymTable};
    pub use crate::training_data::{Message, TrainingData};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
