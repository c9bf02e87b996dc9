//! Entity synonym mapping.
//!
//! - [`SynonymTable`]: normalized surface form to canonical value mapping
//! - [`EntitySynonymMapper`]: the pipeline component that learns the table,
//!   applies it to extracted entities and persists it

pub mod mapper;
pub mod table;

pub use mapper::{ENTITY_SYNONYMS_FILE, EntitySynonymMapper, LoadDiagnostic, LoadOutcome};
pub use table::SynonymTable;
