//! Shared data model for column mapping suggestions.
//!
//! Destination fields and import profiles describe the target schema,
//! [`Mapping`] is the field-to-column assignment, and [`contract`] holds the
//! JSON shapes exchanged between the applier and the suggestion engine.

pub mod contract;
pub mod error;
pub mod field;
pub mod mapping;
pub mod options;

pub use contract::{SUGGEST_PATH, SuggestRequest, SuggestResponse};
pub use error::{ModelError, Result};
pub use field::{DestinationField, ImportProfile};
pub use mapping::{CandidateScore, Mapping, MatchBasis};
pub use options::{DEFAULT_THRESHOLD, MatchConfig};
