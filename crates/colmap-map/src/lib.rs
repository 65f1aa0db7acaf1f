//! Column mapping suggestion engine.
//!
//! Proposes, for each destination field of an import profile, the source
//! column that best matches it. Matching is lexical: labels are normalized
//! (case, separators, camelCase, a small synonym table), every pair is scored
//! by exact match, containment, token overlap and edit distance, and pairs are
//! assigned greedily one-to-one above an acceptance threshold.
//!
//! # Design
//!
//! - **Pure**: output depends only on fields, columns and [`MatchConfig`]
//! - **Explainable**: every accepted pair records the measure that scored it
//! - **Conservative**: sub-threshold pairs are never offered
//!
//! [`MatchConfig`]: colmap_model::MatchConfig

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod normalize;
pub mod score;
pub mod service;
pub mod synonyms;
pub mod validate;

pub use engine::{ConfidenceLevel, ConfidenceThresholds, SuggestionEngine, SuggestionReport};
pub use error::{MapError, Result};
pub use normalize::{NormalizedLabel, normalize_label};
pub use score::{ScoreBreakdown, score_labels};
pub use service::SuggestionService;
pub use validate::{IssueSeverity, MappingIssue, ValidationReport, validate_mapping};
