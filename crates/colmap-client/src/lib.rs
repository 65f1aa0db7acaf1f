//! Client side of column mapping suggestion.
//!
//! [`MappingApplier`] asks a [`SuggestionSource`] for a mapping once the
//! import form and its source columns are known, then fills only the
//! selectors the user has not set yet. Any failure to obtain suggestions
//! leaves the form untouched: manual mapping always stays possible.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Mutex;
//!
//! use colmap_client::{HttpSuggestionSource, ImportForm, MappingApplier};
//! use colmap_model::ImportProfile;
//!
//! # async fn run() -> colmap_client::Result<()> {
//! let columns = vec!["Email Address".to_string(), "Phone Number".to_string()];
//! let form = Mutex::new(ImportForm::from_profile(&ImportProfile::projects(), &columns));
//! let source = HttpSuggestionSource::new("http://localhost:8000/import/suggest-mapping")?;
//! let outcome = MappingApplier::new(source).apply(&form, &columns).await;
//! println!("filled {} selectors", outcome.filled.len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod applier;
pub mod error;
pub mod form;
pub mod http;
pub mod source;

pub use applier::{ApplyOutcome, ApplyState, MappingApplier, merge_suggestions};
pub use error::{Result, SuggestError};
pub use form::{ChangeOrigin, FieldChange, FormSelection, ImportForm, SubscriptionId};
pub use http::HttpSuggestionSource;
pub use source::{EngineSource, SuggestionSource};
