//! Applies suggested mappings to a form without overwriting user choices.

use std::sync::{Mutex, PoisonError};

use colmap_model::Mapping;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::SuggestError;
use crate::form::{ChangeOrigin, FormSelection};
use crate::source::SuggestionSource;

/// What one application did, by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    /// Selectors that were empty and now hold the suggested column.
    pub filled: Vec<String>,
    /// Selectors that already held a value and were left alone.
    pub skipped_occupied: Vec<String>,
    /// Suggested fields the form has no selector for.
    pub skipped_unknown: Vec<String>,
}

impl ApplyOutcome {
    pub fn is_noop(&self) -> bool {
        self.filled.is_empty()
    }
}

/// Lifecycle of one suggestion attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ApplyState {
    #[default]
    NotStarted,
    Requesting,
    Applied(ApplyOutcome),
    /// Fetch failed; the form was left untouched.
    SkippedOnError(SuggestError),
}

impl ApplyState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Applied(_) | Self::SkippedOnError(_))
    }

    /// Error that made the attempt skip, if any.
    pub fn error(&self) -> Option<&SuggestError> {
        match self {
            Self::SkippedOnError(err) => Some(err),
            _ => None,
        }
    }
}

/// Fills empty form selectors from a [`SuggestionSource`].
///
/// Suggestion is a convenience: a failed fetch is logged and the form stays
/// exactly as it was.
#[derive(Debug)]
pub struct MappingApplier<S> {
    source: S,
    state: ApplyState,
}

impl<S: SuggestionSource> MappingApplier<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ApplyState::NotStarted,
        }
    }

    pub fn state(&self) -> &ApplyState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches suggestions for `columns` and merges them into `form`.
    ///
    /// The form is locked only once the response is in, so user edits made
    /// while the request is outstanding are seen and kept. Never fails.
    pub async fn apply<F: FormSelection>(
        &mut self,
        form: &Mutex<F>,
        columns: &[String],
    ) -> ApplyOutcome {
        self.state = ApplyState::Requesting;
        let mapping = match self.source.fetch(columns).await {
            Ok(mapping) => mapping,
            Err(err) if err.is_unavailable() => {
                warn!(error = %err, "column suggestions unavailable, form left unchanged");
                self.state = ApplyState::SkippedOnError(err);
                return ApplyOutcome::default();
            }
            Err(err) => {
                error!(error = %err, "column suggestion request rejected, form left unchanged");
                self.state = ApplyState::SkippedOnError(err);
                return ApplyOutcome::default();
            }
        };

        let outcome = {
            let mut form = form.lock().unwrap_or_else(PoisonError::into_inner);
            merge_suggestions(&mut *form, &mapping)
        };
        info!(
            suggested = mapping.len(),
            filled = outcome.filled.len(),
            skipped_occupied = outcome.skipped_occupied.len(),
            skipped_unknown = outcome.skipped_unknown.len(),
            "applied column suggestions"
        );
        self.state = ApplyState::Applied(outcome.clone());
        outcome
    }
}

/// Writes each suggestion into its selector if that selector is empty.
///
/// Occupied and unknown selectors are skipped silently, as are suggestions
/// with an empty column, so applying the same mapping again changes nothing.
pub fn merge_suggestions<F: FormSelection + ?Sized>(form: &mut F, mapping: &Mapping) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();
    for (field, column) in mapping.iter() {
        if column.is_empty() {
            debug!(field, "suggestion has no column");
            continue;
        }
        if !form.has_selector(field) {
            debug!(field, "no selector for suggested field");
            outcome.skipped_unknown.push(field.to_string());
            continue;
        }
        if form.value(field).is_some_and(|current| !current.is_empty()) {
            debug!(field, "selector already set, keeping it");
            outcome.skipped_occupied.push(field.to_string());
            continue;
        }
        if form.set_value(field, column, ChangeOrigin::Suggestion) {
            outcome.filled.push(field.to_string());
        } else {
            outcome.skipped_unknown.push(field.to_string());
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ImportForm;

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs
            .iter()
            .map(|(f, c)| ((*f).to_string(), (*c).to_string()))
            .collect()
    }

    #[test]
    fn merge_fills_only_empty_selectors() {
        let mut form = ImportForm::new(["email", "phone"], Vec::new());
        form.select("email", "Contact");

        let outcome = merge_suggestions(
            &mut form,
            &mapping(&[
                ("email", "Email Address"),
                ("phone", "Phone Number"),
                ("fax", "Fax"),
            ]),
        );

        assert_eq!(outcome.filled, vec!["phone"]);
        assert_eq!(outcome.skipped_occupied, vec!["email"]);
        assert_eq!(outcome.skipped_unknown, vec!["fax"]);
        assert_eq!(form.value("email"), Some("Contact"));
        assert_eq!(form.value("phone"), Some("Phone Number"));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut form = ImportForm::new(["email", "phone"], Vec::new());
        let suggested = mapping(&[("email", "Email Address"), ("phone", "Phone Number")]);

        merge_suggestions(&mut form, &suggested);
        let after_first = form.selection();
        let second = merge_suggestions(&mut form, &suggested);

        assert!(second.is_noop());
        assert_eq!(second.skipped_occupied.len(), 2);
        assert_eq!(form.selection(), after_first);
    }

    #[test]
    fn state_starts_not_started() {
        let state = ApplyState::default();
        assert_eq!(state, ApplyState::NotStarted);
        assert!(!state.is_terminal());
        let skipped = ApplyState::SkippedOnError(SuggestError::Network("refused".to_string()));
        assert!(skipped.is_terminal());
        assert!(matches!(skipped.error(), Some(SuggestError::Network(_))));
        assert!(state.error().is_none());
    }

    #[test]
    fn merge_ignores_empty_columns() {
        let mut form = ImportForm::new(["email", "phone"], Vec::new());
        let changes = std::sync::Arc::new(std::sync::Mutex::new(0));
        let counter = std::sync::Arc::clone(&changes);
        form.subscribe(move |_| *counter.lock().unwrap() += 1);
        let mut suggested = mapping(&[("phone", "Phone Number")]);
        suggested.insert("email", "");

        let first = merge_suggestions(&mut form, &suggested);
        let second = merge_suggestions(&mut form, &suggested);

        assert_eq!(first.filled, vec!["phone"]);
        assert!(first.skipped_unknown.is_empty());
        assert!(second.is_noop());
        assert_eq!(form.value("email"), None);
        assert_eq!(*changes.lock().unwrap(), 1);
    }
}
