//! Import form model: one column selector per destination field.

use std::fmt;

use colmap_model::{ImportProfile, Mapping};
use serde::Serialize;
use tracing::trace;

/// Who changed a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOrigin {
    User,
    Suggestion,
}

/// Change notification delivered to form listeners after each write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: String,
    /// New value; `None` when the selector was cleared.
    pub value: Option<String>,
    pub origin: ChangeOrigin,
}

/// Handle returned by [`ImportForm::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Read/write surface the mapping applier needs from a form.
pub trait FormSelection {
    /// Whether the form has a selector for `field`.
    fn has_selector(&self, field: &str) -> bool;

    /// Current value of the selector, `None` when empty or absent.
    fn value(&self, field: &str) -> Option<&str>;

    /// Writes `value` and notifies listeners.
    ///
    /// Returns `false` without notifying when there is no selector for `field`.
    fn set_value(&mut self, field: &str, value: &str, origin: ChangeOrigin) -> bool;
}

type Listener = Box<dyn FnMut(&FieldChange) + Send>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selector {
    field: String,
    value: Option<String>,
}

/// In-memory import form.
///
/// Selectors keep the order they were created in; every selector offers the
/// same options, the source columns.
pub struct ImportForm {
    selectors: Vec<Selector>,
    options: Vec<String>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ImportForm {
    pub fn new<I, S>(fields: I, options: Vec<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selectors: fields
                .into_iter()
                .map(|field| Selector {
                    field: field.into(),
                    value: None,
                })
                .collect(),
            options,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Form with one empty selector per profile field.
    pub fn from_profile(profile: &ImportProfile, columns: &[String]) -> Self {
        Self::new(profile.field_ids(), columns.to_vec())
    }

    /// Columns every selector offers.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Selectors in form order as `(field, value)`.
    pub fn selectors(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.selectors
            .iter()
            .map(|s| (s.field.as_str(), s.value.as_deref()))
    }

    /// Filled selectors as a mapping.
    pub fn selection(&self) -> Mapping {
        self.selectors
            .iter()
            .filter_map(|s| s.value.clone().map(|value| (s.field.clone(), value)))
            .collect()
    }

    /// Records a manual choice.
    pub fn select(&mut self, field: &str, column: &str) -> bool {
        self.set_value(field, column, ChangeOrigin::User)
    }

    /// Empties a selector by user action.
    pub fn clear(&mut self, field: &str) -> bool {
        self.write(field, None, ChangeOrigin::User)
    }

    /// Registers a listener called after every selector write.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FieldChange) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn write(&mut self, field: &str, value: Option<&str>, origin: ChangeOrigin) -> bool {
        let Some(selector) = self.selectors.iter_mut().find(|s| s.field == field) else {
            return false;
        };
        selector.value = value.filter(|v| !v.is_empty()).map(str::to_string);
        let change = FieldChange {
            field: selector.field.clone(),
            value: selector.value.clone(),
            origin,
        };
        trace!(field, ?origin, listeners = self.listeners.len(), "selector changed");
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
        true
    }
}

impl FormSelection for ImportForm {
    fn has_selector(&self, field: &str) -> bool {
        self.selectors.iter().any(|s| s.field == field)
    }

    fn value(&self, field: &str) -> Option<&str> {
        self.selectors
            .iter()
            .find(|s| s.field == field)
            .and_then(|s| s.value.as_deref())
    }

    fn set_value(&mut self, field: &str, value: &str, origin: ChangeOrigin) -> bool {
        self.write(field, Some(value), origin)
    }
}

impl fmt::Debug for ImportForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportForm")
            .field("selectors", &self.selectors)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn form() -> ImportForm {
        ImportForm::new(
            ["email", "phone"],
            vec!["Email Address".to_string(), "Phone Number".to_string()],
        )
    }

    #[test]
    fn writes_notify_listeners() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut form = form();
        let sink = Arc::clone(&seen);
        form.subscribe(move |change| sink.lock().unwrap().push(change.clone()));

        assert!(form.select("email", "Email Address"));
        assert!(form.clear("email"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].value.as_deref(), Some("Email Address"));
        assert_eq!(seen[0].origin, ChangeOrigin::User);
        assert_eq!(seen[1].value, None);
    }

    #[test]
    fn unknown_selector_is_not_written() {
        let calls = Arc::new(Mutex::new(0));
        let mut form = form();
        let counter = Arc::clone(&calls);
        form.subscribe(move |_| *counter.lock().unwrap() += 1);

        assert!(!form.set_value("fax", "Fax", ChangeOrigin::Suggestion));
        assert!(!form.has_selector("fax"));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let calls = Arc::new(Mutex::new(0));
        let mut form = form();
        let counter = Arc::clone(&calls);
        let id = form.subscribe(move |_| *counter.lock().unwrap() += 1);

        form.select("phone", "Phone Number");
        assert!(form.unsubscribe(id));
        assert!(!form.unsubscribe(id));
        form.select("email", "Email Address");

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(form.selection().len(), 2);
    }

    #[test]
    fn selectors_keep_form_order() {
        let mut form = ImportForm::from_profile(&ImportProfile::projects(), &[]);
        form.select("revenue", "Sales");
        let fields: Vec<&str> = form.selectors().map(|(field, _)| field).collect();
        assert_eq!(fields[0], "project_code");
        assert_eq!(form.value("revenue"), Some("Sales"));
        assert_eq!(form.value("expenses"), None);
    }
}
