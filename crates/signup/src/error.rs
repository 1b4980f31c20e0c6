use std::collections::BTreeMap;

use thiserror::Error;

use crate::form::FieldKey;

/// Per-field validation messages, ordered like the form.
#[derive(Debug, Default, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FormErrors(BTreeMap<FieldKey, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldKey, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear_field(&mut self, field: FieldKey) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: FieldKey) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("backend rejected the submission with status {status}")]
    Rejected { status: u16 },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl SubmitError {
    /// Short line suitable for a status bar.
    pub fn summary(&self) -> String {
        match self {
            SubmitError::Rejected { status } => format!("Error submitting form (HTTP {status})"),
            SubmitError::Network(_) => "Network error, form not submitted".to_string(),
            SubmitError::InvalidEndpoint { url, .. } => format!("Invalid endpoint {url}"),
        }
    }
}
