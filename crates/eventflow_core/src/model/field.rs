//! Form field values accumulated by the wizard.
//!
//! # Responsibility
//! - Represent the value of one form field across steps.
//! - Flatten accumulated values into the single JSON object sent on submit.
//!
//! # Invariants
//! - A step's values only enter the accumulated map after that step's
//!   schema passed validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of one form field.
///
/// Untagged so the submission payload carries plain JSON scalars, matching
/// the wire shape the contact endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns whether the value counts as absent for optional-field rules.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(value) if value.trim().is_empty())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Accumulated field values, keyed by field name.
///
/// A `BTreeMap` keeps payload key order deterministic.
pub type FieldValues = BTreeMap<String, FieldValue>;

/// Flattens accumulated values into one JSON object for submission.
pub fn flatten_payload(values: &FieldValues) -> serde_json::Value {
    serde_json::to_value(values).unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
}
