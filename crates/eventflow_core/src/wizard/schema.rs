//! Per-step field validation.
//!
//! # Responsibility
//! - Declare the field rules one wizard step owns.
//! - Produce the field -> message error map the UI renders inline.
//!
//! # Invariants
//! - An empty error map means the step passed.
//! - Fields without a `Required` rule are optional: remaining rules only
//!   apply when a non-blank value is present.

use crate::model::field::{FieldValue, FieldValues};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

// Shape check only; deliverability is the endpoint's problem.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Validation failure map, field name -> user-facing message.
pub type ValidationErrors = BTreeMap<String, String>;

/// One constraint over a single field's value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// Value must be present and non-blank.
    Required,
    /// Text must contain at least this many characters.
    MinChars(usize),
    /// Text must look like an email address.
    Email,
    /// Number must fall within the inclusive range.
    NumberRange { min: f64, max: f64 },
}

impl FieldRule {
    fn check(&self, value: &FieldValue) -> Option<String> {
        match self {
            Self::Required => None, // presence handled before per-value rules
            Self::MinChars(min) => match value.as_text() {
                Some(text) if text.trim().chars().count() >= *min => None,
                Some(_) => Some(format!("must have at least {min} characters")),
                None => Some("expected text".to_string()),
            },
            Self::Email => match value.as_text() {
                Some(text) if EMAIL_RE.is_match(text.trim()) => None,
                Some(_) => Some("enter a valid email address".to_string()),
                None => Some("expected text".to_string()),
            },
            Self::NumberRange { min, max } => match value.as_number() {
                Some(number) if (*min..=*max).contains(&number) => None,
                Some(_) => Some(format!("must be between {min} and {max}")),
                None => Some("expected a number".to_string()),
            },
        }
    }
}

/// Rules for one named field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub rules: Vec<FieldRule>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, rules: Vec<FieldRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    fn is_required(&self) -> bool {
        self.rules.contains(&FieldRule::Required)
    }
}

/// Validation schema for one wizard step, covering only its own fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepSchema {
    pub fields: Vec<FieldSpec>,
}

impl StepSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Checks submitted values against this step's rules.
    ///
    /// Only the first failing rule per field is reported, matching how the
    /// messages are rendered inline under each input.
    pub fn validate(&self, values: &FieldValues) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            let Some(value) = values.get(&field.name).filter(|value| !value.is_blank()) else {
                if field.is_required() {
                    errors.insert(field.name.clone(), "this field is required".to_string());
                }
                continue;
            };

            for rule in &field.rules {
                if let Some(message) = rule.check(value) {
                    errors.insert(field.name.clone(), message);
                    break;
                }
            }
        }

        errors
    }
}
