//! Field validation
//!
//! A [`Validatable`] pairs one field value with a sparse set of constraints.
//! Constraints that are not set always pass.
//!
//! Length bounds are strict: a trimmed length equal to `min_length` or
//! `max_length` fails. Numeric bounds are inclusive.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// The value under test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// String form used by the `required` check
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

/// One value plus the constraints it must satisfy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validatable {
    pub value: FieldValue,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl Validatable {
    /// Descriptor with no constraints
    pub fn new(value: impl Into<FieldValue>) -> Self {
        Self {
            value: value.into(),
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Every constraint this value fails, in check order
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.required && self.value.to_text().trim().is_empty() {
            violations.push(Violation::Required);
        }

        if let FieldValue::Text(text) = &self.value {
            let length = text.trim().chars().count();
            if let Some(min_length) = self.min_length {
                if length <= min_length {
                    violations.push(Violation::TooShort { min_length, length });
                }
            }
            if let Some(max_length) = self.max_length {
                if length >= max_length {
                    violations.push(Violation::TooLong { max_length, length });
                }
            }
        }

        if let FieldValue::Number(value) = self.value {
            // NaN fails both bounds.
            if let Some(min) = self.min {
                if value.is_nan() || value < min {
                    violations.push(Violation::BelowMin { min, value });
                }
            }
            if let Some(max) = self.max {
                if value.is_nan() || value > max {
                    violations.push(Violation::AboveMax { max, value });
                }
            }
        }

        violations
    }

    /// Whether every supplied constraint passes
    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

/// Check a descriptor, returning true only if every supplied constraint passes
pub fn validate(validatable: &Validatable) -> bool {
    validatable.is_valid()
}

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    Required,
    TooShort { min_length: usize, length: usize },
    TooLong { max_length: usize, length: usize },
    BelowMin { min: f64, value: f64 },
    AboveMax { max: f64, value: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Required => write!(f, "is required"),
            Violation::TooShort { min_length, length } => write!(
                f,
                "must be longer than {} characters (got {})",
                min_length, length
            ),
            Violation::TooLong { max_length, length } => write!(
                f,
                "must be shorter than {} characters (got {})",
                max_length, length
            ),
            Violation::BelowMin { min, value } => {
                write!(f, "must be at least {} (got {})", min, value)
            }
            Violation::AboveMax { max, value } => {
                write!(f, "must be at most {} (got {})", max, value)
            }
        }
    }
}
