//! Field validation for lead submissions

pub mod rules;
pub mod validators;
pub mod macros;


pub use rules::*;
pub use validators::*;

use crate::models::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::ValidationError;

/// Outcome of one submit attempt's checks. Recomputed in full each time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub field_errors: BTreeMap<Field, FieldValidationError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidationError {
    pub field: Field,
    pub message: String,
    pub code: String,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            field_errors: BTreeMap::new(),
        }
    }

    pub fn add_error(&mut self, field: Field, error: &ValidationError) {
        self.is_valid = false;
        let message = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Validation failed for field '{}'", field));

        self.field_errors.insert(field, FieldValidationError {
            field,
            message,
            code: error.code.to_string(),
        });
    }

    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(|e| e.message.as_str())
    }

    pub fn failed_fields(&self) -> Vec<Field> {
        self.field_errors.keys().copied().collect()
    }
}

pub trait Validatable {
    fn validate_comprehensive(&self) -> ValidationResult;
}
