//! Request validation: presence checks only.

use crate::config::{Presence, ResourceConfig};
use crate::error::AppError;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Every required column must be present under its rule. No other checks.
    pub fn validate_create(body: &Map<String, Value>, resource: &ResourceConfig) -> Result<(), AppError> {
        for c in resource.required_columns() {
            if !is_present(body.get(&c.name), c.presence) {
                tracing::debug!(resource = %resource.path_segment, column = %c.name, "missing required field");
                return Err(AppError::Validation(resource.messages.missing_fields.clone()));
            }
        }
        Ok(())
    }

    /// All named fields must be truthy.
    pub fn require_truthy(body: &Map<String, Value>, fields: &[&str], message: &str) -> Result<(), AppError> {
        if fields.iter().all(|f| is_truthy(body.get(*f))) {
            Ok(())
        } else {
            Err(AppError::Validation(message.to_string()))
        }
    }
}

pub fn is_present(v: Option<&Value>, presence: Presence) -> bool {
    match presence {
        Presence::Optional => true,
        Presence::Defined => v.is_some(),
        Presence::Truthy => is_truthy(v),
    }
}

/// Absent, null, false, 0 and "" are falsy; everything else (including [] and {}) is truthy.
pub fn is_truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
