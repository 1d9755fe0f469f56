//! Validation error types and the request-body gate

use std::fmt;

use bizdir_core::{validate_against_schema, Schema};
use serde_json::Value;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not a JSON object
    NotAnObject { resource: &'static str },

    /// Body lacks one or more required keys
    MissingFields {
        resource: &'static str,
        fields: Vec<String>,
    },

    /// String doesn't match required format (e.g., numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject { resource } => {
                write!(f, "Request body is not a valid {} object", resource)
            }
            Self::MissingFields { resource, fields } => write!(
                f,
                "Request body is not a valid {} object (missing: {})",
                resource,
                fields.join(", ")
            ),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check that `candidate` is acceptable input for `resource`.
///
/// Acceptance is decided by the schema validator alone; on rejection the
/// missing required keys are listed for the error message.
pub fn check_body(
    resource: &'static str,
    schema: &Schema,
    candidate: &Value,
) -> Result<(), ValidationError> {
    if validate_against_schema(candidate, schema) {
        return Ok(());
    }

    match candidate.as_object() {
        Some(object) => Err(ValidationError::MissingFields {
            resource,
            fields: schema
                .missing_fields(object)
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }),
        None => Err(ValidationError::NotAnObject { resource }),
    }
}
