//! Shape validation for untyped JSON input.
//!
//! Manifests, source maps and trace configurations are all parsed into
//! `serde_json::Value` first and then checked against their typed shape. A
//! failure yields a [`SchemaError`] listing what was wrong instead of a typed
//! value.

use std::fmt;

use log::trace;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// What was being validated, e.g. a file name
    pub subject: String,
    pub violations: Vec<String>,
}

impl SchemaError {
    fn new(subject: &str, violation: impl fmt::Display) -> Self {
        Self { subject: subject.to_string(), violations: vec![violation.to_string()] }
    }

    /// All violations on one line.
    pub fn summary(&self) -> String {
        self.violations.join("; ")
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {} format: {}", self.subject, self.summary())
    }
}

impl std::error::Error for SchemaError {}

/// Validate an already-parsed value against the shape of `T`.
pub fn validate<T: DeserializeOwned>(subject: &str, value: Value) -> Result<T, SchemaError> {
    trace!("Validating {} against its schema", subject);
    if !value.is_object() {
        return Err(SchemaError::new(subject, format!("expected an object, found {}", kind(&value))));
    }
    serde_json::from_value(value).map_err(|e| SchemaError::new(subject, e))
}

/// Parse JSON text and validate it against the shape of `T`.
pub fn parse<T: DeserializeOwned>(subject: &str, content: &str) -> Result<T, SchemaError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| SchemaError::new(subject, format!("not valid JSON: {}", e)))?;
    validate(subject, value)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
