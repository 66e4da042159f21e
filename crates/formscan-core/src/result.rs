// File: src/result.rs
// Purpose: Outcome of a validation pass

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A field that failed its rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{value} is not a valid {name} value")]
pub struct ValidationError {
    pub name: String,
    pub value: String,
}

impl ValidationError {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// `"<value> is not a valid <name> value"`
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

/// Result of validating one form.
///
/// Validity is derived from the error list on every call and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// An empty, valid result
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors in the order the fields were scanned
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Error messages, in scan order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ValidationError::message).collect()
    }

    pub(crate) fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// `Ok(())` when valid, the errors otherwise
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl From<Vec<ValidationError>> for ValidationResult {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        let error = ValidationError::new("first-name", "!!!");
        assert_eq!(error.message(), "!!! is not a valid first-name value");
        assert_eq!(error.to_string(), error.message());
    }

    #[test]
    fn test_validity_follows_errors() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(result.clone().into_result().is_ok());

        result.push(ValidationError::new("age", "a"));
        assert!(!result.is_valid());
        assert_eq!(result.messages(), vec!["a is not a valid age value"]);
        assert_eq!(result.into_result().unwrap_err().len(), 1);
    }

    #[test]
    fn test_serialize_result() {
        let result = ValidationResult::from(vec![ValidationError::new("age", "a")]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isValid": false,
                "errors": [
                    { "name": "age", "value": "a", "message": "a is not a valid age value" }
                ]
            })
        );
    }
}
