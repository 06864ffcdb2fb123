//! A field-path to message map for reporting payload validation failures.

use std::{collections::BTreeMap, fmt::Display};

use serde::Serialize;

use crate::Error;

/// Validation failures keyed by the offending field.
///
/// Handlers collect every failed field before responding so the client can
/// highlight all offending inputs at once rather than one per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Create an empty set of validation errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validation failure for `field`.
    pub fn add(&mut self, field: &str, message: impl ToString) {
        self.0.insert(field.to_string(), message.to_string());
    }

    /// Build an [Error::Validation] for a single failed field.
    pub fn single(field: &str, message: impl ToString) -> Error {
        let mut errors = Self::new();
        errors.add(field, message);
        Error::Validation(errors)
    }

    /// Whether any validation failure has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert the collected failures into a result.
    ///
    /// Returns `Ok(())` if no failure was recorded, otherwise an
    /// [Error::Validation] carrying the field map.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }

}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;

        for (field, message) in &self.0 {
            if !first {
                write!(f, ", ")?;
            }

            write!(f, "{field}: {message}")?;
            first = false;
        }

        Ok(())
    }
}

#[cfg(test)]
mod validation_errors_tests {
    use crate::Error;

    use super::ValidationErrors;

    #[test]
    fn empty_errors_convert_to_ok() {
        let errors = ValidationErrors::new();

        assert_eq!(errors.into_result(), Ok(()));
    }

    #[test]
    fn non_empty_errors_convert_to_validation_error() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Name must not be empty.");

        let result = errors.clone().into_result();

        assert_eq!(result, Err(Error::Validation(errors)));
    }

    #[test]
    fn serializes_as_flat_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("amount", "Amount is required.");
        errors.add("date", "Invalid date format.");

        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "amount": "Amount is required.",
                "date": "Invalid date format."
            })
        );
    }
}
