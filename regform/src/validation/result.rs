/// Verdict for a single field value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    valid: bool,
    message: Option<String>,
}

impl ValidationResult {
    /// The value passed.
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// The value failed, with a message to show next to the field.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(msg.into()),
        }
    }

    /// The value failed; the error element keeps whatever text it already has.
    pub fn invalid_silent() -> Self {
        Self {
            valid: false,
            message: None,
        }
    }

    /// Build a verdict from a plain predicate result.
    pub fn from_bool(valid: bool) -> Self {
        if valid {
            Self::valid()
        } else {
            Self::invalid_silent()
        }
    }

    /// Check if the value passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Message for the invalid case (if any).
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Information about a single field that failed a whole-form pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field identifier (element id).
    pub field_id: String,
    /// Human label from the registry.
    pub label: String,
    /// Message shown in the paired error element.
    pub message: String,
}

/// Result of validating every field of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormReport {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation, in document order.
    Invalid(Vec<FieldError>),
}

impl FormReport {
    /// Build a report from the collected errors.
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Get the first validation error (if any).
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Get the id of the first invalid field (for scrolling into view).
    pub fn first_invalid_field(&self) -> Option<&str> {
        self.first_error().map(|e| e.field_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bool_has_no_message() {
        assert!(ValidationResult::from_bool(true).is_valid());
        let failed = ValidationResult::from_bool(false);
        assert!(!failed.is_valid());
        assert_eq!(failed.message(), None);
    }

    #[test]
    fn test_report_first_invalid_field() {
        let report = FormReport::from_errors(vec![
            FieldError {
                field_id: "email".into(),
                label: "Email".into(),
                message: "bad".into(),
            },
            FieldError {
                field_id: "zipCode".into(),
                label: "ZIP".into(),
                message: "bad".into(),
            },
        ]);
        assert!(report.is_invalid());
        assert_eq!(report.first_invalid_field(), Some("email"));
        assert_eq!(report.errors().len(), 2);
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = FormReport::from_errors(Vec::new());
        assert!(report.is_valid());
        assert!(report.first_error().is_none());
    }
}
