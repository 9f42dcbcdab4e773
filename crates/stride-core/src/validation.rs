//! Shape checks for incoming requests.

use crate::StrideError;
use validator::{Validate, ValidationErrors};

/// Runs `validator` rules and maps failures to [`StrideError::Validation`].
pub trait ValidateExt: Validate {
    /// Validates the request, joining every field error into one message.
    fn validate_request(&self) -> Result<(), StrideError> {
        self.validate().map_err(into_stride_error)
    }
}

impl<T: Validate> ValidateExt for T {}

fn into_stride_error(errors: ValidationErrors) -> StrideError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let reason = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{}: {}", field, reason)
            })
        })
        .collect();
    // field_errors() is a HashMap; keep messages stable for callers
    messages.sort();

    StrideError::Validation(messages.join("; "))
}

/// Custom field rules.
pub mod rules {
    use validator::ValidationError;

    /// Rejects strings that are empty after trimming.
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Applies [`UserId::parse`](crate::UserId::parse) to ids that arrived
    /// in a request body.
    pub fn valid_user_id(value: &crate::UserId) -> Result<(), ValidationError> {
        crate::UserId::parse(value.as_str())
            .map(|_| ())
            .map_err(|_| ValidationError::new("invalid_id"))
    }
}
