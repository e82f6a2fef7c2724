use std::collections::HashMap;

use shared_types::AppError;
use tokio::sync::{mpsc, oneshot};

/// Trait for validating request DTOs before they reach the store.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

/// Reject required text fields that are empty once trimmed.
///
/// Each entry is `(field, value, message)`. All blank fields are reported together.
pub fn reject_blank(fields: &[(&str, &str, &str)]) -> Result<(), AppError> {
    let field_errors: HashMap<String, String> = fields
        .iter()
        .filter(|(_, value, _)| value.trim().is_empty())
        .map(|(field, _, message)| (field.to_string(), message.to_string()))
        .collect();

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation("Validation failed", field_errors))
    }
}

pub(crate) fn controller_gone<T>(_: mpsc::error::SendError<T>) -> AppError {
    AppError::internal("store controller is not running")
}

pub(crate) fn reply_dropped(_: oneshot::error::RecvError) -> AppError {
    AppError::internal("store controller dropped the reply")
}
