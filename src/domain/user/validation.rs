//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User name cannot be empty")]
    EmptyName,

    #[error("User email cannot be empty")]
    EmptyEmail,
}

/// Validate a user name
///
/// A name is required and must be non-empty.
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    Ok(())
}

/// Validate a user email
///
/// An email is required and must be non-empty. Format checks are left to the
/// transport layer; uniqueness is enforced by the repository.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    Ok(())
}
