use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid user id: {message}")]
    InvalidId { message: String },

    #[error("Invalid user name: {message}")]
    InvalidName { message: String },

    #[error("Invalid user email: {message}")]
    InvalidEmail { message: String },

    #[error("Already exists: {message}")]
    AlreadyExists { message: String },

    #[error("Email taken: {message}")]
    EmailTaken { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName {
            message: message.into(),
        }
    }

    pub fn invalid_email(message: impl Into<String>) -> Self {
        Self::InvalidEmail {
            message: message.into(),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    pub fn email_taken(message: impl Into<String>) -> Self {
        Self::EmailTaken {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
