//! Centralized error types for Dojo News.

use thiserror::Error;

/// Main error type for news operations.
///
/// The display strings are returned verbatim to API clients, so they are
/// part of the public contract.
#[derive(Error, Debug)]
pub enum NewsError {
    #[error("User with email {0} already exists!")]
    EmailAlreadyExists(String),

    #[error("No user found for ID {0}!")]
    UserIdNotFound(String),

    #[error("No user with email {0} found!")]
    UserEmailNotFound(String),

    #[error("No post found for ID {0}!")]
    PostIdNotFound(String),

    #[error("Password must be at least {} characters long!", crate::user::MIN_PASSWORD_LENGTH)]
    TooShortPassword,

    #[error("Invalid password!")]
    InvalidPassword,

    #[error("Deleting other users' posts is forbidden!")]
    DeletionOfOtherUsersPostForbidden,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Result type for news operations.
pub type NewsResult<T> = Result<T, NewsError>;

impl NewsError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Whether the error reports a missing user or post.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserIdNotFound(_) | Self::UserEmailNotFound(_) | Self::PostIdNotFound(_)
        )
    }

    /// Whether the error was caused by the caller's input rather than the backend.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists(_)
                | Self::TooShortPassword
                | Self::InvalidPassword
                | Self::ValidationError(_)
        )
    }
}
