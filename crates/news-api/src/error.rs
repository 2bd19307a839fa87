//! API error type and its GraphQL representation.

use std::path::PathBuf;

use async_graphql::{ErrorExtensions, ServerError};
use news_core::NewsError;
use thiserror::Error;

/// Errors surfaced by the GraphQL layer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    News(#[from] NewsError),

    #[error("Not authorised!")]
    NotAuthorised,

    #[error("Invalid authentication token!")]
    InvalidToken,

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Failed to read key {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Machine readable code placed in the GraphQL error's `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::News(NewsError::DeletionOfOtherUsersPostForbidden) => "FORBIDDEN",
            Self::News(e) if e.is_not_found() => "NOT_FOUND",
            Self::News(e) if e.is_user_input() => "BAD_USER_INPUT",
            Self::News(_) => "INTERNAL",
            Self::NotAuthorised | Self::InvalidToken => "NOT_AUTHORISED",
            Self::Token(_) | Self::KeyFile { .. } => "INTERNAL",
        }
    }

    /// Request-level error for failures outside any resolver.
    pub fn into_server_error(self) -> ServerError {
        let mut server_error = ServerError::new(self.to_string(), None);
        server_error.extensions = self.extend().extensions;
        server_error
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Convert domain results into GraphQL results carrying an error code.
pub trait GqlResultExt<T> {
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T, E: Into<ApiError>> GqlResultExt<T> for Result<T, E> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| {
            let err: ApiError = e.into();
            if err.code() == "INTERNAL" {
                tracing::error!(error = %err, "Request failed");
            }
            err.extend()
        })
    }
}
