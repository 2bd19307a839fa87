//! # News API
//!
//! GraphQL API for Dojo News, built on async-graphql.
//!
//! - [`schema`]: query and mutation roots, object types and [`build_schema`].
//! - [`auth`]: ES256 authentication tokens.
//! - [`permissions`]: the allow/deny rule table gating root fields.
//! - [`context`]: schema-wide and per-request data seen by resolvers.

pub mod auth;
pub mod context;
pub mod error;
pub mod permissions;
pub mod schema;

pub use auth::{AuthConfig, Authenticator, Claims};
pub use context::{ApiContext, Session};
pub use error::{ApiError, ApiResult};
pub use permissions::{Permissions, Rule};
pub use schema::{build_schema, sdl, NewsSchema};
