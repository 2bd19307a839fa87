//! Dojo News Core Library
//!
//! Domain models, storage interface and business rules for the news board:
//! users, the links they post, and the votes they cast on them.

pub mod error;
pub mod post;
pub mod store;
pub mod user;
pub mod vote;

pub use error::{NewsError, NewsResult};
pub use post::model::Post;
pub use store::{memory::InMemoryStore, NewsStore};
pub use user::model::User;
pub use vote::model::Vote;
