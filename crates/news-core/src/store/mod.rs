//! Storage interface.
//!
//! [`NewsStore`] is the only way business operations and the API layer reach
//! persisted data. The graph database backend lives in the `news-graph` crate;
//! [`memory::InMemoryStore`] keeps the same semantics in process.

pub mod memory;

use async_trait::async_trait;

use crate::error::NewsResult;
use crate::post::model::Post;
use crate::user::model::User;
use crate::vote::model::Vote;

/// A source of users, posts and votes.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Create a user and return its generated ID.
    ///
    /// Fails with `EmailAlreadyExists` if another user holds `email`.
    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> NewsResult<String>;

    /// Whether a user with this ID exists.
    async fn has_user(&self, id: &str) -> NewsResult<bool>;

    async fn get_user(&self, id: &str) -> NewsResult<User>;

    async fn get_user_by_email(&self, email: &str) -> NewsResult<User>;

    /// All users, ordered by name.
    async fn list_users(&self) -> NewsResult<Vec<User>>;

    /// Create a post authored by `author_id` with an empty tally.
    async fn create_post(&self, title: &str, author_id: &str) -> NewsResult<Post>;

    async fn get_post(&self, id: &str) -> NewsResult<Post>;

    /// All posts, oldest first.
    async fn list_posts(&self) -> NewsResult<Vec<Post>>;

    /// Posts authored by `author_id`, oldest first.
    async fn posts_by_author(&self, author_id: &str) -> NewsResult<Vec<Post>>;

    /// Delete a post together with its authorship and vote edges.
    ///
    /// Returns the post as it was before deletion.
    async fn delete_post(&self, id: &str) -> NewsResult<Post>;

    /// The vote `user_id` currently holds on `post_id`.
    async fn vote_of(&self, post_id: &str, user_id: &str) -> NewsResult<Vote>;

    /// Replace the vote `user_id` holds on `post_id` with `vote`.
    ///
    /// The replacement is atomic: a user never holds both an upvote and a
    /// downvote on the same post. Returns the post with its updated tally.
    async fn set_vote(&self, post_id: &str, user_id: &str, vote: Vote) -> NewsResult<Post>;
}
