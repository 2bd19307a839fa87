//! Post domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link shared by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Upvotes minus downvotes.
    pub votes: i64,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether `user_id` authored this post.
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }
}
