//! Cypher queries over the news graph.
//!
//! Query functions return `Ok(None)` (or `false`) when the node they address
//! does not exist; [`GraphStore`](crate::GraphStore) turns those into domain
//! errors.

pub mod posts;
pub mod users;
pub mod votes;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use neo4rs::Row;

use news_core::{Post, User};

/// Projection shared by every query returning a post bound to `p` with its
/// author bound to `author`.
pub(crate) const POST_PROJECTION: &str = "RETURN p.id AS id, p.title AS title,
            p.created_at AS created_at, author.id AS author_id,
            size([(p)<-[:UPVOTED]-(:User) | 1]) - size([(p)<-[:DOWNVOTED]-(:User) | 1]) AS votes";

/// Projection for a user bound to `u`.
pub(crate) const USER_PROJECTION: &str =
    "RETURN u.id AS id, u.name AS name, u.email AS email, u.password_hash AS password_hash";

fn field<T: serde::de::DeserializeOwned>(row: &Row, name: &str) -> Result<T> {
    row.get(name)
        .map_err(|e| anyhow!("Failed to get field '{}': {:?}", name, e))
}

pub(crate) fn post_from_row(row: &Row) -> Result<Post> {
    let created_at = timestamp(field(row, "created_at")?)?;
    Ok(Post {
        id: field(row, "id")?,
        title: field(row, "title")?,
        votes: field(row, "votes")?,
        author_id: field(row, "author_id")?,
        created_at,
    })
}

/// `created_at` is stored as epoch milliseconds.
fn timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| anyhow!("Invalid created_at timestamp: {}", millis))
}

pub(crate) fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: field(row, "id")?,
        name: field(row, "name")?,
        email: field(row, "email")?,
        password_hash: field(row, "password_hash")?,
    })
}
