//! Post management.

pub mod model;

use tracing::{info, warn};

use crate::error::{NewsError, NewsResult};
use crate::store::NewsStore;
use model::Post;

/// Create a post authored by `author_id`.
pub async fn create_post(store: &dyn NewsStore, title: &str, author_id: &str) -> NewsResult<Post> {
    let title = title.trim();
    if title.is_empty() {
        return Err(NewsError::validation("title must not be empty"));
    }

    let post = store.create_post(title, author_id).await?;
    info!(post_id = %post.id, author_id, "Post created");
    Ok(post)
}

/// Get a post by ID.
pub async fn get_post(store: &dyn NewsStore, id: &str) -> NewsResult<Post> {
    store.get_post(id).await
}

/// List all posts, oldest first.
pub async fn list_posts(store: &dyn NewsStore) -> NewsResult<Vec<Post>> {
    store.list_posts().await
}

/// List the posts a user authored, oldest first.
pub async fn posts_by_author(store: &dyn NewsStore, author_id: &str) -> NewsResult<Vec<Post>> {
    store.posts_by_author(author_id).await
}

/// Delete a post on behalf of `requester_id`.
///
/// Only the author of a post may delete it.
pub async fn delete_post(store: &dyn NewsStore, id: &str, requester_id: &str) -> NewsResult<Post> {
    let post = store.get_post(id).await?;

    if !post.is_authored_by(requester_id) {
        warn!(post_id = %id, requester_id, "Refused to delete another user's post");
        return Err(NewsError::DeletionOfOtherUsersPostForbidden);
    }

    let deleted = store.delete_post(id).await?;
    info!(post_id = %id, "Post deleted");
    Ok(deleted)
}
