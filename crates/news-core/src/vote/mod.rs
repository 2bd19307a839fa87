//! Voting on posts.
//!
//! A user holds at most one vote per post. Upvoting a downvoted post (or the
//! other way round) replaces the old vote, moving the tally by two.

pub mod model;

use crate::error::NewsResult;
use crate::post::model::Post;
use crate::store::NewsStore;
use model::Vote;

/// Upvote a post. Repeating an upvote leaves the tally unchanged.
pub async fn upvote(store: &dyn NewsStore, post_id: &str, user_id: &str) -> NewsResult<Post> {
    store.set_vote(post_id, user_id, Vote::Up).await
}

/// Downvote a post. Repeating a downvote leaves the tally unchanged.
pub async fn downvote(store: &dyn NewsStore, post_id: &str, user_id: &str) -> NewsResult<Post> {
    store.set_vote(post_id, user_id, Vote::Down).await
}

/// Withdraw whatever vote the user holds on a post.
pub async fn unvote(store: &dyn NewsStore, post_id: &str, user_id: &str) -> NewsResult<Post> {
    store.set_vote(post_id, user_id, Vote::None).await
}

/// The vote a user currently holds on a post.
pub async fn vote_of(store: &dyn NewsStore, post_id: &str, user_id: &str) -> NewsResult<Vote> {
    store.vote_of(post_id, user_id).await
}
