//! In-process store.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::NewsStore;
use crate::error::{NewsError, NewsResult};
use crate::post::model::Post;
use crate::user::model::User;
use crate::vote::model::Vote;

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    posts: HashMap<String, Post>,
    upvotes: HashMap<String, HashSet<String>>,
    downvotes: HashMap<String, HashSet<String>>,
}

impl Inner {
    fn user(&self, id: &str) -> NewsResult<&User> {
        self.users
            .get(id)
            .ok_or_else(|| NewsError::UserIdNotFound(id.to_string()))
    }

    fn post(&self, id: &str) -> NewsResult<&Post> {
        self.posts
            .get(id)
            .ok_or_else(|| NewsError::PostIdNotFound(id.to_string()))
    }

    fn vote_of(&self, post_id: &str, user_id: &str) -> Vote {
        let holds = |votes: &HashMap<String, HashSet<String>>| {
            votes.get(user_id).is_some_and(|posts| posts.contains(post_id))
        };
        if holds(&self.downvotes) {
            Vote::Down
        } else if holds(&self.upvotes) {
            Vote::Up
        } else {
            Vote::None
        }
    }

    fn sorted_posts<'a>(posts: impl Iterator<Item = &'a Post>) -> Vec<Post> {
        let mut posts: Vec<Post> = posts.cloned().collect();
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        posts
    }
}

/// A [`NewsStore`] held entirely in memory.
///
/// Every operation takes the lock once, so vote changes are atomic with
/// respect to concurrent requests.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsStore for InMemoryStore {
    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> NewsResult<String> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == email) {
            return Err(NewsError::EmailAlreadyExists(email.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        inner
            .users
            .insert(id.clone(), User::new(id.clone(), name, email, password_hash));
        debug!(user_id = %id, "Created user");
        Ok(id)
    }

    async fn has_user(&self, id: &str) -> NewsResult<bool> {
        Ok(self.inner.read().await.users.contains_key(id))
    }

    async fn get_user(&self, id: &str) -> NewsResult<User> {
        self.inner.read().await.user(id).cloned()
    }

    async fn get_user_by_email(&self, email: &str) -> NewsResult<User> {
        self.inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| NewsError::UserEmailNotFound(email.to_string()))
    }

    async fn list_users(&self) -> NewsResult<Vec<User>> {
        let mut users: Vec<User> = self.inner.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn create_post(&self, title: &str, author_id: &str) -> NewsResult<Post> {
        let mut inner = self.inner.write().await;
        inner.user(author_id)?;

        // Creation times are strictly increasing so listing order is insertion order.
        let now = Utc::now();
        let created_at = inner
            .posts
            .values()
            .map(|p| p.created_at)
            .max()
            .map_or(now, |last| now.max(last + Duration::microseconds(1)));

        let post = Post {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            votes: 0,
            author_id: author_id.to_string(),
            created_at,
        };
        inner.posts.insert(post.id.clone(), post.clone());
        debug!(post_id = %post.id, author_id, "Created post");
        Ok(post)
    }

    async fn get_post(&self, id: &str) -> NewsResult<Post> {
        self.inner.read().await.post(id).cloned()
    }

    async fn list_posts(&self) -> NewsResult<Vec<Post>> {
        let inner = self.inner.read().await;
        Ok(Inner::sorted_posts(inner.posts.values()))
    }

    async fn posts_by_author(&self, author_id: &str) -> NewsResult<Vec<Post>> {
        let inner = self.inner.read().await;
        Ok(Inner::sorted_posts(inner.posts.values().filter(|p| p.is_authored_by(author_id))))
    }

    async fn delete_post(&self, id: &str) -> NewsResult<Post> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let post = inner
            .posts
            .remove(id)
            .ok_or_else(|| NewsError::PostIdNotFound(id.to_string()))?;

        for voted in inner.upvotes.values_mut().chain(inner.downvotes.values_mut()) {
            voted.remove(id);
        }
        debug!(post_id = %id, "Deleted post");
        Ok(post)
    }

    async fn vote_of(&self, post_id: &str, user_id: &str) -> NewsResult<Vote> {
        let inner = self.inner.read().await;
        inner.post(post_id)?;
        inner.user(user_id)?;
        Ok(inner.vote_of(post_id, user_id))
    }

    async fn set_vote(&self, post_id: &str, user_id: &str, vote: Vote) -> NewsResult<Post> {
        let mut inner = self.inner.write().await;
        inner.post(post_id)?;
        inner.user(user_id)?;

        let current = inner.vote_of(post_id, user_id);
        let delta = current.transition(vote);

        if let Some(posts) = inner.upvotes.get_mut(user_id) {
            posts.remove(post_id);
        }
        if let Some(posts) = inner.downvotes.get_mut(user_id) {
            posts.remove(post_id);
        }
        let target = match vote {
            Vote::Up => Some(&mut inner.upvotes),
            Vote::Down => Some(&mut inner.downvotes),
            Vote::None => None,
        };
        if let Some(target) = target {
            target
                .entry(user_id.to_string())
                .or_default()
                .insert(post_id.to_string());
        }

        let post = inner
            .posts
            .get_mut(post_id)
            .ok_or_else(|| NewsError::PostIdNotFound(post_id.to_string()))?;
        post.votes += delta;
        debug!(post_id, user_id, from = current.as_str(), to = vote.as_str(), delta, "Changed vote");
        Ok(post.clone())
    }
}
