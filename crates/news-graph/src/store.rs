//! [`NewsStore`] backed by Neo4j.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::queries::{posts, users, votes};
use crate::GraphClient;
use news_core::{NewsError, NewsResult, NewsStore, Post, User, Vote};

/// Neo4j error code reported when a uniqueness constraint rejects a write.
const CONSTRAINT_VIOLATION: &str = "ConstraintValidationFailed";

/// Stores users, posts and votes in a Neo4j graph.
#[derive(Clone)]
pub struct GraphStore {
    client: GraphClient,
}

impl GraphStore {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GraphClient {
        &self.client
    }

    async fn require_user(&self, id: &str) -> NewsResult<()> {
        if users::has_user(&self.client, id).await? {
            Ok(())
        } else {
            Err(NewsError::UserIdNotFound(id.to_string()))
        }
    }
}

#[async_trait]
impl NewsStore for GraphStore {
    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> NewsResult<String> {
        let id = Uuid::new_v4().to_string();
        match users::create_user(&self.client, &id, name, email, password_hash).await {
            Ok(Some(id)) => Ok(id),
            Ok(None) => Err(NewsError::EmailAlreadyExists(email.to_string())),
            // A concurrent signup can slip past the existence check; the
            // uniqueness constraint catches it.
            Err(e) if format!("{:#}", e).contains(CONSTRAINT_VIOLATION) => {
                debug!(email, "Email constraint rejected signup");
                Err(NewsError::EmailAlreadyExists(email.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn has_user(&self, id: &str) -> NewsResult<bool> {
        Ok(users::has_user(&self.client, id).await?)
    }

    async fn get_user(&self, id: &str) -> NewsResult<User> {
        users::get_user(&self.client, id)
            .await?
            .ok_or_else(|| NewsError::UserIdNotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> NewsResult<User> {
        users::get_user_by_email(&self.client, email)
            .await?
            .ok_or_else(|| NewsError::UserEmailNotFound(email.to_string()))
    }

    async fn list_users(&self) -> NewsResult<Vec<User>> {
        Ok(users::list_users(&self.client).await?)
    }

    async fn create_post(&self, title: &str, author_id: &str) -> NewsResult<Post> {
        let id = Uuid::new_v4().to_string();
        posts::create_post(&self.client, &id, title, author_id, Utc::now())
            .await?
            .ok_or_else(|| NewsError::UserIdNotFound(author_id.to_string()))
    }

    async fn get_post(&self, id: &str) -> NewsResult<Post> {
        posts::get_post(&self.client, id)
            .await?
            .ok_or_else(|| NewsError::PostIdNotFound(id.to_string()))
    }

    async fn list_posts(&self) -> NewsResult<Vec<Post>> {
        Ok(posts::list_posts(&self.client).await?)
    }

    async fn posts_by_author(&self, author_id: &str) -> NewsResult<Vec<Post>> {
        Ok(posts::posts_by_author(&self.client, author_id).await?)
    }

    async fn delete_post(&self, id: &str) -> NewsResult<Post> {
        let post = self.get_post(id).await?;
        posts::delete_post(&self.client, id).await?;
        Ok(post)
    }

    async fn vote_of(&self, post_id: &str, user_id: &str) -> NewsResult<Vote> {
        self.get_post(post_id).await?;
        self.require_user(user_id).await?;
        Ok(votes::vote_of(&self.client, post_id, user_id).await?)
    }

    async fn set_vote(&self, post_id: &str, user_id: &str, vote: Vote) -> NewsResult<Post> {
        self.get_post(post_id).await?;
        self.require_user(user_id).await?;
        votes::set_vote(&self.client, post_id, user_id, vote)
            .await?
            .ok_or_else(|| NewsError::PostIdNotFound(post_id.to_string()))
    }
}
