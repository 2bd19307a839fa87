use async_graphql::{Context, Object, Result, ID};
use news_core::{post, user, vote};
use tracing::instrument;

use super::types::{PostInput, PostNode};
use super::{api, require_user};
use crate::error::GqlResultExt;

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Create a post authored by the requesting user.
    #[instrument(skip_all)]
    async fn create_post(&self, ctx: &Context<'_>, post: PostInput) -> Result<PostNode> {
        let author_id = require_user(ctx)?;
        let created = post::create_post(api(ctx)?.store(), &post.title, author_id)
            .await
            .gql()?;
        Ok(PostNode(created))
    }

    /// Delete one of the requesting user's posts.
    #[instrument(skip_all, fields(post_id = %id.as_str()))]
    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<PostNode> {
        let user_id = require_user(ctx)?;
        let deleted = post::delete_post(api(ctx)?.store(), &id, user_id).await.gql()?;
        Ok(PostNode(deleted))
    }

    #[instrument(skip_all, fields(post_id = %id.as_str()))]
    async fn upvote_post(&self, ctx: &Context<'_>, id: ID) -> Result<PostNode> {
        let user_id = require_user(ctx)?;
        let post = vote::upvote(api(ctx)?.store(), &id, user_id).await.gql()?;
        Ok(PostNode(post))
    }

    #[instrument(skip_all, fields(post_id = %id.as_str()))]
    async fn downvote_post(&self, ctx: &Context<'_>, id: ID) -> Result<PostNode> {
        let user_id = require_user(ctx)?;
        let post = vote::downvote(api(ctx)?.store(), &id, user_id).await.gql()?;
        Ok(PostNode(post))
    }

    /// Withdraw the requesting user's vote.
    #[instrument(skip_all, fields(post_id = %id.as_str()))]
    async fn unvote_post(&self, ctx: &Context<'_>, id: ID) -> Result<PostNode> {
        let user_id = require_user(ctx)?;
        let post = vote::unvote(api(ctx)?.store(), &id, user_id).await.gql()?;
        Ok(PostNode(post))
    }

    /// Register and return an authentication token.
    #[instrument(skip_all)]
    async fn signup(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        password: String,
    ) -> Result<String> {
        let api = api(ctx)?;
        let user_id = user::signup(api.store(), &name, &email, &password, api.password_cost)
            .await
            .gql()?;
        api.auth.issue_token(&user_id).gql()
    }

    /// Check credentials and return an authentication token.
    #[instrument(skip_all)]
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<String> {
        let api = api(ctx)?;
        let user = user::login(api.store(), &email, &password).await.gql()?;
        api.auth.issue_token(&user.id).gql()
    }
}
