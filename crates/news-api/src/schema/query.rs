use async_graphql::{Context, Object, Result};
use news_core::{post, user};
use tracing::instrument;

use super::types::{PostNode, UserNode};
use super::api;
use crate::error::GqlResultExt;

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Every post, oldest first.
    #[instrument(skip_all)]
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostNode>> {
        let posts = post::list_posts(api(ctx)?.store()).await.gql()?;
        Ok(posts.into_iter().map(PostNode).collect())
    }

    /// Every user, ordered by name.
    #[instrument(skip_all)]
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserNode>> {
        let users = user::list_users(api(ctx)?.store()).await.gql()?;
        Ok(users.into_iter().map(UserNode).collect())
    }
}
