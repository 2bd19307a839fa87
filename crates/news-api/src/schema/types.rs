use async_graphql::{Context, InputObject, Object, Result, ID};
use news_core::{post, user, vote, NewsError, Post, User, Vote};

use super::{api, session_user};
use crate::error::GqlResultExt;

/// A registered user.
pub struct UserNode(pub User);

#[Object(name = "User")]
impl UserNode {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    /// Only visible to the user themselves.
    async fn email(&self, ctx: &Context<'_>) -> Option<&str> {
        (session_user(ctx) == Some(self.0.id.as_str())).then_some(self.0.email.as_str())
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostNode>> {
        let posts = post::posts_by_author(api(ctx)?.store(), &self.0.id).await.gql()?;
        Ok(posts.into_iter().map(PostNode).collect())
    }
}

/// A shared link and its vote tally.
pub struct PostNode(pub Post);

#[Object(name = "Post")]
impl PostNode {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    /// Upvotes minus downvotes.
    async fn votes(&self) -> i64 {
        self.0.votes
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<UserNode> {
        let author = user::get_user(api(ctx)?.store(), &self.0.author_id).await.gql()?;
        Ok(UserNode(author))
    }

    /// The requesting user's vote: -1, 0 or 1. Null without a session.
    async fn my_vote(&self, ctx: &Context<'_>) -> Result<Option<i64>> {
        let Some(user_id) = session_user(ctx) else {
            return Ok(None);
        };
        match vote::vote_of(api(ctx)?.store(), &self.0.id, user_id).await {
            Ok(vote) => Ok(Some(vote.weight())),
            // Snapshot of a deleted post: its votes went with it.
            Err(NewsError::PostIdNotFound(_)) => Ok(Some(Vote::None.weight())),
            Err(e) => Err(e).gql(),
        }
    }
}

#[derive(InputObject)]
pub struct PostInput {
    pub title: String,
}
