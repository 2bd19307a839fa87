//! GraphQL schema.

mod mutation;
mod query;
mod types;

use async_graphql::{extensions::Tracing, Context, EmptySubscription, Schema};

use crate::context::{ApiContext, Session};
use crate::error::ApiError;
use crate::permissions::Permissions;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{PostInput, PostNode, UserNode};

pub type NewsSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

const MAX_DEPTH: usize = 12;

/// Build the executable schema around `context`.
pub fn build_schema(context: ApiContext) -> NewsSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(context)
        .extension(Permissions::news())
        .extension(Tracing)
        .limit_depth(MAX_DEPTH)
        .finish()
}

/// The schema in SDL form.
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

pub(crate) fn api<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a ApiContext> {
    ctx.data::<ApiContext>()
}

/// The requesting user's ID, if the request carries a session.
pub(crate) fn session_user<'a>(ctx: &Context<'a>) -> Option<&'a str> {
    ctx.data_opt::<Session>().and_then(Session::user_id)
}

/// The requesting user's ID, or `Not authorised!`.
pub(crate) fn require_user<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a str> {
    use async_graphql::ErrorExtensions;
    session_user(ctx).ok_or_else(|| ApiError::NotAuthorised.extend())
}
