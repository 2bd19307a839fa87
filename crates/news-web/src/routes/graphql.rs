//! GraphQL endpoint and GraphiQL.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::session::AuthToken;
use crate::state::AppState;

/// GET /graphql - GraphiQL.
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// POST /graphql - Execute a GraphQL request.
pub async fn graphql_handler(
    State(state): State<AppState>,
    token: AuthToken,
    req: GraphQLRequest,
) -> GraphQLResponse {
    match state.auth.session(token.as_deref()) {
        Ok(session) => state.schema.execute(req.into_inner().data(session)).await.into(),
        Err(e) => async_graphql::Response::from_errors(vec![e.into_server_error()]).into(),
    }
}
