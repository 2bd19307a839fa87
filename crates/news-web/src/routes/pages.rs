//! Server-rendered pages.
//!
//! Every page runs its GraphQL operations against the in-process schema, so
//! the browser sees exactly what an API client would.

use askama::Template;
use async_graphql::{Request, Variables};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use news_api::Session;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::session::{clear_cookie, session_cookie, AuthToken};
use crate::state::AppState;

// ============================================================
// OPERATIONS
// ============================================================

const SESSION_QUERY: &str = "{ users { id } }";
const POSTS_QUERY: &str = "{ posts { id title votes myVote author { id name } } }";
const POSTS_AND_USERS_QUERY: &str =
    "{ posts { id title votes myVote author { id name } } users { id name email } }";
const LOGIN: &str =
    "mutation($email: String!, $password: String!) { login(email: $email, password: $password) }";
const SIGNUP: &str = "mutation($name: String!, $email: String!, $password: String!) { \
                      signup(name: $name, email: $email, password: $password) }";
const CREATE_POST: &str = "mutation($title: String!) { createPost(post: { title: $title }) { id } }";
const UPVOTE: &str = "mutation($id: ID!) { upvotePost(id: $id) { id } }";
const DOWNVOTE: &str = "mutation($id: ID!) { downvotePost(id: $id) { id } }";
const UNVOTE: &str = "mutation($id: ID!) { unvotePost(id: $id) { id } }";
const DELETE: &str = "mutation($id: ID!) { deletePost(id: $id) { id } }";

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    user: Option<String>,
    posts: Vec<PostView>,
    ascending: bool,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    user: Option<String>,
    email: String,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "signup.html")]
struct SignupTemplate {
    user: Option<String>,
    name: String,
    email: String,
    error: Option<String>,
}

/// View model for a post row.
struct PostView {
    id: String,
    title: String,
    votes: i64,
    author: String,
    upvoted: bool,
    downvoted: bool,
    own: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostData {
    id: String,
    title: String,
    votes: i64,
    my_vote: Option<i64>,
    author: AuthorData,
}

#[derive(Deserialize)]
struct AuthorData {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct UserData {
    id: String,
    name: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct IndexData {
    posts: Vec<PostData>,
    #[serde(default)]
    users: Vec<UserData>,
}

// ============================================================
// REQUEST TYPES
// ============================================================

#[derive(Deserialize)]
pub struct IndexParams {
    pub order: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreatePostForm {
    pub title: String,
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Post list, most voted first unless `order=asc`.
pub async fn index(
    State(state): State<AppState>,
    token: AuthToken,
    Query(params): Query<IndexParams>,
) -> Response {
    let ascending = params.order.as_deref() == Some("asc");
    render_index(&state, &token, ascending, None).await
}

/// GET /login
pub async fn login_form() -> Response {
    render(
        StatusCode::OK,
        LoginTemplate {
            user: None,
            email: String::new(),
            error: None,
        },
    )
}

/// POST /login - Exchange credentials for a session cookie.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let variables = json!({ "email": &form.email, "password": &form.password });
    match execute(&state, Session::anonymous(), LOGIN, variables).await {
        Ok(data) => start_session(&state, &data["login"]),
        Err(error) => render(
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                user: None,
                email: form.email,
                error: Some(error),
            },
        ),
    }
}

/// GET /signup
pub async fn signup_form() -> Response {
    render(
        StatusCode::OK,
        SignupTemplate {
            user: None,
            name: String::new(),
            email: String::new(),
            error: None,
        },
    )
}

/// POST /signup - Register and start a session.
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    let variables = json!({ "name": &form.name, "email": &form.email, "password": &form.password });
    match execute(&state, Session::anonymous(), SIGNUP, variables).await {
        Ok(data) => start_session(&state, &data["signup"]),
        Err(error) => render(
            StatusCode::BAD_REQUEST,
            SignupTemplate {
                user: None,
                name: form.name,
                email: form.email,
                error: Some(error),
            },
        ),
    }
}

/// POST /logout
pub async fn logout() -> Response {
    ([(header::SET_COOKIE, clear_cookie())], Redirect::to("/")).into_response()
}

/// POST /posts - Create a post as the session user.
pub async fn create_post(
    State(state): State<AppState>,
    token: AuthToken,
    Form(form): Form<CreatePostForm>,
) -> Response {
    run_action(&state, &token, CREATE_POST, json!({ "title": form.title })).await
}

/// POST /posts/{id}/{action} - Vote on or delete a post.
pub async fn post_action(
    State(state): State<AppState>,
    token: AuthToken,
    Path((id, action)): Path<(String, String)>,
) -> Response {
    let mutation = match action.as_str() {
        "upvote" => UPVOTE,
        "downvote" => DOWNVOTE,
        "unvote" => UNVOTE,
        "delete" => DELETE,
        _ => return (StatusCode::NOT_FOUND, Html("Unknown action".to_string())).into_response(),
    };
    run_action(&state, &token, mutation, json!({ "id": id })).await
}

// ============================================================
// HELPERS
// ============================================================

/// Execute an operation and return its data, or the first error message.
async fn execute(
    state: &AppState,
    session: Session,
    query: &str,
    variables: Value,
) -> Result<Value, String> {
    let request = Request::new(query)
        .variables(Variables::from_json(variables))
        .data(session);
    let response = state.schema.execute(request).await;

    if let Some(err) = response.errors.first() {
        debug!(error = %err.message, "Page operation failed");
        return Err(err.message.clone());
    }
    response.data.into_json().map_err(|e| e.to_string())
}

/// Session for a page request. A token that no longer verifies is dropped.
fn page_session(state: &AppState, token: &AuthToken) -> (Session, bool) {
    match state.auth.session(token.as_deref()) {
        Ok(session) => (session, false),
        Err(_) => (Session::anonymous(), true),
    }
}

fn start_session(state: &AppState, token: &Value) -> Response {
    let Some(token) = token.as_str() else {
        return (StatusCode::INTERNAL_SERVER_ERROR, Html("Missing token".to_string())).into_response();
    };
    let cookie = session_cookie(token, state.auth.token_ttl().num_seconds());
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

async fn run_action(state: &AppState, token: &AuthToken, mutation: &str, variables: Value) -> Response {
    let (session, _) = page_session(state, token);
    if session.user_id().is_none() {
        return Redirect::to("/login").into_response();
    }
    match execute(state, session, mutation, variables).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(error) => {
            let mut response = render_index(state, token, false, Some(error)).await;
            *response.status_mut() = StatusCode::BAD_REQUEST;
            response
        }
    }
}

async fn render_index(
    state: &AppState,
    token: &AuthToken,
    ascending: bool,
    error: Option<String>,
) -> Response {
    let (mut session, mut stale) = page_session(state, token);

    // The token may name a user that no longer exists. Settle that before the
    // page query so its resolvers never see a missing session user.
    if session.user_id().is_some()
        && execute(state, session.clone(), SESSION_QUERY, json!({}))
            .await
            .is_err()
    {
        session = Session::anonymous();
        stale = true;
    }

    let loaded = match session.user_id() {
        Some(_) => execute(state, session, POSTS_AND_USERS_QUERY, json!({})).await,
        None => execute(state, session, POSTS_QUERY, json!({})).await,
    };

    let data = match loaded.and_then(|v| serde_json::from_value::<IndexData>(v).map_err(|e| e.to_string())) {
        Ok(data) => data,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Error: {}", e))).into_response()
        }
    };

    let me = data.users.into_iter().find(|u| u.email.is_some());
    let my_id = me.as_ref().map(|u| u.id.clone());

    let mut posts: Vec<PostView> = data
        .posts
        .into_iter()
        .map(|p| PostView {
            own: my_id.as_deref() == Some(p.author.id.as_str()),
            upvoted: p.my_vote == Some(1),
            downvoted: p.my_vote == Some(-1),
            id: p.id,
            title: p.title,
            votes: p.votes,
            author: p.author.name,
        })
        .collect();
    sort_posts(&mut posts, ascending);

    let template = IndexTemplate {
        user: me.map(|u| u.name),
        posts,
        ascending,
        error,
    };
    let page = render(StatusCode::OK, template);
    if stale {
        ([(header::SET_COOKIE, clear_cookie())], page).into_response()
    } else {
        page
    }
}

/// Order by tally. The sort is stable, so ties keep creation order.
fn sort_posts(posts: &mut [PostView], ascending: bool) {
    if ascending {
        posts.sort_by_key(|p| p.votes);
    } else {
        posts.sort_by(|a, b| b.votes.cmp(&a.votes));
    }
}

fn render<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Template error: {}", e))).into_response(),
    }
}
