use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Duration;
use news_api::{ApiContext, Authenticator};
use news_core::InMemoryStore;
use news_web::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const PRIVATE_KEY: &[u8] = include_bytes!("../../news-api/tests/fixtures/private.pem");
const PUBLIC_KEY: &[u8] = include_bytes!("../../news-api/tests/fixtures/public.pem");

fn authenticator() -> Authenticator {
    Authenticator::from_pem(PRIVATE_KEY, PUBLIC_KEY, Duration::days(1)).unwrap()
}

fn app() -> Router {
    let auth = authenticator();
    let context = ApiContext::new(Arc::new(InMemoryStore::new()), Arc::new(auth), 4);
    create_router(AppState::new(context))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn graphql(body: Value, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = authorization {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// The `name=value` part of the response's Set-Cookie header.
fn set_cookie(response: &Response) -> String {
    let value = response.headers()[header::SET_COOKIE].to_str().unwrap();
    value.split(';').next().unwrap().to_string()
}

async fn signed_up(app: &Router) -> String {
    let response = send(
        app,
        form("/signup", "name=Jonas&email=j%40j.de&password=somePassword", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    set_cookie(&response)
}

#[tokio::test]
async fn graphiql_is_served() {
    let response = send(&app(), get("/graphql", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("graphiql"));
}

#[tokio::test]
async fn graphql_endpoint_executes_queries() {
    let response = send(&app(), graphql(json!({ "query": "{ posts { id } }" }), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["data"], json!({ "posts": [] }));
}

#[tokio::test]
async fn graphql_endpoint_rejects_invalid_token() {
    let response = send(
        &app(),
        graphql(json!({ "query": "{ posts { id } }" }), Some("Bearer not-a-token")),
    )
    .await;
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["errors"][0]["message"], "Invalid authentication token!");
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_AUTHORISED");
}

#[tokio::test]
async fn graphql_endpoint_accepts_issued_token() {
    let app = app();
    let login = json!({
        "query": "mutation { signup(name: \"Jonas\", email: \"j@j.de\", password: \"somePassword\") }"
    });
    let response = send(&app, graphql(login, None)).await;
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let token = body["data"]["signup"].as_str().unwrap().to_string();

    let response = send(&app, graphql(json!({ "query": "{ users { name email } }" }), Some(&token))).await;
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["data"], json!({ "users": [{ "name": "Jonas", "email": "j@j.de" }] }));
}

#[tokio::test]
async fn index_for_anonymous_visitor() {
    let response = send(&app(), get("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No news yet."));
    assert!(html.contains("disabled>Reverse order"));
    assert!(html.contains("href=\"/login\""));
}

#[tokio::test]
async fn signup_sets_session_cookie() {
    let app = app();
    let cookie = signed_up(&app).await;
    assert!(cookie.starts_with("apollo-token="));

    let html = body_text(send(&app, get("/", Some(&cookie))).await).await;
    assert!(html.contains("Logged in as Jonas"));
}

#[tokio::test]
async fn login_with_wrong_password_rerenders_form() {
    let app = app();
    signed_up(&app).await;

    let response = send(&app, form("/login", "email=j%40j.de&password=wrongPassword", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response).await.contains("Invalid password!"));
}

#[tokio::test]
async fn login_sets_session_cookie() {
    let app = app();
    signed_up(&app).await;

    let response = send(&app, form("/login", "email=j%40j.de&password=somePassword", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(set_cookie(&response).starts_with("apollo-token="));
}

#[tokio::test]
async fn logout_clears_cookie() {
    let response = send(&app(), form("/logout", "", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(set_cookie(&response), "apollo-token=");
}

#[tokio::test]
async fn posting_requires_login() {
    let response = send(&app(), form("/posts", "title=Hello", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn posts_are_listed_by_votes() {
    let app = app();
    let cookie = signed_up(&app).await;

    for title in ["First", "Second"] {
        let response = send(&app, form("/posts", &format!("title={title}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let body = json!({ "query": "{ posts { id title } }" });
    let listed: Value =
        serde_json::from_str(&body_text(send(&app, graphql(body, None)).await).await).unwrap();
    let second = listed["data"]["posts"][1]["id"].as_str().unwrap().to_string();

    let response = send(&app, form(&format!("/posts/{second}/upvote"), "", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = body_text(send(&app, get("/", Some(&cookie))).await).await;
    let (first_at, second_at) = (html.find("First").unwrap(), html.find("Second").unwrap());
    assert!(second_at < first_at);
    assert!(html.contains(&format!("/posts/{second}/unvote")));

    let html = body_text(send(&app, get("/?order=asc", Some(&cookie))).await).await;
    assert!(html.find("First").unwrap() < html.find("Second").unwrap());
}

#[tokio::test]
async fn deleting_a_missing_post_shows_error() {
    let app = app();
    let cookie = signed_up(&app).await;

    let response = send(&app, form("/posts/0/delete", "", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("No post found for ID 0!"));
}

#[tokio::test]
async fn unknown_post_action() {
    let app = app();
    let cookie = signed_up(&app).await;
    let response = send(&app, form("/posts/0/boost", "", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stale_cookie_is_cleared() {
    let response = send(&app(), get("/", Some("apollo-token=garbage"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookie(&response), "apollo-token=");
}

#[tokio::test]
async fn cookie_of_deleted_user_is_cleared_with_posts_listed() {
    let app = app();
    let cookie = signed_up(&app).await;
    let response = send(&app, form("/posts", "title=Survivor", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Same key pair, so the token verifies but names nobody in the store.
    let ghost = authenticator().issue_token("ghost-user").unwrap();
    let response = send(&app, get("/", Some(&format!("apollo-token={ghost}")))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookie(&response), "apollo-token=");

    let html = body_text(response).await;
    assert!(html.contains("Survivor"));
    assert!(html.contains("href=\"/login\""));
}
