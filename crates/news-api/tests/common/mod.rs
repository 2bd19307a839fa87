#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_graphql::{Request, Response, Variables};
use async_trait::async_trait;
use chrono::Duration;
use news_api::{build_schema, ApiContext, Authenticator, NewsSchema, Session};
use news_core::{InMemoryStore, NewsResult, NewsStore, Post, User, Vote};
use serde_json::Value;

const PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/private.pem");
const PUBLIC_KEY: &[u8] = include_bytes!("../fixtures/public.pem");

/// Cheapest bcrypt cost, keeps the suite fast.
pub const COST: u32 = 4;

/// In-memory store that records every call it receives.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    calls: Mutex<Vec<String>>,
}

impl RecordingStore {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls_to(&self, operation: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split('(').next() == Some(operation))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NewsStore for RecordingStore {
    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> NewsResult<String> {
        self.record(format!("create_user({name}, {email})"));
        self.inner.create_user(name, email, password_hash).await
    }

    async fn has_user(&self, id: &str) -> NewsResult<bool> {
        self.record(format!("has_user({id})"));
        self.inner.has_user(id).await
    }

    async fn get_user(&self, id: &str) -> NewsResult<User> {
        self.inner.get_user(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> NewsResult<User> {
        self.inner.get_user_by_email(email).await
    }

    async fn list_users(&self) -> NewsResult<Vec<User>> {
        self.record("list_users()".into());
        self.inner.list_users().await
    }

    async fn create_post(&self, title: &str, author_id: &str) -> NewsResult<Post> {
        self.record(format!("create_post({title}, {author_id})"));
        self.inner.create_post(title, author_id).await
    }

    async fn get_post(&self, id: &str) -> NewsResult<Post> {
        self.inner.get_post(id).await
    }

    async fn list_posts(&self) -> NewsResult<Vec<Post>> {
        self.inner.list_posts().await
    }

    async fn posts_by_author(&self, author_id: &str) -> NewsResult<Vec<Post>> {
        self.inner.posts_by_author(author_id).await
    }

    async fn delete_post(&self, id: &str) -> NewsResult<Post> {
        self.record(format!("delete_post({id})"));
        self.inner.delete_post(id).await
    }

    async fn vote_of(&self, post_id: &str, user_id: &str) -> NewsResult<Vote> {
        self.inner.vote_of(post_id, user_id).await
    }

    async fn set_vote(&self, post_id: &str, user_id: &str, vote: Vote) -> NewsResult<Post> {
        self.record(format!("set_vote({post_id}, {user_id}, {})", vote.as_str()));
        self.inner.set_vote(post_id, user_id, vote).await
    }
}

pub struct TestApi {
    pub store: Arc<RecordingStore>,
    pub auth: Arc<Authenticator>,
    pub schema: NewsSchema,
}

impl TestApi {
    pub fn new() -> Self {
        let store = Arc::new(RecordingStore::default());
        let auth = Arc::new(
            Authenticator::from_pem(PRIVATE_KEY, PUBLIC_KEY, Duration::days(1)).unwrap(),
        );
        let schema = build_schema(ApiContext::new(store.clone(), auth.clone(), COST));
        Self {
            store,
            auth,
            schema,
        }
    }

    /// Create a user directly in the store and return its ID.
    pub async fn user(&self, name: &str, email: &str, password: &str) -> String {
        news_core::user::signup(self.store.as_ref(), name, email, password, COST)
            .await
            .unwrap()
    }

    pub async fn post(&self, title: &str, author_id: &str) -> String {
        self.store.create_post(title, author_id).await.unwrap().id
    }

    pub async fn execute(&self, query: &str, variables: Value, session: Session) -> Response {
        let request = Request::new(query)
            .variables(Variables::from_json(variables))
            .data(session);
        self.schema.execute(request).await
    }

    pub async fn anonymous(&self, query: &str, variables: Value) -> Response {
        self.execute(query, variables, Session::anonymous()).await
    }

    pub async fn as_user(&self, user_id: &str, query: &str, variables: Value) -> Response {
        self.execute(query, variables, Session::for_user(user_id)).await
    }
}

pub fn data(response: &Response) -> Value {
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.data.clone().into_json().unwrap()
}

/// The single error of a failed response; asserts `data` is null.
pub fn error(response: &Response) -> (String, Option<String>) {
    assert_eq!(response.data.clone().into_json().unwrap(), Value::Null);
    assert_eq!(response.errors.len(), 1, "errors: {:?}", response.errors);
    let err = &response.errors[0];
    let code = err
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("code"))
        .map(|code| code.to_string().trim_matches('"').to_string());
    (err.message.clone(), code)
}
