//! Application state.

use std::sync::Arc;

use news_api::{build_schema, ApiContext, Authenticator, NewsSchema};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub schema: NewsSchema,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(context: ApiContext) -> Self {
        let auth = context.auth.clone();
        Self {
            schema: build_schema(context),
            auth,
        }
    }
}
