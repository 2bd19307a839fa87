//! Data available to resolvers.

use std::sync::Arc;

use news_core::NewsStore;

use crate::auth::Authenticator;

/// Schema-wide data shared by every request.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn NewsStore>,
    pub auth: Arc<Authenticator>,
    /// bcrypt cost used when hashing passwords at signup.
    pub password_cost: u32,
}

impl ApiContext {
    pub fn new(store: Arc<dyn NewsStore>, auth: Arc<Authenticator>, password_cost: u32) -> Self {
        Self {
            store,
            auth,
            password_cost,
        }
    }

    pub fn store(&self) -> &dyn NewsStore {
        self.store.as_ref()
    }
}

/// Per-request session, attached to each GraphQL request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// The user the request claims to act as.
    ///
    /// Existence of that user is checked by the permission rules, not here.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}
