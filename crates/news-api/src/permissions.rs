//! Declarative authorization for root fields.
//!
//! [`Permissions`] maps `(type, field)` pairs to a [`Rule`]. A `*` entry is
//! the fallback for fields of that type without their own rule; types absent
//! from the table are not gated. The table is installed on the schema as an
//! async-graphql extension that checks each field before its resolver runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::extensions::{
    Extension, ExtensionContext, ExtensionFactory, NextResolve, ResolveInfo,
};
use async_graphql::{ServerResult, Value};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::context::{ApiContext, Session};
use crate::error::ApiError;

/// Wildcard field name.
pub const ANY_FIELD: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Allow,
    Deny,
    /// The session names a user that exists in the store.
    IsAuthenticated,
}

/// Rule table keyed by GraphQL type and field name.
#[derive(Debug, Clone, Default)]
pub struct Permissions {
    rules: Arc<HashMap<String, HashMap<String, Rule>>>,
}

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Use [`ANY_FIELD`] for the type's fallback.
    pub fn rule(mut self, type_name: &str, field: &str, rule: Rule) -> Self {
        Arc::make_mut(&mut self.rules)
            .entry(type_name.to_string())
            .or_default()
            .insert(field.to_string(), rule);
        self
    }

    /// The rules of the news API.
    pub fn news() -> Self {
        Self::new()
            .rule("Query", ANY_FIELD, Rule::Deny)
            .rule("Query", "posts", Rule::Allow)
            .rule("Query", "users", Rule::IsAuthenticated)
            .rule("Mutation", ANY_FIELD, Rule::Deny)
            .rule("Mutation", "createPost", Rule::IsAuthenticated)
            .rule("Mutation", "deletePost", Rule::IsAuthenticated)
            .rule("Mutation", "upvotePost", Rule::IsAuthenticated)
            .rule("Mutation", "downvotePost", Rule::IsAuthenticated)
            .rule("Mutation", "unvotePost", Rule::IsAuthenticated)
            .rule("Mutation", "login", Rule::Allow)
            .rule("Mutation", "signup", Rule::Allow)
    }

    /// Rule applying to `type_name.field`.
    pub fn rule_for(&self, type_name: &str, field: &str) -> Rule {
        match self.rules.get(type_name) {
            None => Rule::Allow,
            Some(fields) => fields
                .get(field)
                .or_else(|| fields.get(ANY_FIELD))
                .copied()
                .unwrap_or(Rule::Allow),
        }
    }
}

impl ExtensionFactory for Permissions {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(PermissionCheck {
            permissions: self.clone(),
            authenticated: OnceCell::new(),
        })
    }
}

/// Per-request enforcement of a [`Permissions`] table.
struct PermissionCheck {
    permissions: Permissions,
    /// `IsAuthenticated` is evaluated at most once per request.
    authenticated: OnceCell<bool>,
}

impl PermissionCheck {
    async fn is_authenticated(&self, ctx: &ExtensionContext<'_>) -> ServerResult<bool> {
        self.authenticated
            .get_or_try_init(|| async {
                let Some(user_id) = ctx.data_opt::<Session>().and_then(Session::user_id) else {
                    return Ok(false);
                };
                let Some(api) = ctx.data_opt::<ApiContext>() else {
                    return Ok(false);
                };
                api.store().has_user(user_id).await.map_err(|e| {
                    warn!(error = %e, "Authentication check failed");
                    ApiError::from(e).into_server_error()
                })
            })
            .await
            .copied()
    }
}

#[async_trait::async_trait]
impl Extension for PermissionCheck {
    async fn resolve(
        &self,
        ctx: &ExtensionContext<'_>,
        info: ResolveInfo<'_>,
        next: NextResolve<'_>,
    ) -> ServerResult<Option<Value>> {
        if info.is_for_introspection || info.name.starts_with("__") {
            return next.run(ctx, info).await;
        }

        let allowed = match self.permissions.rule_for(info.parent_type, info.name) {
            Rule::Allow => true,
            Rule::Deny => false,
            Rule::IsAuthenticated => self.is_authenticated(ctx).await?,
        };

        if !allowed {
            debug!(
                parent = info.parent_type,
                field = info.name,
                "Field access denied"
            );
            return Err(ApiError::NotAuthorised.into_server_error());
        }
        next.run(ctx, info).await
    }
}
