//! User queries.

use anyhow::Result;
use neo4rs::Query;
use tracing::debug;

use super::{user_from_row, USER_PROJECTION};
use crate::GraphClient;
use news_core::User;

/// Create a user node unless the email is already taken.
///
/// Returns `None` when another user holds `email`.
pub async fn create_user(
    client: &GraphClient,
    id: &str,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Option<String>> {
    let query = Query::new(
        "OPTIONAL MATCH (existing:User {email: $email})
         WITH existing WHERE existing IS NULL
         CREATE (u:User {id: $id, name: $name, email: $email, password_hash: $password_hash})
         RETURN u.id AS id"
            .to_string(),
    )
    .param("id", id)
    .param("name", name)
    .param("email", email)
    .param("password_hash", password_hash);

    let created: Option<String> = client.query_scalar(query, "id").await?;
    debug!(user_id = id, created = created.is_some(), "Create user");
    Ok(created)
}

pub async fn has_user(client: &GraphClient, id: &str) -> Result<bool> {
    let query = Query::new(
        "MATCH (u:User {id: $id}) RETURN count(u) > 0 AS has_user".to_string(),
    )
    .param("id", id);

    Ok(client.query_scalar(query, "has_user").await?.unwrap_or(false))
}

pub async fn get_user(client: &GraphClient, id: &str) -> Result<Option<User>> {
    let query = Query::new(format!("MATCH (u:User {{id: $id}}) {}", USER_PROJECTION)).param("id", id);

    client.query(query).await?.first().map(user_from_row).transpose()
}

pub async fn get_user_by_email(client: &GraphClient, email: &str) -> Result<Option<User>> {
    let query =
        Query::new(format!("MATCH (u:User {{email: $email}}) {}", USER_PROJECTION)).param("email", email);

    client.query(query).await?.first().map(user_from_row).transpose()
}

pub async fn list_users(client: &GraphClient) -> Result<Vec<User>> {
    let query = Query::new(format!("MATCH (u:User) {} ORDER BY name, id", USER_PROJECTION));

    client.query(query).await?.iter().map(user_from_row).collect()
}
