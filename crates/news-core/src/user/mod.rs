//! User registration and credential checks.

pub mod model;

use tracing::{debug, info};

use crate::error::{NewsError, NewsResult};
use crate::store::NewsStore;
use model::User;

/// Shortest password accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Register a new user and return its ID.
///
/// The password is stored only as a bcrypt hash of the given `cost`.
pub async fn signup(
    store: &dyn NewsStore,
    name: &str,
    email: &str,
    password: &str,
    cost: u32,
) -> NewsResult<String> {
    let name = name.trim();
    let email = email.trim();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(NewsError::TooShortPassword);
    }
    if name.is_empty() {
        return Err(NewsError::validation("name must not be empty"));
    }
    if email.is_empty() {
        return Err(NewsError::validation("email must not be empty"));
    }

    let password_hash = hash_password(password, cost).await?;
    let id = store.create_user(name, email, &password_hash).await?;

    info!(user_id = %id, "User signed up");
    Ok(id)
}

/// Check a user's credentials and return the matching user.
pub async fn login(store: &dyn NewsStore, email: &str, password: &str) -> NewsResult<User> {
    let user = store.get_user_by_email(email.trim()).await?;

    if !verify_password(password, &user.password_hash).await? {
        debug!(user_id = %user.id, "Rejected login with wrong password");
        return Err(NewsError::InvalidPassword);
    }

    info!(user_id = %user.id, "User logged in");
    Ok(user)
}

/// Get a user by ID.
pub async fn get_user(store: &dyn NewsStore, id: &str) -> NewsResult<User> {
    store.get_user(id).await
}

/// List all users.
pub async fn list_users(store: &dyn NewsStore) -> NewsResult<Vec<User>> {
    store.list_users().await
}

/// Hash a password off the async executor; bcrypt is deliberately slow.
async fn hash_password(password: &str, cost: u32) -> NewsResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| NewsError::Store(e.into()))?
        .map_err(NewsError::from)
}

async fn verify_password(password: &str, hash: &str) -> NewsResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| NewsError::Store(e.into()))?
        .map_err(NewsError::from)
}
