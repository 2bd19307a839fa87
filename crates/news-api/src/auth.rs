//! ES256 authentication tokens.
//!
//! A token is a JWT whose `userId` claim names the authenticated user. Tokens
//! are signed with a PKCS#8 EC private key and verified with its public key.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::Session;
use crate::error::{ApiError, ApiResult};

/// Name of the cookie holding the token for browser sessions.
pub const TOKEN_COOKIE: &str = "apollo-token";

/// Default token lifetime in days.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

/// Where to find the key pair and how long issued tokens live.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            private_key_path: PathBuf::from("private.pem"),
            public_key_path: PathBuf::from("public.pem"),
            token_ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
        }
    }
}

/// Issues and verifies authentication tokens.
pub struct Authenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Authenticator {
    /// Build from PEM encoded keys.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8], ttl: Duration) -> ApiResult<Self> {
        Ok(Self {
            encoding: EncodingKey::from_ec_pem(private_pem)?,
            decoding: DecodingKey::from_ec_pem(public_pem)?,
            validation: Validation::new(Algorithm::ES256),
            ttl,
        })
    }

    /// Build from the key files named in `config`.
    pub fn from_config(config: &AuthConfig) -> ApiResult<Self> {
        let private_pem = read_key(&config.private_key_path)?;
        let public_pem = read_key(&config.public_key_path)?;
        Self::from_pem(&private_pem, &public_pem, config.token_ttl)
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `user_id`.
    pub fn issue_token(&self, user_id: &str) -> ApiResult<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::ES256), &claims, &self.encoding)?)
    }

    /// Verify a token and return its claims.
    pub fn verify_token(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Rejected authentication token");
                ApiError::InvalidToken
            })
    }

    /// Resolve the session for an optional token.
    ///
    /// No token yields an anonymous session; a token that fails verification is
    /// an error rather than a silent downgrade.
    pub fn session(&self, token: Option<&str>) -> ApiResult<Session> {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            None => Ok(Session::anonymous()),
            Some(token) => Ok(Session::for_user(self.verify_token(token)?.user_id)),
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts both the bare token and the `Bearer <token>` form.
pub fn token_from_header(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .unwrap_or(value)
}

fn read_key(path: &Path) -> ApiResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| ApiError::KeyFile {
        path: path.to_path_buf(),
        source,
    })
}
