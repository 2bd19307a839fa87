//! Configuration shared by the commands.
//!
//! Every option falls back to an environment variable, and `.env` is loaded
//! before parsing, so deployments can configure the server without flags.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use news_api::AuthConfig;
use news_graph::GraphConfig;

/// Neo4j connection settings.
#[derive(Args, Debug, Clone)]
pub struct Neo4jArgs {
    /// Neo4j URI scheme
    #[arg(long, env = "NEO4J_PROTOCOL", default_value = "neo4j")]
    pub neo4j_protocol: String,

    #[arg(long, env = "NEO4J_HOST", default_value = "localhost")]
    pub neo4j_host: String,

    #[arg(long, env = "NEO4J_PORT", default_value_t = 7687)]
    pub neo4j_port: u16,

    #[arg(long, env = "NEO4J_USERNAME")]
    pub neo4j_username: Option<String>,

    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub neo4j_password: Option<String>,

    #[arg(long, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub neo4j_database: String,
}

impl Neo4jArgs {
    /// Connection config. Credentials are only required at this point.
    pub fn graph_config(&self) -> Result<GraphConfig> {
        let Some(user) = self.neo4j_username.clone() else {
            bail!("NEO4J_USERNAME is not set");
        };
        let Some(password) = self.neo4j_password.clone() else {
            bail!("NEO4J_PASSWORD is not set");
        };
        Ok(GraphConfig::from_parts(
            &self.neo4j_protocol,
            &self.neo4j_host,
            self.neo4j_port,
            user,
            password,
            self.neo4j_database.clone(),
        ))
    }
}

/// Token signing and password hashing settings.
#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
    /// PKCS#8 EC private key used to sign tokens
    #[arg(long, env = "JWT_PRIVATE_KEY_LOCATION", default_value = "private.pem")]
    pub private_key: PathBuf,

    /// Public key matching the private key
    #[arg(long, env = "JWT_PUBLIC_KEY_LOCATION", default_value = "public.pem")]
    pub public_key: PathBuf,

    /// Lifetime of issued tokens
    #[arg(long, env = "TOKEN_TTL_DAYS", default_value_t = news_api::auth::DEFAULT_TOKEN_TTL_DAYS)]
    pub token_ttl_days: i64,

    /// bcrypt cost for new passwords (4-31)
    #[arg(long, env = "BCRYPT_COST", default_value_t = 12, value_parser = clap::value_parser!(u32).range(4..=31))]
    pub bcrypt_cost: u32,
}

impl AuthArgs {
    pub fn auth_config(&self) -> Result<AuthConfig> {
        if self.token_ttl_days <= 0 {
            bail!("TOKEN_TTL_DAYS must be positive, got {}", self.token_ttl_days);
        }
        Ok(AuthConfig {
            private_key_path: self.private_key.clone(),
            public_key_path: self.public_key.clone(),
            token_ttl: chrono::Duration::days(self.token_ttl_days),
        })
    }
}

/// Storage backend for the server.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Process memory, lost on exit
    Memory,
    Neo4j,
}
