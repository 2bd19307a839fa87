//! Web server command.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use news_api::{ApiContext, Authenticator};
use news_core::{InMemoryStore, NewsStore};
use news_graph::{GraphClient, GraphStore};
use news_web::AppState;
use tracing::info;

use crate::config::{AuthArgs, Neo4jArgs, StoreKind};

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "4000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Where users, posts and votes are kept
    #[arg(long, value_enum, env = "DOJO_NEWS_STORE", default_value = "memory")]
    pub store: StoreKind,

    #[command(flatten)]
    pub neo4j: Neo4jArgs,

    #[command(flatten)]
    pub auth: AuthArgs,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let auth = Authenticator::from_config(&args.auth.auth_config()?)
        .context("Failed to load token signing keys")?;

    let store: Arc<dyn NewsStore> = match args.store {
        StoreKind::Memory => Arc::new(InMemoryStore::new()),
        StoreKind::Neo4j => {
            let config = args.neo4j.graph_config()?;
            let client = GraphClient::connect(&config).await?;
            news_graph::schema::initialize_schema(&client).await?;
            Arc::new(GraphStore::new(client))
        }
    };
    info!(store = ?args.store, "Store ready");

    let state = AppState::new(ApiContext::new(store, Arc::new(auth), args.auth.bcrypt_cost));

    println!();
    println!("  {} {}", "Dojo News".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}     http://{}:{}", "Frontend".green(), args.host, args.port);
    println!("  {}      http://{}:{}/graphql", "GraphQL".green(), args.host, args.port);
    if args.store == StoreKind::Memory {
        println!("  {}", "In-memory store: data is lost on exit".yellow());
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    news_web::run_server(state, &args.host, args.port).await
}
