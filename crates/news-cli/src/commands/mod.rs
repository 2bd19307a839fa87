//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod graph;
pub mod schema;
pub mod serve;

/// Dojo News - share links and vote on them
#[derive(Parser)]
#[command(name = "dojo-news")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Also append logs to this file
    #[arg(long, global = true, env = "DOJO_NEWS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Print the GraphQL schema
    Schema,

    /// Neo4j database commands
    Graph(graph::GraphArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Schema => schema::execute(),
            Commands::Graph(args) => graph::execute(args).await,
        }
    }
}
