//! Neo4j maintenance commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use news_graph::GraphClient;

use crate::config::Neo4jArgs;

#[derive(Args)]
pub struct GraphArgs {
    #[command(subcommand)]
    pub command: GraphCommands,

    #[command(flatten)]
    pub neo4j: Neo4jArgs,
}

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Create uniqueness constraints
    Init,

    /// Show node and relationship counts
    Status,

    /// Delete every node and relationship
    Wipe {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },
}

pub async fn execute(args: GraphArgs) -> Result<()> {
    if let GraphCommands::Wipe { yes: false } = args.command {
        bail!("Refusing to wipe the database without --yes");
    }

    let client = GraphClient::connect(&args.neo4j.graph_config()?).await?;

    match args.command {
        GraphCommands::Init => cmd_init(&client).await,
        GraphCommands::Status => cmd_status(&client).await,
        GraphCommands::Wipe { .. } => cmd_wipe(&client).await,
    }
}

async fn cmd_init(client: &GraphClient) -> Result<()> {
    news_graph::schema::initialize_schema(client).await?;
    println!("{}", "Constraints created.".green());
    Ok(())
}

async fn cmd_status(client: &GraphClient) -> Result<()> {
    println!("{}", "Neo4j Status".bold());
    println!("{}", "─".repeat(40));

    let counts = client.get_counts().await?;
    println!("  Users: {}", counts.users.to_string().cyan());
    println!("  Posts: {}", counts.posts.to_string().cyan());
    println!("  Votes: {}", counts.votes.to_string().cyan());

    println!("{}", "─".repeat(40));
    Ok(())
}

async fn cmd_wipe(client: &GraphClient) -> Result<()> {
    news_graph::schema::wipe(client).await?;
    println!("{}", "Database wiped.".yellow());
    Ok(())
}
