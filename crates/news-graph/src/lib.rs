//! # News Graph
//!
//! Neo4j storage backend for Dojo News.
//!
//! Users and posts are nodes; authorship and votes are relationships:
//!
//! - `(:User)-[:AUTHORED]->(:Post)`
//! - `(:User)-[:UPVOTED]->(:Post)`
//! - `(:User)-[:DOWNVOTED]->(:Post)`

pub mod client;
pub mod queries;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use store::GraphStore;
