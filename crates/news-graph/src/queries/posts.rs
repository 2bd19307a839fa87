//! Post queries.

use anyhow::Result;
use chrono::{DateTime, Utc};
use neo4rs::Query;

use super::{post_from_row, POST_PROJECTION};
use crate::GraphClient;
use news_core::Post;

/// Create a post node and its `AUTHORED` edge.
///
/// Returns `None` when the author does not exist.
pub async fn create_post(
    client: &GraphClient,
    id: &str,
    title: &str,
    author_id: &str,
    created_at: DateTime<Utc>,
) -> Result<Option<Post>> {
    let query = Query::new(format!(
        "MATCH (author:User {{id: $author_id}})
         CREATE (author)-[:AUTHORED]->(p:Post {{id: $id, title: $title, created_at: $created_at}})
         {}",
        POST_PROJECTION
    ))
    .param("id", id)
    .param("title", title)
    .param("author_id", author_id)
    .param("created_at", created_at.timestamp_millis());

    client.query(query).await?.first().map(post_from_row).transpose()
}

pub async fn get_post(client: &GraphClient, id: &str) -> Result<Option<Post>> {
    let query = Query::new(format!(
        "MATCH (author:User)-[:AUTHORED]->(p:Post {{id: $id}}) {}",
        POST_PROJECTION
    ))
    .param("id", id);

    client.query(query).await?.first().map(post_from_row).transpose()
}

pub async fn list_posts(client: &GraphClient) -> Result<Vec<Post>> {
    let query = Query::new(format!(
        "MATCH (author:User)-[:AUTHORED]->(p:Post) {} ORDER BY created_at, id",
        POST_PROJECTION
    ));

    client.query(query).await?.iter().map(post_from_row).collect()
}

pub async fn posts_by_author(client: &GraphClient, author_id: &str) -> Result<Vec<Post>> {
    let query = Query::new(format!(
        "MATCH (author:User {{id: $author_id}})-[:AUTHORED]->(p:Post) {} ORDER BY created_at, id",
        POST_PROJECTION
    ))
    .param("author_id", author_id);

    client.query(query).await?.iter().map(post_from_row).collect()
}

/// Delete a post node along with every relationship touching it.
pub async fn delete_post(client: &GraphClient, id: &str) -> Result<()> {
    let query = Query::new("MATCH (p:Post {id: $id}) DETACH DELETE p".to_string()).param("id", id);
    client.execute(query).await
}
