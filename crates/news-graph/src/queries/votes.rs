//! Vote queries.

use anyhow::Result;
use neo4rs::{Query, Row};
use tracing::debug;

use super::{field, post_from_row, POST_PROJECTION};
use crate::GraphClient;
use news_core::{Post, Vote};

/// The vote a user holds on a post.
pub async fn vote_of(client: &GraphClient, post_id: &str, user_id: &str) -> Result<Vote> {
    let query = Query::new(
        "MATCH (u:User {id: $user_id}), (p:Post {id: $post_id})
         RETURN size([(u)-[:DOWNVOTED]->(p) | 1]) > 0 AS has_downvote,
                size([(u)-[:UPVOTED]->(p) | 1]) > 0 AS has_upvote"
            .to_string(),
    )
    .param("post_id", post_id)
    .param("user_id", user_id);

    let rows = client.query(query).await?;
    let Some(row) = rows.first() else {
        return Ok(Vote::None);
    };

    vote_from_row(row)
}

fn vote_from_row(row: &Row) -> Result<Vote> {
    let has_downvote: bool = field(row, "has_downvote")?;
    let has_upvote: bool = field(row, "has_upvote")?;
    Ok(if has_downvote {
        Vote::Down
    } else if has_upvote {
        Vote::Up
    } else {
        Vote::None
    })
}

/// Cypher replacing whatever vote edge a user holds on a post with `vote`.
fn set_vote_cypher(vote: Vote) -> String {
    let create = vote
        .relationship()
        .map(|rel| format!("MERGE (u)-[:{}]->(p)", rel))
        .unwrap_or_default();

    format!(
        "MATCH (p:Post {{id: $post_id}}), (u:User {{id: $user_id}})
         OPTIONAL MATCH (u)-[old:UPVOTED|DOWNVOTED]->(p)
         DELETE old
         WITH DISTINCT p, u
         {}
         WITH p
         MATCH (author:User)-[:AUTHORED]->(p)
         {}",
        create, POST_PROJECTION
    )
}

/// Replace the user's vote on a post in a single statement, so the old edge
/// is never observable next to the new one.
///
/// Returns `None` when either node is missing.
pub async fn set_vote(client: &GraphClient, post_id: &str, user_id: &str, vote: Vote) -> Result<Option<Post>> {
    let query = Query::new(set_vote_cypher(vote))
        .param("post_id", post_id)
        .param("user_id", user_id);

    let post = client.query(query).await?.first().map(post_from_row).transpose()?;
    debug!(post_id, user_id, vote = vote.as_str(), "Set vote");
    Ok(post)
}
