//! Vote domain model.

use serde::{Deserialize, Serialize};

/// The vote a single user holds on a single post.
///
/// A user holds at most one of upvote or downvote per post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Down,
    #[default]
    None,
    Up,
}

impl Vote {
    /// Contribution of this vote to a post's tally.
    pub fn weight(self) -> i64 {
        match self {
            Self::Down => -1,
            Self::None => 0,
            Self::Up => 1,
        }
    }

    /// Tally delta when a user's vote moves from `self` to `target`.
    pub fn transition(self, target: Vote) -> i64 {
        target.weight() - self.weight()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::None => "none",
            Self::Up => "up",
        }
    }

    /// Name of the graph relationship recording this vote, if any.
    pub fn relationship(&self) -> Option<&'static str> {
        match self {
            Self::Down => Some("DOWNVOTED"),
            Self::None => None,
            Self::Up => Some("UPVOTED"),
        }
    }
}
