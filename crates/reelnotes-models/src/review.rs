use serde::{Deserialize, Serialize};

/// Author recorded for every review; there is no user identity yet
pub const ANONYMOUS_AUTHOR: &str = "Anonymous User";

/// Date format of the stored creation day
pub const REVIEW_DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored review as read back for a movie page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub author: String,
    /// Creation day, "YYYY-MM-DD"
    pub created_on: String,
    pub content: String, // Free text, stored as submitted
}
