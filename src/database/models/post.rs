use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `"Post"` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[sqlx(rename = "authorId")]
    #[serde(rename = "authorId")]
    pub author_id: i32,
}

/// Values for inserting a post; the author comes from the caller's token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

/// Title/content changes for one post. `None` leaves the column as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdate {
    pub id: i32,
    pub title: Option<String>,
    pub content: Option<String>,
    /// When set, only a post written by this author is updated
    pub author_guard: Option<i32>,
}

/// Read projection returned by the list and show routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[sqlx(flatten)]
    pub author: AuthorName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AuthorName {
    pub name: Option<String>,
}

/// Body of successful write responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostId {
    pub id: i32,
}

impl From<&Post> for PostId {
    fn from(post: &Post) -> Self {
        Self { id: post.id }
    }
}
