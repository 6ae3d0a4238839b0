use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewPost, Post, PostSummary, PostUpdate};

/// Persistence seam for posts and their authors.
///
/// Every route handler makes exactly one call through this trait per request.
/// Implementations own their own concurrency control; callers never lock.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a post and return the stored row with its assigned id
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError>;

    /// Apply title/content changes. `DatabaseError::NotFound` when no post
    /// matches the id (and author guard, if any).
    async fn update(&self, update: PostUpdate) -> Result<Post, DatabaseError>;

    /// Fetch one post projected with its author's name
    async fn find_by_id(&self, id: i32) -> Result<Option<PostSummary>, DatabaseError>;

    /// Fetch every post, ordered by id
    async fn find_many(&self) -> Result<Vec<PostSummary>, DatabaseError>;

    /// Connectivity check used by `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;
}
