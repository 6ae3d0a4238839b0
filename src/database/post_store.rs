use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewPost, Post, PostSummary, PostUpdate};
use crate::database::store::PostStore;

const SELECT_SUMMARY: &str = r#"
    SELECT p.id, p.title, p.content, u.name
    FROM "Post" p
    JOIN "User" u ON u.id = p."authorId"
"#;

/// `PostStore` backed by the `"Post"` and `"User"` tables in Postgres
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        debug!("Inserting post for author {}", post.author_id);

        sqlx::query_as::<_, Post>(
            r#"INSERT INTO "Post" (title, content, "authorId")
               VALUES ($1, $2, $3)
               RETURNING id, title, content, "authorId""#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_insert(e, post.author_id))
    }

    async fn update(&self, update: PostUpdate) -> Result<Post, DatabaseError> {
        debug!("Updating post {}", update.id);

        let row = sqlx::query_as::<_, Post>(
            r#"UPDATE "Post"
               SET title = COALESCE($2, title),
                   content = COALESCE($3, content)
               WHERE id = $1
                 AND ($4::int4 IS NULL OR "authorId" = $4)
               RETURNING id, title, content, "authorId""#,
        )
        .bind(update.id)
        .bind(&update.title)
        .bind(&update.content)
        .bind(update.author_guard)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DatabaseError::NotFound("Post not found".to_string()))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PostSummary>, DatabaseError> {
        let sql = format!("{} WHERE p.id = $1", SELECT_SUMMARY);
        let post = sqlx::query_as::<_, PostSummary>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn find_many(&self) -> Result<Vec<PostSummary>, DatabaseError> {
        let sql = format!("{} ORDER BY p.id", SELECT_SUMMARY);
        let posts = sqlx::query_as::<_, PostSummary>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
