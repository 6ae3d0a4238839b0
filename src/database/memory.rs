use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Author, AuthorName, NewPost, Post, PostSummary, PostUpdate};
use crate::database::store::PostStore;

/// `PostStore` kept in process memory, for tests and local runs without Postgres
#[derive(Default)]
pub struct InMemoryPostStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i32, Author>,
    posts: BTreeMap<i32, Post>,
    last_id: i32,
}

impl Tables {
    fn summarize(&self, post: &Post) -> PostSummary {
        let name = self
            .authors
            .get(&post.author_id)
            .and_then(|author| author.name.clone());
        PostSummary {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            author: AuthorName { name },
        }
    }
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed authors; posts can only reference authors that exist
    pub fn with_authors(authors: impl IntoIterator<Item = Author>) -> Self {
        let tables = Tables {
            authors: authors.into_iter().map(|a| (a.id, a)).collect(),
            ..Default::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Raw row lookup, including the author id the projection hides
    pub async fn post(&self, id: i32) -> Option<Post> {
        self.tables.read().await.posts.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&post.author_id) {
            return Err(DatabaseError::UnknownAuthor(post.author_id));
        }

        tables.last_id += 1;
        let row = Post {
            id: tables.last_id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
        };
        tables.posts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, update: PostUpdate) -> Result<Post, DatabaseError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .posts
            .get_mut(&update.id)
            .filter(|row| update.author_guard.map_or(true, |author| row.author_id == author))
            .ok_or_else(|| DatabaseError::NotFound("Post not found".to_string()))?;

        if let Some(title) = update.title {
            row.title = title;
        }
        if let Some(content) = update.content {
            row.content = content;
        }
        Ok(row.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PostSummary>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).map(|post| tables.summarize(post)))
    }

    async fn find_many(&self) -> Result<Vec<PostSummary>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().map(|post| tables.summarize(post)).collect())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
