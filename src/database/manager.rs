use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the post store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Author {0} does not exist")]
    UnknownAuthor(i32),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl DatabaseError {
    /// Classify an insert failure, surfacing a missing author row
    pub(crate) fn from_insert(err: sqlx::Error, author_id: i32) -> Self {
        let is_fk_violation = err
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == FOREIGN_KEY_VIOLATION);
        if is_fk_violation {
            DatabaseError::UnknownAuthor(author_id)
        } else {
            DatabaseError::Sqlx(err)
        }
    }
}

/// Builds the single connection pool shared by every request
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool sized by configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            "Created database pool for: {} (max {} connections)",
            config.redacted_url().unwrap_or_default(),
            config.max_connections
        );
        Ok(pool)
    }
}
