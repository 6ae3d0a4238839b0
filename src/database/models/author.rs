use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `"User"` table, as far as posts reference it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub name: Option<String>,
}
