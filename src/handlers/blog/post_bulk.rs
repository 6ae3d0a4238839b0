use axum::{extract::State, Json};

use crate::app::AppState;
use crate::database::models::PostSummary;
use crate::error::ApiResult;

/// GET /api/v1/blog/bulk - every post with its author's name
pub async fn post_bulk(State(state): State<AppState>) -> ApiResult<Json<Vec<PostSummary>>> {
    let posts = state.store.find_many().await?;
    Ok(Json(posts))
}
