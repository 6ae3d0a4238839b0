use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::AppState;
use crate::database::models::PostSummary;
use crate::error::{ApiError, ApiResult, STORE_FAILURE};

/// GET /api/v1/blog/:id - one post, or `null` when the id matches nothing
pub async fn post_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<PostSummary>>> {
    // An id no post can have fails like any other lookup error
    let id: i32 = id.parse().map_err(|_| {
        tracing::warn!("Post id {:?} is not an integer", id);
        ApiError::internal_server_error(STORE_FAILURE)
    })?;

    let post = state.store.find_by_id(id).await?;
    Ok(Json(post))
}
