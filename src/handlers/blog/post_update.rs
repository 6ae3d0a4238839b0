use axum::{extract::State, Extension, Json};
use tracing::{debug, warn};

use crate::app::AppState;
use crate::database::models::{PostId, PostUpdate};
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::schema::{UpdatePostInput, Validated};

/// PUT /api/v1/blog - change a post's title and/or content
///
/// Omitted fields keep their stored value. With post ownership enforced the
/// update only matches posts written by the caller; otherwise any
/// authenticated caller may edit any post.
pub async fn post_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Validated(input): Validated<UpdatePostInput>,
) -> ApiResult<Json<PostId>> {
    let author_guard = if state.enforce_post_ownership {
        let author_id = user.author_id().ok_or_else(|| {
            warn!("Subject {} is not an author id, refusing to update post", user.id);
            ApiError::not_logged_in()
        })?;
        Some(author_id)
    } else {
        None
    };

    debug!("Subject {} updating post {}", user.id, input.id);

    let post = state
        .store
        .update(PostUpdate {
            id: input.id,
            title: input.title,
            content: input.content,
            author_guard,
        })
        .await?;

    Ok(Json(PostId::from(&post)))
}
