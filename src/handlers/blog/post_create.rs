use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::{debug, warn};

use crate::app::AppState;
use crate::database::models::{NewPost, PostId};
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::schema::{CreatePostInput, Validated};

/// POST /api/v1/blog - create a post authored by the caller
pub async fn post_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Validated(input): Validated<CreatePostInput>,
) -> ApiResult<(StatusCode, Json<PostId>)> {
    let author_id = user.author_id().ok_or_else(|| {
        warn!("Subject {} is not an author id, refusing to create post", user.id);
        ApiError::not_logged_in()
    })?;

    let post = state
        .store
        .create(NewPost {
            title: input.title,
            content: input.content,
            author_id,
        })
        .await?;

    debug!("Created post {} for author {}", post.id, author_id);
    Ok((StatusCode::CREATED, Json(PostId::from(&post))))
}
