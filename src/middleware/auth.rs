use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::app::AppState;
use crate::auth::{Claims, Subject};
use crate::error::ApiError;

/// Authenticated caller, available to handlers as `Extension<AuthUser>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Subject,
}

impl AuthUser {
    /// The caller as a post author, if the subject is numeric
    pub fn author_id(&self) -> Option<i32> {
        self.id.author_id()
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.id }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context.
///
/// Fails closed: anything short of a verified token answers 403 and the
/// downstream handler never runs.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Absent or non-ASCII headers verify as an empty token
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let claims = state.authenticator.verify_header(header).map_err(|reason| {
        warn!("Rejected {} {}: {}", request.method(), request.uri().path(), reason);
        ApiError::not_logged_in()
    })?;

    let auth_user = AuthUser::from(claims);
    debug!("Authenticated subject {}", auth_user.id);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
