use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use tracing::debug;

use super::{safe_parse, Shape};
use crate::error::ApiError;

/// Request body checked against shape `T`.
///
/// The body is read as JSON whatever its `content-type`. Any failure,
/// including an unreadable body, rejects with `ApiError::invalid_input`.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Shape,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            debug!("Unreadable {} body: {}", T::NAME, rejection);
            ApiError::invalid_input()
        })?;

        safe_parse::<T>(&body).map(Validated).map_err(|failure| {
            debug!("{}", failure);
            ApiError::invalid_input()
        })
    }
}
