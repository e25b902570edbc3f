use axum::http::request::Parts;
use axum::extract::FromRequestParts;

use crate::error::AppError;
use crate::routes::matcher::RouteParams;

/// The identifier captured from the matched path, as the raw digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathId(pub String);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RouteParams>()
            .and_then(RouteParams::id)
            .map(|id| PathId(id.to_owned()))
            .ok_or_else(|| AppError::internal("Route has no id parameter"))
    }
}
