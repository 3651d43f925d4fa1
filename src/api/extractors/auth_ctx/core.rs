use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AuthError;

use super::AuthCtx;

/// Extractor handing `AuthCtx` to a handler.
/// Assumes the authorization middleware already put it into request extensions;
/// without it (route not behind the middleware) the request gets the usual 401.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AuthError::MissingHeader)
    }
}
