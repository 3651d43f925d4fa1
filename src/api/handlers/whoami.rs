/*
 * Responsibility
 * - GET /api/gateway/whoami
 * - Echo the identity the authorization middleware attached to the request
 */
use axum::Json;

use crate::api::extractors::{AuthCtx, AuthCtxExtractor};

pub async fn whoami(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<AuthCtx> {
    Json(ctx)
}
