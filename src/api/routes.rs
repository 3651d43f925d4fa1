/*
 * Responsibility
 * - URL layout of the gateway's own endpoints
 * - Authorization is applied around the whole router in app.rs, not per route
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{fallback::not_routed, health::health_check, whoami::whoami};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health-check", get(health_check))
        .route("/api/gateway/whoami", get(whoami))
        .fallback(not_routed)
}
