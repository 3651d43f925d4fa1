/*
 * Responsibility
 * - GET /health-check (liveness)
 * - Public path, so it also shows the gateway forwards without a token
 */
use axum::extract::State;

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> String {
    tracing::info!("health-check endpoint hit");
    format!("API Gateway Service is running on port: {}", state.port)
}
