//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limits
//! - Global timeouts
//!
//! These run inside the authorization gate, so rejected requests never reach them.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use axum::response::Response;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::respond_error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Apply HTTP-level middleware to the given Router.
///
/// Defaults:
/// - Request-Id header: `x-request-id`
/// - Body limit: 1 MiB
/// - Timeout: 30 seconds
pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            handle_error(err)
        }))
        // Only authorized (or public) requests get an id; rejections are logged by the gate.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        // Echo the id back so clients can quote it.
        .layer(PropagateRequestIdLayer::new(request_id_header))
        // Upgrade handshakes carry no body; everything else is capped.
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        // Whole-request bound, separate from the validator deadline inside the gate.
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        // Access log for everything that made it past authorization.
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

// 408 for the overall timeout, 500 for anything else a layer gives up on.
// Both use the same JSON body as the gate's rejections.
fn handle_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        respond_error(StatusCode::REQUEST_TIMEOUT, "Request timed out")
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        respond_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
