use axum::{
    http::{StatusCode, Uri},
    response::Response,
};

use crate::error::respond_error;

/// Anything the gateway has no route for; only reached after authorization.
pub async fn not_routed(uri: Uri) -> Response {
    respond_error(
        StatusCode::NOT_FOUND,
        format!("No route configured for {}", uri.path()),
    )
}
