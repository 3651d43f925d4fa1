//! CORS policy for the browser front-ends.
//!
//! Policy:
//! - Exact-match origin allow-list from Config.
//! - Any method, any request header (mirrored back, since credentials forbid `*`).
//! - Credentials allowed.
//!
//! Applied outside the authorization gate so pre-flights and 401s carry CORS headers.

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Apply CORS policy to the given Router.
pub fn apply(router: Router, allowed_origins: &[String]) -> Router {
    router.layer(layer(allowed_origins))
}

fn layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|s| match HeaderValue::from_str(s) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %s, "ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(60 * 10))
}
