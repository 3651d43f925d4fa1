/*
 * Responsibility
 * - Rejection taxonomy of the authorization gate (AuthError)
 * - The fixed JSON error body {status, error, message} and its IntoResponse
 */
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Why a request on a protected path was turned away.
///
/// The `Display` text is the message sent to the client. All variants map to 401;
/// the body differs only in `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingHeader,
    #[error("Authorization header must start with 'Bearer '")]
    MalformedScheme,
    #[error("Invalid or expired JWT token")]
    InvalidOrExpiredToken,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        respond_error(self.status(), self.to_string())
    }
}

/// Wire body of every error the gateway writes itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
        }
    }
}

/// Terminal response: status + `application/json` + [`ErrorPayload`] body.
pub fn respond_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorPayload::new(status, message);
    // Json already sets the content type; keep it explicit since clients key on it
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    use super::*;

    async fn body_json(res: Response) -> Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn every_rejection_is_a_401_with_its_own_message() {
        let cases = [
            (AuthError::MissingHeader, "Authorization header is missing"),
            (
                AuthError::MalformedScheme,
                "Authorization header must start with 'Bearer '",
            ),
            (AuthError::InvalidOrExpiredToken, "Invalid or expired JWT token"),
        ];

        for (err, message) in cases {
            let res = err.into_response();
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                res.headers().get(header::CONTENT_TYPE).unwrap(),
                "application/json"
            );
            assert_eq!(
                body_json(res).await,
                json!({"status": 401, "error": "Unauthorized", "message": message})
            );
        }
    }

    #[test]
    fn payload_uses_canonical_reason_phrase() {
        let payload = ErrorPayload::new(StatusCode::NOT_FOUND, "nope");
        assert_eq!(payload.status, 404);
        assert_eq!(payload.error, "Not Found");
    }
}
