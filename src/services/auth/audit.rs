//! Structured events emitted by the authorization gate.
//!
//! The gate never logs through a global directly; it talks to an `AuthAudit`
//! held in `AppState`. Production wires `TracingAudit`, tests wire a recorder.

use crate::api::extractors::AuthCtx;
use crate::error::AuthError;

pub trait AuthAudit: Send + Sync {
    /// Every request, before classification.
    fn inbound(&self, path: &str);

    /// A protected request carried a valid token.
    fn authenticated(&self, path: &str, ctx: &AuthCtx);

    /// A protected request was turned away.
    fn rejected(&self, path: &str, err: AuthError);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAudit;

impl AuthAudit for TracingAudit {
    fn inbound(&self, path: &str) {
        tracing::info!(path = %path, "incoming request");
    }

    fn authenticated(&self, path: &str, ctx: &AuthCtx) {
        tracing::info!(
            path = %path,
            email = %ctx.subject,
            user_id = ?ctx.user_id,
            role = ?ctx.role,
            "authenticated user"
        );
    }

    fn rejected(&self, path: &str, err: AuthError) {
        tracing::error!(path = %path, reason = ?err, "authorization failed: {}", err);
    }
}
