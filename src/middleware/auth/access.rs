//! Bearer token check in front of every route → AuthCtx in request extensions.
//!
//! Flow per request:
//! - log the inbound path
//! - public path → forward untouched
//! - otherwise extract `Authorization: Bearer <token>`, verify it, forward with `AuthCtx`
//! - any failure → 401 JSON body, the inner service is never called
//!
//! The validator runs on the blocking pool under a deadline. A panic or an
//! overrun inside it is reported as an invalid token, never as a 500.
//!
//! A timed-out call cannot be cancelled: its blocking thread keeps running until
//! the validator returns. `AppState::validator_slots` caps how many such calls
//! may be in flight, so a hanging validator exhausts its own slots (and every
//! protected request gets a 401 after the deadline) instead of tokio's shared
//! blocking pool.

use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tokio::sync::Semaphore;

use super::bearer;
use crate::api::extractors::AuthCtx;
use crate::error::AuthError;
use crate::services::auth::{Claims, TokenValidator, ValidatorError};
use crate::state::AppState;

thread_local! {
    static IN_VALIDATOR: Cell<bool> = const { Cell::new(false) };
}

/// `true` while the current thread runs a validator call.
///
/// The panic hook uses it: a panic raised here is turned into a 401 by
/// `verify`, so it must not take the process down.
pub fn inside_validator() -> bool {
    IN_VALIDATOR.with(Cell::get)
}

/// Marks the current thread as running the validator until dropped (also on unwind).
struct ValidatorScope;

impl ValidatorScope {
    fn enter() -> Self {
        IN_VALIDATOR.with(|flag| flag.set(true));
        Self
    }
}

impl Drop for ValidatorScope {
    fn drop(&mut self) {
        IN_VALIDATOR.with(|flag| flag.set(false));
    }
}

/// Outcome of the gate for one request. Never cached or reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Exempt,
    Authenticated(AuthCtx),
    Rejected(AuthError),
}

/// Put the authorization gate around `router`.
///
/// Apply it after every other layer that must not see unauthorized traffic: the
/// last `.layer` call is the first to run.
pub fn apply(router: Router, state: AppState) -> Router {
    // from_fn cannot take a State extractor, so hand the state over explicitly
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();
    state.audit.inbound(&path);

    match authorize(&state, &path, req.headers()).await {
        AuthorizationDecision::Exempt => next.run(req).await,
        AuthorizationDecision::Authenticated(ctx) => {
            state.audit.authenticated(&path, &ctx);
            // middleware → extractor
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        AuthorizationDecision::Rejected(err) => {
            state.audit.rejected(&path, err);
            err.into_response()
        }
    }
}

/// Decide what happens to a request on `path` carrying `headers`.
pub async fn authorize(
    state: &AppState,
    path: &str,
    headers: &HeaderMap,
) -> AuthorizationDecision {
    if state.public_paths.is_public(path) {
        return AuthorizationDecision::Exempt;
    }

    let token = match bearer::extract(headers) {
        Ok(token) => token.to_owned(),
        Err(err) => return AuthorizationDecision::Rejected(err),
    };

    let validator = Arc::clone(&state.validator);
    let slots = Arc::clone(&state.validator_slots);

    match verify(validator, slots, token, state.validator_timeout).await {
        Ok(claims) => AuthorizationDecision::Authenticated(AuthCtx::from(claims)),
        Err(err) => AuthorizationDecision::Rejected(err),
    }
}

enum Verdict {
    Valid(Claims),
    Invalid,
    Undecodable(ValidatorError),
    Unavailable,
}

async fn verify(
    validator: Arc<dyn TokenValidator>,
    slots: Arc<Semaphore>,
    token: String,
    deadline: Duration,
) -> Result<Claims, AuthError> {
    // Waiting for a free slot counts against the same deadline
    let call = async move {
        let Ok(permit) = slots.acquire_owned().await else {
            return Ok(Verdict::Unavailable);
        };

        tokio::task::spawn_blocking(move || {
            // Held until the validator really returns, even after a timeout
            let _permit = permit;
            let _scope = ValidatorScope::enter();

            if !validator.is_valid(&token) {
                return Verdict::Invalid;
            }
            match validator.decode_claims(&token) {
                Ok(claims) => Verdict::Valid(claims),
                Err(err) => Verdict::Undecodable(err),
            }
        })
        .await
    };

    match tokio::time::timeout(deadline, call).await {
        Ok(Ok(Verdict::Valid(claims))) => Ok(claims),
        Ok(Ok(Verdict::Invalid)) => Err(AuthError::InvalidOrExpiredToken),
        Ok(Ok(Verdict::Undecodable(err))) => {
            tracing::warn!(error = %err, "token passed validation but could not be decoded");
            Err(AuthError::InvalidOrExpiredToken)
        }
        Ok(Ok(Verdict::Unavailable)) => {
            tracing::error!("token validator slots closed");
            Err(AuthError::InvalidOrExpiredToken)
        }
        Ok(Err(err)) => {
            tracing::error!(error = %err, "token validator failed");
            Err(AuthError::InvalidOrExpiredToken)
        }
        Err(_) => {
            tracing::error!(
                timeout_ms = deadline.as_millis() as u64,
                "token validator timed out"
            );
            Err(AuthError::InvalidOrExpiredToken)
        }
    }
}
