/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The authorization middleware builds it from verified claims and stores it in
 *   request extensions; nothing downstream can change it
 */
use serde::Serialize;

use crate::services::auth::{Claims, UserId};

/// Identity attached to a request that passed the authorization gate.
///
/// - `subject` is the token's `sub` (the account email)
/// - `user_id` / `role` are copied from the claims as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
    pub subject: String,
    pub user_id: Option<UserId>,
    pub role: Option<String>,
}

impl From<Claims> for AuthCtx {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            user_id: claims.user_id,
            role: claims.role,
        }
    }
}
