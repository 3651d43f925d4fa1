use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verify-and-decode capability the authorization gate depends on.
///
/// Implementations are CPU-only (signature + timestamp checks). The gate calls
/// `is_valid` first and only decodes a token that passed it.
pub trait TokenValidator: Send + Sync {
    fn is_valid(&self, token: &str) -> bool;

    fn decode_claims(&self, token: &str) -> Result<Claims, ValidatorError>;
}

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
}

/// Opaque user identifier; issuers emit it either as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Decoded access-token payload.
///
/// `sub` carries the account email. `user_id` and `role` are optional; a token
/// without them still authenticates and they show up as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn user_id_accepts_number_or_string() {
        let numeric: Claims =
            serde_json::from_value(json!({"sub": "a@b.c", "user_id": 42, "role": "USER", "exp": 1}))
                .unwrap();
        assert_eq!(numeric.user_id, Some(UserId::Number(42)));
        assert_eq!(numeric.user_id.unwrap().to_string(), "42");

        let text: Claims =
            serde_json::from_value(json!({"sub": "a@b.c", "user_id": "u-1", "exp": 1})).unwrap();
        assert_eq!(text.user_id, Some(UserId::Text("u-1".into())));
        assert_eq!(text.role, None);
    }
}
