/// Factory: build the token validator from application `Config`.
use std::sync::Arc;

use crate::config::{Config, TokenKey};
use crate::services::auth::{JwtValidator, TokenValidator, ValidatorError};

pub fn build_token_validator(config: &Config) -> Result<Arc<dyn TokenValidator>, ValidatorError> {
    let leeway = config.access_token_leeway_seconds;
    let validator = match &config.token_key {
        TokenKey::Secret(secret) => JwtValidator::hmac(secret.as_bytes(), leeway),
        TokenKey::Ed25519Pem(pem) => JwtValidator::ed25519(pem, leeway)?,
    };

    Ok(Arc::new(validator))
}
