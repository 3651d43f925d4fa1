use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use super::validator::{Claims, TokenValidator, ValidatorError};

/// Access-token verifier backed by `jsonwebtoken`.
///
/// - Signature and `exp` are always checked, `exp` and `sub` must be present.
/// - No audience is configured, so `aud` is not checked.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtValidator {
    /// HS256 with a shared secret.
    pub fn hmac(secret: &[u8], leeway_seconds: u64) -> Self {
        Self::with_key(DecodingKey::from_secret(secret), Algorithm::HS256, leeway_seconds)
    }

    /// EdDSA with an Ed25519 public key in PEM form.
    pub fn ed25519(public_key_pem: &str, leeway_seconds: u64) -> Result<Self, ValidatorError> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())?;
        Ok(Self::with_key(decoding_key, Algorithm::EdDSA, leeway_seconds))
    }

    fn with_key(decoding_key: DecodingKey, algorithm: Algorithm, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = leeway_seconds;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key,
            validation,
        }
    }

    fn verify(&self, token: &str) -> Result<Claims, ValidatorError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.sub.trim().is_empty() {
            return Err(ValidatorError::EmptyClaim("sub"));
        }

        Ok(data.claims)
    }
}

impl TokenValidator for JwtValidator {
    fn is_valid(&self, token: &str) -> bool {
        match self.verify(token) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "access token rejected");
                false
            }
        }
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, ValidatorError> {
        self.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;
    use crate::services::auth::UserId;

    const SECRET: &[u8] = b"test-secret-test-secret-test-secret";

    fn sign(claims: serde_json::Value, secret: &[u8]) -> String {
        jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
            .unwrap()
    }

    fn exp_in(seconds: i64) -> i64 {
        chrono::Utc::now().timestamp() + seconds
    }

    #[test]
    fn accepts_and_decodes_a_fresh_token() {
        let validator = JwtValidator::hmac(SECRET, 0);
        let token = sign(
            json!({"sub": "dev@a-log.site", "user_id": 7, "role": "ADMIN", "exp": exp_in(600)}),
            SECRET,
        );

        assert!(validator.is_valid(&token));
        let claims = validator.decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "dev@a-log.site");
        assert_eq!(claims.user_id, Some(UserId::Number(7)));
        assert_eq!(claims.role.as_deref(), Some("ADMIN"));
    }

    #[test]
    fn rejects_expired_token() {
        let validator = JwtValidator::hmac(SECRET, 0);
        let token = sign(json!({"sub": "a@b.c", "exp": exp_in(-3600)}), SECRET);
        assert!(!validator.is_valid(&token));
        assert!(validator.decode_claims(&token).is_err());
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let validator = JwtValidator::hmac(SECRET, 120);
        let token = sign(json!({"sub": "a@b.c", "exp": exp_in(-30)}), SECRET);
        assert!(validator.is_valid(&token));
    }

    #[test]
    fn rejects_foreign_signature() {
        let validator = JwtValidator::hmac(SECRET, 0);
        let token = sign(json!({"sub": "a@b.c", "exp": exp_in(600)}), b"someone-else");
        assert!(!validator.is_valid(&token));
    }

    #[test]
    fn rejects_missing_exp_empty_sub_and_garbage() {
        let validator = JwtValidator::hmac(SECRET, 0);
        assert!(!validator.is_valid(&sign(json!({"sub": "a@b.c"}), SECRET)));
        assert!(!validator.is_valid(&sign(json!({"sub": " ", "exp": exp_in(600)}), SECRET)));
        assert!(!validator.is_valid("not-a-jwt"));
        assert!(!validator.is_valid(""));
    }

    #[test]
    fn aud_claim_does_not_break_validation() {
        let validator = JwtValidator::hmac(SECRET, 0);
        let token = sign(
            json!({"sub": "a@b.c", "aud": "gateway", "exp": exp_in(600)}),
            SECRET,
        );
        assert!(validator.is_valid(&token));
    }

    #[test]
    fn ed25519_rejects_invalid_pem() {
        assert!(JwtValidator::ed25519("not a pem", 0).is_err());
    }
}
