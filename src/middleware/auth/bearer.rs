//! `Authorization: Bearer <token>` extraction. The token is returned unvalidated.

use axum::http::{HeaderMap, header};

use crate::error::AuthError;

const SCHEME: &str = "Bearer ";

pub fn extract(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    // A non-UTF-8 value cannot start with the scheme
    let value = value.to_str().map_err(|_| AuthError::MalformedScheme)?;

    value
        .strip_prefix(SCHEME)
        .map(str::trim)
        .ok_or(AuthError::MalformedScheme)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(name: &'static str, value: &[u8]) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_bytes(value).unwrap());
        map
    }

    #[test]
    fn returns_trimmed_token() {
        let map = headers("authorization", b"Bearer   abc.def.ghi  ");
        assert_eq!(extract(&map), Ok("abc.def.ghi"));
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let mut map = HeaderMap::new();
        map.insert(
            axum::http::HeaderName::from_bytes(b"AUTHORIZATION").unwrap(),
            HeaderValue::from_static("Bearer t"),
        );
        assert_eq!(extract(&map), Ok("t"));
    }

    #[test]
    fn missing_header() {
        assert_eq!(extract(&HeaderMap::new()), Err(AuthError::MissingHeader));
    }

    #[test]
    fn other_schemes_are_malformed() {
        for value in [&b"Basic xyz"[..], b"bearer abc", b"Bearer", b"Bearerabc", b"\xffBearer x"] {
            assert_eq!(
                extract(&headers("authorization", value)),
                Err(AuthError::MalformedScheme),
                "{value:?}"
            );
        }
    }

    #[test]
    fn empty_token_is_left_to_the_validator() {
        assert_eq!(extract(&headers("authorization", b"Bearer   ")), Ok(""));
    }
}
