/*
 * Responsibility
 * - Load settings from the environment (PORT, CORS origins, JWT key, public paths ...)
 * - Validate them (startup fails when something required is missing)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::middleware::auth::public_paths::DEFAULT_PUBLIC_PATHS;

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://a-log.site",
    "http://a-log.site",
    "https://a-log.netlify.app",
    "http://localhost:5173",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Key material for access-token verification.
#[derive(Clone, PartialEq, Eq)]
pub enum TokenKey {
    /// HS256 shared secret.
    Secret(String),
    /// Ed25519 public key (PEM).
    Ed25519Pem(String),
}

impl std::fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        match self {
            Self::Secret(_) => f.write_str("TokenKey::Secret(..)"),
            Self::Ed25519Pem(_) => f.write_str("TokenKey::Ed25519Pem(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub token_key: TokenKey,
    pub access_token_leeway_seconds: u64,
    pub validator_timeout: Duration,
    pub validator_max_in_flight: usize,

    pub public_paths: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process env in production).
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV"));

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect());

        // Credentials are allowed, and browsers refuse `*` together with them
        if cors_allowed_origins.iter().any(|o| o == "*") {
            return Err(ConfigError::Invalid("CORS_ALLOWED_ORIGINS"));
        }

        let token_key = match (get("ACCESS_JWT_PUBLIC_KEY_PEM"), get("JWT_SECRET")) {
            (Some(pem), _) if !pem.trim().is_empty() => {
                TokenKey::Ed25519Pem(pem.replace("\\n", "\n"))
            }
            (_, Some(secret)) if !secret.is_empty() => TokenKey::Secret(secret),
            _ => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let access_token_leeway_seconds = match get("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let validator_timeout_ms = match get("AUTH_VALIDATOR_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::Invalid("AUTH_VALIDATOR_TIMEOUT_MS"))?,
            None => 1000,
        };

        let validator_max_in_flight = match get("AUTH_VALIDATOR_MAX_IN_FLIGHT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("AUTH_VALIDATOR_MAX_IN_FLIGHT"))?,
            None => 64,
        };

        let public_paths = get("PUBLIC_PATHS")
            .map(|v| split_list(&v))
            .unwrap_or_else(|| DEFAULT_PUBLIC_PATHS.iter().map(|s| s.to_string()).collect());

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            token_key,
            access_token_leeway_seconds,
            validator_timeout: Duration::from_millis(validator_timeout_ms),
            validator_max_in_flight,
            public_paths,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
