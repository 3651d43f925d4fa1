/*
 * Responsibility
 * - Load Config → build dependencies → assemble the Router
 * - Layer order (last applied runs first): routes → http → authorization → CORS
 * - Start with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{
    self,
    auth::{PublicPathSet, access},
};
use crate::services::auth::{TracingAudit, build_token_validator};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,api_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    install_panic_hook(abort_on_panic, abort_process);
}

fn abort_process() {
    process::abort();
}

fn install_panic_hook(abort_on_panic: bool, on_fatal: fn()) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Panics inside the token validator are caught by the access middleware
        // and answered with a 401; they are never fatal.
        let recovered = access::inside_validator();

        // Always surface panics via tracing so they don't get lost.
        tracing::error!(?info, recovered, "panic");

        // Development: crash the whole process so it gets noticed.
        // Production: default behavior (stderr) and keep serving.
        if abort_on_panic && !recovered {
            on_fatal();
        }
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("loading configuration")?;

    // Decide fail-fast behavior from config
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API gateway in {:?} mode on {} ({} public path prefixes)",
        config.app_env,
        config.addr,
        config.public_paths.len()
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let validator = build_token_validator(config).context("building token validator")?;
    let public_paths = PublicPathSet::new(config.public_paths.iter().cloned());

    Ok(AppState::new(
        public_paths,
        validator,
        Arc::new(TracingAudit),
        config.validator_timeout,
        config.validator_max_in_flight,
        config.addr.port(),
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes().with_state(state.clone());
    let router = middleware::http::apply(router);
    let router = middleware::auth::access::apply(router, state);
    middleware::cors::apply(router, &config.cors_allowed_origins)
}
