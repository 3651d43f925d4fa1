/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - public path set, token validator, audit sink, validator deadline + slots
 * - Cloned per request, so everything inside is behind an Arc
 */
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::middleware::auth::public_paths::PublicPathSet;
use crate::services::auth::{AuthAudit, TokenValidator};

#[derive(Clone)]
pub struct AppState {
    pub public_paths: Arc<PublicPathSet>,
    pub validator: Arc<dyn TokenValidator>,
    pub audit: Arc<dyn AuthAudit>,
    pub validator_timeout: Duration,
    /// Caps validator calls running on the blocking pool, timed-out ones included.
    pub validator_slots: Arc<Semaphore>,
    pub port: u16,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("public_paths", &self.public_paths)
            .field("validator_timeout", &self.validator_timeout)
            .field(
                "validator_slots_free",
                &self.validator_slots.available_permits(),
            )
            .field("port", &self.port)
            .finish()
    }
}

impl AppState {
    pub fn new(
        public_paths: PublicPathSet,
        validator: Arc<dyn TokenValidator>,
        audit: Arc<dyn AuthAudit>,
        validator_timeout: Duration,
        validator_max_in_flight: usize,
        port: u16,
    ) -> Self {
        Self {
            public_paths: Arc::new(public_paths),
            validator,
            audit,
            validator_timeout,
            validator_slots: Arc::new(Semaphore::new(validator_max_in_flight)),
            port,
        }
    }
}
