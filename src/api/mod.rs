/*
 * Responsibility
 * - Routes the gateway answers itself (health-check, whoami, fallback)
 * - Extractors handlers use to read the authenticated context
 */
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
