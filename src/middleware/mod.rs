/*
 * Responsibility
 * - Public interface of the middleware layers
 * - Each module exposes `apply(router, ..)`; app.rs decides the order
 */
pub mod auth;
pub mod cors;
pub mod http;
