//! Authorization gate: public path classifier, bearer extraction, access middleware.
pub mod access;
pub mod bearer;
pub mod public_paths;

pub use public_paths::PublicPathSet;
