//! `fiesta-observability` — process logging setup.

pub mod tracing;

pub use tracing::init;
