//! Shared plumbing for the directory services: configuration, tracing,
//! request ids, health checks and small sea-orm/serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
