//! HTTP handlers: thin adapters between the REST surface and the services.

pub mod auth;
pub mod health;
pub mod posts;
