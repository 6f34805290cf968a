//! service-core: shared infrastructure for the blog platform services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
