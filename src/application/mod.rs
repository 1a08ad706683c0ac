//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::bundle_service::BundleService`] - Link bundle creation and retrieval

pub mod services;
