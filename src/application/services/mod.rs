//! Business logic services for the application layer.

pub mod bundle_service;

pub use bundle_service::BundleService;
