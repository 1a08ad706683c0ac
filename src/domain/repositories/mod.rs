//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod bundle_repository;

pub use bundle_repository::BundleRepository;

#[cfg(test)]
pub use bundle_repository::MockBundleRepository;
