//! Bundle repository implementations.
//!
//! - [`PgBundleRepository`] - PostgreSQL storage (one JSONB document per bundle)
//! - [`MemoryBundleRepository`] - in-process storage for tests and database-less runs

pub mod memory_bundle_repository;
pub mod pg_bundle_repository;

pub use memory_bundle_repository::MemoryBundleRepository;
pub use pg_bundle_repository::PgBundleRepository;
