//! Repository trait for link bundle storage.

use crate::domain::entities::LinkBundle;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for link bundles.
///
/// The store owns the uniqueness of `vanity_url`: callers insert
/// optimistically and react to [`AppError::VanityConflict`] instead of
/// checking for an existing bundle first.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBundleRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryBundleRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BundleRepository: Send + Sync {
    /// Inserts a new bundle in a single atomic operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::VanityConflict`] if a bundle with the same vanity
    /// link already exists.
    ///
    /// Returns [`AppError::Database`] on any other storage failure.
    async fn create(&self, bundle: LinkBundle) -> Result<LinkBundle, AppError>;

    /// Finds a bundle by its vanity link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage failures.
    async fn find_by_vanity_url(&self, vanity_url: &str) -> Result<Option<LinkBundle>, AppError>;

    /// Lists bundles, newest first.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<LinkBundle>, AppError>;

    /// Counts stored bundles.
    async fn count(&self) -> Result<i64, AppError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
