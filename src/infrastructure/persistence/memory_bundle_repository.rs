//! In-process implementation of the bundle repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::LinkBundle;
use crate::domain::repositories::BundleRepository;
use crate::error::AppError;

/// A bundle store kept in memory.
///
/// Inserts check and write under a single write lock, so of several
/// concurrent inserts for the same vanity link exactly one succeeds.
/// Contents are lost on restart.
///
/// # Use Cases
///
/// - Handler and service tests
/// - Local development without PostgreSQL (`STORAGE_BACKEND=memory`)
#[derive(Default)]
pub struct MemoryBundleRepository {
    bundles: RwLock<HashMap<String, LinkBundle>>,
}

impl MemoryBundleRepository {
    pub fn new() -> Self {
        debug!("Using in-memory bundle storage");
        Self::default()
    }
}

#[async_trait]
impl BundleRepository for MemoryBundleRepository {
    async fn create(&self, bundle: LinkBundle) -> Result<LinkBundle, AppError> {
        let mut bundles = self.bundles.write().await;

        match bundles.entry(bundle.vanity_url.clone()) {
            Entry::Occupied(_) => Err(AppError::vanity_conflict(bundle.vanity_url)),
            Entry::Vacant(slot) => Ok(slot.insert(bundle).clone()),
        }
    }

    async fn find_by_vanity_url(&self, vanity_url: &str) -> Result<Option<LinkBundle>, AppError> {
        Ok(self.bundles.read().await.get(vanity_url).cloned())
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<LinkBundle>, AppError> {
        let bundles = self.bundles.read().await;

        let mut all: Vec<LinkBundle> = bundles.values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.vanity_url.cmp(&b.vanity_url))
        });

        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let skip = usize::try_from(offset).unwrap_or(0);
        let take = usize::try_from(page_size).unwrap_or(0);

        Ok(all.into_iter().skip(skip).take(take).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.bundles.read().await.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
