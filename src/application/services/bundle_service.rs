//! Link bundle creation and retrieval service.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{LinkBundle, NewLinkBundle};
use crate::domain::repositories::BundleRepository;
use crate::error::{AppError, NO_LINKS_PROVIDED};
use crate::utils::vanity::{generate_vanity_url, is_blank};

/// Largest page [`BundleService::list_bundles`] will return.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Service for storing and reading link bundles.
///
/// Vanity link uniqueness is left to the repository: a bundle is inserted
/// once, and a duplicate surfaces as [`AppError::VanityConflict`]. There is
/// no existence check beforehand and no retry afterwards.
pub struct BundleService<R: BundleRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: BundleRepository + ?Sized> BundleService<R> {
    /// Creates a new bundle service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Stores a new bundle.
    ///
    /// A blank or missing vanity link is replaced with a generated 7-character
    /// code. A supplied one is used verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidPayload`] if the bundle has no links.
    ///
    /// Returns [`AppError::VanityConflict`] if the vanity link is taken.
    ///
    /// Returns [`AppError::Database`] on storage failures.
    pub async fn save_links(&self, new_bundle: NewLinkBundle) -> Result<LinkBundle, AppError> {
        if new_bundle.links.is_empty() {
            return Err(AppError::invalid_payload(NO_LINKS_PROVIDED));
        }

        let vanity_url = match new_bundle.vanity_url {
            Some(vanity_url) if !is_blank(Some(vanity_url.as_str())) => vanity_url,
            _ => generate_vanity_url(),
        };

        let bundle = LinkBundle::new(
            vanity_url,
            new_bundle.description,
            new_bundle.links,
            Utc::now(),
        );

        let stored = self.repository.create(bundle).await?;

        info!(
            vanity_url = %stored.vanity_url,
            links = stored.links.len(),
            "Link bundle created"
        );

        Ok(stored)
    }

    /// Retrieves a bundle by its vanity link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bundle has this vanity link.
    /// Returns [`AppError::Database`] on storage failures.
    pub async fn get_bundle(&self, vanity_url: &str) -> Result<LinkBundle, AppError> {
        self.repository
            .find_by_vanity_url(vanity_url)
            .await?
            .ok_or_else(|| AppError::not_found(vanity_url))
    }

    /// Lists bundles newest first.
    ///
    /// `page` is at least 1 and `page_size` is kept within `1..=MAX_PAGE_SIZE`.
    /// A page past the end is empty.
    pub async fn list_bundles(&self, page: i64, page_size: i64) -> Result<Vec<LinkBundle>, AppError> {
        self.repository
            .list(page.max(1), page_size.clamp(1, MAX_PAGE_SIZE))
            .await
    }

    /// Number of stored bundles.
    pub async fn count_bundles(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Checks that storage is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockBundleRepository;
    use crate::utils::vanity::{VANITY_ALPHABET, VANITY_LENGTH};
    use serde_json::json;

    fn new_bundle(vanity_url: Option<&str>) -> NewLinkBundle {
        NewLinkBundle {
            vanity_url: vanity_url.map(str::to_string),
            description: None,
            links: vec![
                json!({ "url": "https://www.rust-lang.org" }),
                json!({ "url": "https://docs.rs" }),
            ],
        }
    }

    fn echo_create(mock: &mut MockBundleRepository) {
        mock.expect_create().times(1).returning(Ok);
    }

    #[tokio::test]
    async fn test_save_links_generates_vanity_url() {
        let mut mock_repo = MockBundleRepository::new();
        echo_create(&mut mock_repo);

        let service = BundleService::new(Arc::new(mock_repo));
        let bundle = service.save_links(new_bundle(None)).await.unwrap();

        assert_eq!(bundle.vanity_url.len(), VANITY_LENGTH);
        assert!(bundle.vanity_url.bytes().all(|b| VANITY_ALPHABET.contains(&b)));
    }

    #[tokio::test]
    async fn test_save_links_blank_vanity_url_is_generated() {
        let mut mock_repo = MockBundleRepository::new();
        mock_repo
            .expect_create()
            .withf(|bundle| bundle.vanity_url.len() == VANITY_LENGTH)
            .times(1)
            .returning(Ok);

        let service = BundleService::new(Arc::new(mock_repo));
        let bundle = service.save_links(new_bundle(Some("   "))).await.unwrap();

        assert_ne!(bundle.vanity_url.trim(), "");
    }

    #[tokio::test]
    async fn test_save_links_keeps_supplied_vanity_url() {
        let mut mock_repo = MockBundleRepository::new();
        mock_repo
            .expect_create()
            .withf(|bundle| bundle.vanity_url == "rust-docs")
            .times(1)
            .returning(Ok);

        let service = BundleService::new(Arc::new(mock_repo));
        let bundle = service
            .save_links(new_bundle(Some("rust-docs")))
            .await
            .unwrap();

        assert_eq!(bundle.vanity_url, "rust-docs");
    }

    #[tokio::test]
    async fn test_save_links_preserves_link_order() {
        let mut mock_repo = MockBundleRepository::new();
        echo_create(&mut mock_repo);

        let service = BundleService::new(Arc::new(mock_repo));
        let bundle = service.save_links(new_bundle(None)).await.unwrap();

        assert_eq!(bundle.links[0]["url"], "https://www.rust-lang.org");
        assert_eq!(bundle.links[1]["url"], "https://docs.rs");
    }

    #[tokio::test]
    async fn test_save_links_rejects_empty_links() {
        let mut mock_repo = MockBundleRepository::new();
        mock_repo.expect_create().times(0);

        let service = BundleService::new(Arc::new(mock_repo));
        let result = service
            .save_links(NewLinkBundle {
                vanity_url: Some("empty".to_string()),
                description: None,
                links: vec![],
            })
            .await;

        assert!(matches!(
            result,
            Err(AppError::InvalidPayload { ref detail }) if detail == NO_LINKS_PROVIDED
        ));
    }

    #[tokio::test]
    async fn test_save_links_conflict_single_attempt() {
        let mut mock_repo = MockBundleRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|bundle| Err(AppError::vanity_conflict(bundle.vanity_url)));

        let service = BundleService::new(Arc::new(mock_repo));
        let result = service.save_links(new_bundle(Some("taken"))).await;

        assert!(matches!(result, Err(AppError::VanityConflict { .. })));
    }

    #[tokio::test]
    async fn test_save_links_storage_failure() {
        let mut mock_repo = MockBundleRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let service = BundleService::new(Arc::new(mock_repo));
        let result = service.save_links(new_bundle(None)).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_get_bundle_not_found() {
        let mut mock_repo = MockBundleRepository::new();
        mock_repo
            .expect_find_by_vanity_url()
            .withf(|vanity_url| vanity_url == "missing")
            .times(1)
            .returning(|_| Ok(None));

        let service = BundleService::new(Arc::new(mock_repo));
        let result = service.get_bundle("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_bundles_clamps_paging() {
        let mut mock_repo = MockBundleRepository::new();
        mock_repo
            .expect_list()
            .withf(|page, page_size| *page == 1 && *page_size == 1)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = BundleService::new(Arc::new(mock_repo));
        assert!(service.list_bundles(0, -5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_bundles_caps_page_size() {
        let mut mock_repo = MockBundleRepository::new();
        mock_repo
            .expect_list()
            .withf(|page, page_size| *page == i64::MAX && *page_size == MAX_PAGE_SIZE)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = BundleService::new(Arc::new(mock_repo));
        assert!(service.list_bundles(i64::MAX, i64::MAX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_bundles_far_page_against_memory_store() {
        use crate::infrastructure::persistence::MemoryBundleRepository;

        let service = BundleService::new(Arc::new(MemoryBundleRepository::new()));
        service.save_links(new_bundle(Some("kept"))).await.unwrap();

        assert!(service.list_bundles(i64::MAX, 20).await.unwrap().is_empty());
        assert_eq!(service.list_bundles(1, 20).await.unwrap().len(), 1);
    }
}
