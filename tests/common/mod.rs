#![allow(dead_code)]

use async_trait::async_trait;
use linkylink::domain::entities::LinkBundle;
use linkylink::domain::repositories::BundleRepository;
use linkylink::error::AppError;
use linkylink::infrastructure::persistence::MemoryBundleRepository;
use linkylink::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;

/// State backed by a fresh in-memory store. The store is returned as well so
/// tests can inspect what was persisted.
pub fn create_test_state() -> (AppState, Arc<MemoryBundleRepository>) {
    let repository = Arc::new(MemoryBundleRepository::new());
    let state = AppState::new(repository.clone());
    (state, repository)
}

/// State whose store fails every call.
pub fn create_failing_state() -> AppState {
    AppState::new(Arc::new(FailingRepository))
}

pub fn sample_links() -> Value {
    json!([
        { "url": "https://doc.rust-lang.org/book/", "title": "The Book" },
        { "url": "https://doc.rust-lang.org/rust-by-example/", "title": "Rust by Example" },
        { "url": "https://rust-lang.github.io/async-book/", "title": "Async Book" }
    ])
}

pub fn is_vanity_code(code: &str) -> bool {
    code.len() == 7 && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// A store that is always down.
pub struct FailingRepository;

#[async_trait]
impl BundleRepository for FailingRepository {
    async fn create(&self, _bundle: LinkBundle) -> Result<LinkBundle, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_vanity_url(&self, _vanity_url: &str) -> Result<Option<LinkBundle>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list(&self, _page: i64, _page_size: i64) -> Result<Vec<LinkBundle>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}
