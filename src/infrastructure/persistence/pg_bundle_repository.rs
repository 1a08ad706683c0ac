//! PostgreSQL implementation of the bundle repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::LinkBundle;
use crate::domain::repositories::BundleRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_vanity_url;

/// PostgreSQL repository for link bundles.
///
/// Each bundle is one row in `link_bundles`; the link entries are stored as a
/// JSONB array so their shape and order survive untouched. Uniqueness of the
/// vanity link is the table's primary key.
pub struct PgBundleRepository {
    pool: Arc<PgPool>,
}

impl PgBundleRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BundleRow {
    vanity_url: String,
    description: Option<String>,
    links: Json<Vec<Value>>,
    created_at: DateTime<Utc>,
}

impl From<BundleRow> for LinkBundle {
    fn from(row: BundleRow) -> Self {
        LinkBundle::new(row.vanity_url, row.description, row.links.0, row.created_at)
    }
}

#[async_trait]
impl BundleRepository for PgBundleRepository {
    async fn create(&self, bundle: LinkBundle) -> Result<LinkBundle, AppError> {
        let row = sqlx::query_as::<_, BundleRow>(
            r#"
            INSERT INTO link_bundles (vanity_url, description, links, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING vanity_url, description, links, created_at
            "#,
        )
        .bind(&bundle.vanity_url)
        .bind(&bundle.description)
        .bind(Json(&bundle.links))
        .bind(bundle.created_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_vanity_url(&e) {
                AppError::vanity_conflict(&bundle.vanity_url)
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_vanity_url(&self, vanity_url: &str) -> Result<Option<LinkBundle>, AppError> {
        let row = sqlx::query_as::<_, BundleRow>(
            r#"
            SELECT vanity_url, description, links, created_at
            FROM link_bundles
            WHERE vanity_url = $1
            "#,
        )
        .bind(vanity_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(LinkBundle::from))
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<LinkBundle>, AppError> {
        let offset = page.saturating_sub(1).saturating_mul(page_size);

        let rows = sqlx::query_as::<_, BundleRow>(
            r#"
            SELECT vanity_url, description, links, created_at
            FROM link_bundles
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(LinkBundle::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_bundles")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
