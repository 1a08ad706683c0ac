//! Link bundle entity: a named, ordered collection of links.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A stored link bundle.
///
/// Link entries are kept as raw JSON values so that whatever the frontend
/// sends (`url`, `title`, `image`, ...) comes back exactly as submitted,
/// in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkBundle {
    pub vanity_url: String,
    pub description: Option<String>,
    pub links: Vec<Value>,
    pub created_at: DateTime<Utc>,
}

impl LinkBundle {
    /// Creates a new LinkBundle instance.
    pub fn new(
        vanity_url: String,
        description: Option<String>,
        links: Vec<Value>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            vanity_url,
            description,
            links,
            created_at,
        }
    }

    /// Path of the bundle relative to the site root, e.g. `/aB3xY9z`.
    pub fn location(&self) -> String {
        format!("/{}", self.vanity_url)
    }
}

/// Input data for creating a new bundle.
///
/// `vanity_url` is `None` (or blank) when the caller wants one generated.
#[derive(Debug, Clone)]
pub struct NewLinkBundle {
    pub vanity_url: Option<String>,
    pub description: Option<String>,
    pub links: Vec<Value>,
}
