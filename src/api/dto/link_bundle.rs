//! DTOs for the link bundle endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::entities::{LinkBundle, NewLinkBundle};

/// Request to store a new link bundle.
///
/// Only `links` is checked: it must be present and non-empty. Link entries
/// themselves are accepted as-is. Scalar `vanityUrl` and `description`
/// values (numbers, booleans) are read as their text form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveLinksRequest {
    /// Requested vanity link. Generated when absent or blank.
    #[serde(default, with = "lenient_string")]
    pub vanity_url: Option<String>,

    #[serde(default, with = "lenient_string")]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "No links provided"),
        length(min = 1, message = "No links provided")
    )]
    pub links: Option<Vec<Value>>,
}

impl SaveLinksRequest {
    /// Converts a validated request into the domain input type.
    pub fn into_new_bundle(self) -> NewLinkBundle {
        NewLinkBundle {
            vanity_url: self.vanity_url,
            description: self.description,
            links: self.links.unwrap_or_default(),
        }
    }
}

/// Deserializes an optional string, accepting any JSON scalar.
mod lenient_string {
    use serde::de::{Deserialize, Deserializer, Error};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(D::Error::custom(format!(
                "expected a string, found {}",
                if other.is_array() { "an array" } else { "an object" }
            ))),
        }
    }
}

/// A stored bundle as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkBundleResponse {
    pub vanity_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub links: Vec<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<LinkBundle> for LinkBundleResponse {
    fn from(bundle: LinkBundle) -> Self {
        Self {
            vanity_url: bundle.vanity_url,
            description: bundle.description,
            links: bundle.links,
            created_at: bundle.created_at,
        }
    }
}
