//! RFC 7807 problem document returned on rejected requests.

use serde::{Deserialize, Serialize};

/// Problem+JSON error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    /// Path of the request that failed.
    pub instance: String,
}

impl ProblemDetails {
    pub const CONTENT_TYPE: &'static str = "application/problem+json";
}
