//! Application error type and its HTTP mapping.
//!
//! Every failure is an [`AppError`]. At the handler boundary the error is
//! paired with the request path ([`AppError::at`]) to produce an
//! [`ApiError`], which renders either an RFC 7807 problem document or an
//! empty `500`.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

use crate::api::dto::problem::ProblemDetails;

/// Problem `type` for every error the client can fix by changing its request.
pub const CLIENT_ISSUE_TYPE: &str = "/linkylink/clientissue";

/// Detail reported when a bundle arrives without links.
pub const NO_LINKS_PROVIDED: &str = "No links provided";

/// Detail reported when the request body cannot be read as a bundle.
pub const MALFORMED_PAYLOAD: &str = "Request body is not a valid link bundle";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body was malformed or failed validation.
    #[error("Payload is invalid: {detail}")]
    InvalidPayload { detail: String },

    /// The store already holds a bundle with this vanity link.
    #[error("Vanity link already in use: {vanity_url}")]
    VanityConflict { vanity_url: String },

    #[error("Link bundle not found: {vanity_url}")]
    NotFound { vanity_url: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_payload(detail: impl Into<String>) -> Self {
        Self::InvalidPayload {
            detail: detail.into(),
        }
    }

    pub fn vanity_conflict(vanity_url: impl Into<String>) -> Self {
        Self::VanityConflict {
            vanity_url: vanity_url.into(),
        }
    }

    pub fn not_found(vanity_url: impl Into<String>) -> Self {
        Self::NotFound {
            vanity_url: vanity_url.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPayload { .. } | AppError::VanityConflict { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the problem document for this error.
    ///
    /// Returns `None` for server-side failures: those are answered with an
    /// empty body so no internal detail reaches the caller.
    pub fn to_problem(&self, instance: &str) -> Option<ProblemDetails> {
        let (title, detail) = match self {
            AppError::InvalidPayload { detail } => ("Payload is invalid", detail.clone()),
            AppError::VanityConflict { .. } => (
                "Could not create link bundle",
                "Vanity link already in use".to_string(),
            ),
            AppError::NotFound { vanity_url } => (
                "Link bundle not found",
                format!("No link bundle exists for vanity link '{}'", vanity_url),
            ),
            AppError::Database(_) | AppError::Internal(_) => return None,
        };

        Some(ProblemDetails {
            problem_type: CLIENT_ISSUE_TYPE.to_string(),
            title: title.to_string(),
            status: self.status_code().as_u16(),
            detail,
            instance: instance.to_string(),
        })
    }

    /// Attaches the request path, producing a response-ready error.
    pub fn at(self, instance: impl Into<String>) -> ApiError {
        ApiError {
            error: self,
            instance: instance.into(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let detail = errors
            .field_errors()
            .into_values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());

        AppError::InvalidPayload { detail }
    }
}

/// An [`AppError`] bound to the request path it occurred on.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub instance: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        match &self.error {
            AppError::InvalidPayload { .. } | AppError::NotFound { .. } => {
                tracing::debug!(instance = %self.instance, "{}", self.error);
            }
            AppError::VanityConflict { vanity_url } => {
                tracing::error!(instance = %self.instance, vanity_url = %vanity_url, "{}", self.error);
            }
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(instance = %self.instance, "Request failed: {}", self.error);
            }
        }

        match self.error.to_problem(&self.instance) {
            Some(problem) => (
                status,
                [(header::CONTENT_TYPE, ProblemDetails::CONTENT_TYPE)],
                Json(problem),
            )
                .into_response(),
            None => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_invalid_payload_problem() {
        let problem = AppError::invalid_payload(NO_LINKS_PROVIDED)
            .to_problem("/links")
            .unwrap();

        assert_eq!(problem.title, "Payload is invalid");
        assert_eq!(problem.detail, "No links provided");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.problem_type, "/linkylink/clientissue");
        assert_eq!(problem.instance, "/links");
    }

    #[test]
    fn test_vanity_conflict_problem() {
        let problem = AppError::vanity_conflict("taken")
            .to_problem("/api/links")
            .unwrap();

        assert_eq!(problem.title, "Could not create link bundle");
        assert_eq!(problem.detail, "Vanity link already in use");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.instance, "/api/links");
    }

    #[test]
    fn test_not_found_problem() {
        let problem = AppError::not_found("missing")
            .to_problem("/links/missing")
            .unwrap();

        assert_eq!(problem.status, 404);
        assert!(problem.detail.contains("missing"));
    }

    #[test]
    fn test_server_errors_have_no_problem_body() {
        assert!(AppError::internal("boom").to_problem("/links").is_none());
        assert!(
            AppError::Database(sqlx::Error::PoolTimedOut)
                .to_problem("/links")
                .is_none()
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_payload("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::vanity_conflict("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "No links provided"))]
        links: Vec<u8>,
    }

    #[test]
    fn test_validation_errors_use_field_message() {
        let errors = Probe { links: vec![] }.validate().unwrap_err();
        let err = AppError::from(errors);

        assert!(matches!(
            err,
            AppError::InvalidPayload { ref detail } if detail == "No links provided"
        ));
    }

    #[tokio::test]
    async fn test_server_error_response_has_empty_body() {
        let response = AppError::internal("boom").at("/links").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_problem_response_content_type() {
        let response = AppError::invalid_payload(NO_LINKS_PROVIDED)
            .at("/links")
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
    }
}
