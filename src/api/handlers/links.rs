//! Handlers for the link bundle endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{OriginalUri, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use tracing::{debug, warn};
use validator::Validate;

use crate::api::dto::link_bundle::{LinkBundleResponse, SaveLinksRequest};
use crate::domain::entities::LinkBundle;
use crate::error::{ApiError, AppError, MALFORMED_PAYLOAD};
use crate::state::AppState;

/// Stores a new link bundle.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "vanityUrl": "rust-reading",   // optional, generated when absent or blank
///   "description": "Weekend list", // optional
///   "links": [
///     { "url": "https://doc.rust-lang.org/book/", "title": "The Book" }
///   ]
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `Location: /{vanityUrl}` and the stored bundle as body.
/// The body is read as JSON whatever `Content-Type` the client sends.
///
/// # Errors
///
/// - `400` problem "Payload is invalid" if the body is malformed or has no links
/// - `400` problem "Could not create link bundle" if the vanity link is taken
/// - `500` with an empty body on storage failures
pub async fn save_links_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let bundle = save_links(&state, &body)
        .await
        .map_err(|err| err.at(uri.path()))?;

    let mut headers = HeaderMap::new();
    match HeaderValue::try_from(bundle.location()) {
        Ok(location) => {
            headers.insert(header::LOCATION, location);
        }
        Err(_) => warn!(
            vanity_url = %bundle.vanity_url,
            "Vanity link cannot be sent as a Location header"
        ),
    }

    Ok((
        StatusCode::CREATED,
        headers,
        Json(LinkBundleResponse::from(bundle)),
    ))
}

async fn save_links(state: &AppState, body: &[u8]) -> Result<LinkBundle, AppError> {
    let request: SaveLinksRequest = serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected link bundle body: {}", e);
        AppError::invalid_payload(MALFORMED_PAYLOAD)
    })?;

    request.validate()?;

    state
        .bundle_service
        .save_links(request.into_new_bundle())
        .await
}

/// Returns a stored link bundle.
///
/// # Endpoint
///
/// `GET /links/{vanity_url}`
///
/// # Errors
///
/// - `404` problem "Link bundle not found" if no bundle has this vanity link
/// - `500` with an empty body on storage failures
pub async fn get_links_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(vanity_url): Path<String>,
) -> Result<Json<LinkBundleResponse>, ApiError> {
    let bundle = state
        .bundle_service
        .get_bundle(&vanity_url)
        .await
        .map_err(|err| err.at(uri.path()))?;

    Ok(Json(bundle.into()))
}
