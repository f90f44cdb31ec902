//! Handler for link shortening endpoint.

use axum::{Json, extract::State};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/a",
///   "code": "my-link",                    // optional
///   "expires_at": "2030-01-01T00:00:00Z"  // optional, informational
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_code": "my-link",
///   "original_url": "https://example.com/a",
///   "short_url": "http://localhost:8081/my-link"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed, or the URL or custom code is invalid
/// - 409 if the custom code is already in use
/// - 500 if the mapping could not be stored
pub async fn shorten_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let mapping = state
        .link_service
        .shorten_until(&payload.url, payload.code.as_deref(), payload.expires_at)
        .await?;

    let short_url = state.short_url(&mapping.short_code);

    Ok(Json(ShortenResponse::from_mapping(mapping, short_url)))
}
