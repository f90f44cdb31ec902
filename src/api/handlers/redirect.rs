//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Resolution goes through the link service: cache first, then the store.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 if the store cannot be read.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Some(original_url) = state.link_service.resolve(&code).await? else {
        return Err(AppError::not_found(
            "URL not found",
            json!({ "code": code }),
        ));
    };

    // Opaque destinations may contain bytes that are not legal in a header.
    let location = HeaderValue::from_str(&original_url).map_err(|e| {
        error!(code = %code, error = %e, "Stored URL is not a valid Location header");
        AppError::internal("Internal server error")
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
