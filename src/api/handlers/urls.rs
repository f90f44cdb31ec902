//! Handler for listing every stored mapping.

use axum::{Json, extract::State};

use crate::api::dto::urls::MappingResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all mappings, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// Reads straight from the store; no caching, no pagination.
pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MappingResponse>>, AppError> {
    let mappings = state.link_service.list_all().await?;

    let items = mappings
        .into_iter()
        .map(|mapping| {
            let short_url = state.short_url(&mapping.short_code);
            MappingResponse::from_mapping(mapping, short_url)
        })
        .collect();

    Ok(Json(items))
}
