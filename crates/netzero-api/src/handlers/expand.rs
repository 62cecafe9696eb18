use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use netzero_geo::expand::NO_REDIRECT_FOUND;

use crate::dto::{ExpandQuery, ExpandResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Follow one redirect hop of `?url=` and return where it points
pub async fn expand_url(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExpandQuery>,
) -> Result<Json<ExpandResponse>, ApiError> {
    let url = query.url().ok_or_else(|| ApiError::bad_request("No URL provided"))?;

    tracing::info!(url = %url, "Expanding URL");

    let location = state.expander.follow_once(url).await.map_err(|e| {
        tracing::error!(error = %e, url = %url, "Failed to expand URL");
        ApiError::internal("Failed to expand URL")
    })?;

    match location {
        Some(expanded) => {
            tracing::info!(url = %url, expanded = %expanded, "Expanded URL");
            Ok(Json(ExpandResponse { expanded }))
        }
        None => {
            tracing::info!(url = %url, "No redirect found");
            Err(ApiError::bad_request(NO_REDIRECT_FOUND))
        }
    }
}
