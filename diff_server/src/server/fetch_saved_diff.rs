use anyhow::anyhow;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
};
use axum_jsonschema::Json;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{rate_limit::enforce_rate_limit, responses::SavedDiffResponse};
use crate::{
    app_state::AppState,
    database::models::ShareToken,
    errors::{DiffServerError, not_found_error, server_error},
};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FetchSavedDiffParams {
    pub share_token: ShareToken,
}

/// Look up a saved diff by its share token. Private diffs answer exactly
/// like missing ones, so a token probe cannot reveal their existence. Every
/// successful fetch bumps the stored view count.
#[axum::debug_handler]
pub async fn fetch_saved_diff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(params): Path<FetchSavedDiffParams>,
) -> Result<Json<SavedDiffResponse>, DiffServerError> {
    enforce_rate_limit(&state, &headers)?;

    let Some(diff) = state
        .database
        .get_saved_diff_by_token(&params.share_token)
        .await
        .map_err(server_error)?
        .filter(|diff| diff.is_public)
    else {
        return Err(not_found_error(anyhow!(
            "No saved diff with share token '{}'",
            params.share_token
        )));
    };

    let view_count = state
        .database
        .increment_view_count(&params.share_token)
        .await
        .map_err(server_error)?;

    let mut response = SavedDiffResponse::from(diff);
    response.view_count = view_count;

    Ok(Json(response))
}
