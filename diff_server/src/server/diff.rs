use anyhow::anyhow;
use axum::{extract::State, http::HeaderMap};
use axum_jsonschema::Json;
use diff_core::{DiffOptions, diff_stats, normalize, validate};
use serde_json::Value;

use super::{rate_limit::enforce_rate_limit, requests::DiffRequest, responses::DiffResponse};
use crate::{
    app_state::AppState,
    errors::{DiffServerError, client_error, server_error},
};

/// Compare two JSON documents after applying the requested equivalence
/// rules. Input that does not parse is reported with `isValid: false` and a
/// zero difference count rather than an error, so clients can call this on
/// every keystroke.
#[axum::debug_handler]
pub async fn diff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<DiffRequest>,
) -> Result<Json<DiffResponse>, DiffServerError> {
    enforce_rate_limit(&state, &headers)?;

    let (Some(original), Some(modified)) = (request.original, request.modified) else {
        return Err(client_error(anyhow!(
            "Fields 'original' and 'modified' are required"
        )));
    };

    let options_body = request.options.unwrap_or_default();
    let options = DiffOptions::from(options_body.clone());

    let is_valid = validate(&original).is_valid && validate(&modified).is_valid;

    let parsed = (
        serde_json::from_str::<Value>(&original),
        serde_json::from_str::<Value>(&modified),
    );
    let (Ok(original_value), Ok(modified_value)) = parsed else {
        return Ok(Json(DiffResponse {
            difference_count: 0,
            is_valid,
            processed_original: original,
            processed_modified: modified,
            applied_options: options_body,
        }));
    };

    let normalized_original =
        normalize(&original_value, &options).map_err(|error| client_error(error.into()))?;
    let normalized_modified =
        normalize(&modified_value, &options).map_err(|error| client_error(error.into()))?;

    let stats = diff_stats(&normalized_original, &normalized_modified)
        .map_err(|error| client_error(error.into()))?;

    Ok(Json(DiffResponse {
        difference_count: stats.difference_count(),
        is_valid,
        processed_original: serde_json::to_string_pretty(&normalized_original)
            .map_err(|error| server_error(error.into()))?,
        processed_modified: serde_json::to_string_pretty(&normalized_modified)
            .map_err(|error| server_error(error.into()))?,
        applied_options: options_body,
    }))
}
