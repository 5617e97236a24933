use anyhow::anyhow;
use axum::{extract::State, http::HeaderMap};
use axum_jsonschema::Json;
use diff_core::{byte_len, format_json, human_readable_size};

use super::{rate_limit::enforce_rate_limit, requests::FormatRequest, responses::FormatResponse};
use crate::{
    app_state::AppState,
    errors::{DiffServerError, client_error},
};

const DEFAULT_TAB_SIZE: usize = 2;

/// Pretty-print (or minify) a JSON document.
#[axum::debug_handler]
pub async fn format_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<FormatRequest>,
) -> Result<Json<FormatResponse>, DiffServerError> {
    enforce_rate_limit(&state, &headers)?;

    let Some(json) = request.json else {
        return Err(client_error(anyhow!("Field 'json' is required")));
    };

    let formatted = format_json(
        &json,
        request.tab_size.unwrap_or(DEFAULT_TAB_SIZE),
        request.minify.unwrap_or(false),
    )
    .map_err(|error| client_error(error.into()))?;

    let size = byte_len(&formatted);

    Ok(Json(FormatResponse {
        size,
        size_human: human_readable_size(size),
        formatted,
    }))
}
