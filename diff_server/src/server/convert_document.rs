use anyhow::anyhow;
use axum::{extract::State, http::HeaderMap};
use axum_jsonschema::Json;
use diff_core::{Format, detect_format};

use super::{rate_limit::enforce_rate_limit, requests::ConvertRequest, responses::ConvertResponse};
use crate::{
    app_state::AppState,
    errors::{DiffServerError, client_error},
};

/// Convert a document between JSON, YAML and XML. When `from` is omitted
/// the source format is detected by structural sniffing.
#[axum::debug_handler]
pub async fn convert_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, DiffServerError> {
    enforce_rate_limit(&state, &headers)?;

    let (Some(content), Some(to)) = (request.content, request.to) else {
        return Err(client_error(anyhow!(
            "Fields 'content' and 'to' are required"
        )));
    };

    let from = request
        .from
        .map_or_else(|| detect_format(&content), Format::from);

    let converted =
        diff_core::convert(&content, from, to.into()).map_err(|error| client_error(error.into()))?;

    Ok(Json(ConvertResponse {
        converted,
        detected_format: from.to_string(),
    }))
}
