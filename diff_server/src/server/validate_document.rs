use anyhow::anyhow;
use axum::{extract::State, http::HeaderMap};
use axum_jsonschema::Json;
use diff_core::validate_against_schema;

use super::{
    rate_limit::enforce_rate_limit, requests::ValidateRequest, responses::ValidateResponse,
};
use crate::{
    app_state::AppState,
    errors::{DiffServerError, client_error},
};

/// Validate a document against a JSON Schema (Draft 7). Schemas containing
/// regexes at risk of catastrophic backtracking are refused with a single
/// `security` violation.
#[axum::debug_handler]
pub async fn validate_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, DiffServerError> {
    enforce_rate_limit(&state, &headers)?;

    let (Some(document), Some(schema)) = (request.json, request.schema) else {
        return Err(client_error(anyhow!(
            "Fields 'json' and 'schema' are required"
        )));
    };

    let report = validate_against_schema(&document, &schema);

    Ok(Json(ValidateResponse {
        is_valid: report.is_valid,
        errors: report.errors.into_iter().map(Into::into).collect(),
    }))
}
