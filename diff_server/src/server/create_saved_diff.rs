use anyhow::anyhow;
use axum::{extract::State, http::HeaderMap};
use axum_jsonschema::Json;
use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric, thread_rng};
use uuid::Uuid;

use super::{
    rate_limit::enforce_rate_limit, requests::CreateSavedDiffRequest, responses::SavedDiffResponse,
};
use crate::{
    app_state::AppState,
    consts::SHARE_TOKEN_LENGTH,
    database::models::SavedDiff,
    errors::{DiffServerError, client_error, server_error},
};

const DIFF_TYPES: [&str; 4] = ["json", "yaml", "xml", "text"];
const DEFAULT_DIFF_TYPE: &str = "json";

/// Persist a diff and hand back a share token for later retrieval.
#[axum::debug_handler]
pub async fn create_saved_diff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateSavedDiffRequest>,
) -> Result<Json<SavedDiffResponse>, DiffServerError> {
    enforce_rate_limit(&state, &headers)?;

    let (Some(original), Some(modified)) = (request.original, request.modified) else {
        return Err(client_error(anyhow!(
            "Fields 'original' and 'modified' are required"
        )));
    };

    let diff_type = resolve_diff_type(request.diff_type)?;

    let tags = serde_json::to_string(&request.tags.unwrap_or_default())
        .map_err(|error| server_error(error.into()))?;

    let now = Utc::now();
    let diff = SavedDiff {
        id: Uuid::new_v4(),
        diff_type,
        original_content: original,
        modified_content: modified,
        title: request.title,
        description: request.description,
        is_public: request.is_public.unwrap_or(true),
        tags,
        share_token: generate_share_token(),
        view_count: 0,
        created_date: now,
        updated_date: now,
    };

    state
        .database
        .insert_saved_diff(&diff)
        .await
        .map_err(server_error)?;

    Ok(Json(diff.into()))
}

/// `diffType` is optional and defaults to JSON; an explicit but unknown
/// value is still rejected.
fn resolve_diff_type(requested: Option<String>) -> Result<String, DiffServerError> {
    let diff_type = requested.unwrap_or_else(|| DEFAULT_DIFF_TYPE.to_owned());

    if DIFF_TYPES.contains(&diff_type.as_str()) {
        Ok(diff_type)
    } else {
        Err(client_error(anyhow!(
            "Unknown diff type '{diff_type}', expected one of {DIFF_TYPES:?}"
        )))
    }
}

fn generate_share_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
