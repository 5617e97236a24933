use anyhow::anyhow;
use axum::http::HeaderMap;

use crate::{
    app_state::AppState,
    errors::{DiffServerError, too_many_requests_error},
};

/// Budget requests per client. The client is identified by the first hop of
/// `x-forwarded-for` when present (the service is expected to run behind a
/// reverse proxy); direct clients without the header share one bucket.
pub fn enforce_rate_limit(state: &AppState, headers: &HeaderMap) -> Result<(), DiffServerError> {
    let client = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map_or_else(|| "unknown".to_owned(), |value| value.trim().to_owned());

    if state.rate_limiter.try_acquire(&client) {
        Ok(())
    } else {
        Err(too_many_requests_error(anyhow!(
            "Rate limit exceeded for client {client}"
        )))
    }
}
