use aide::OperationOutput;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, info, warn};
use schemars::JsonSchema;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffServerError {
    #[error("Initialisation error: {0}")]
    InitError(#[source] anyhow::Error),

    #[error("Client error: {0:?}")]
    ClientError(#[source] anyhow::Error),

    #[error("Server error: {0:?}")]
    ServerError(#[source] anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(#[source] anyhow::Error),

    #[error("Too many requests: {0}")]
    TooManyRequests(#[source] anyhow::Error),
}

impl DiffServerError {
    pub fn serialize(&self) -> SerializedError {
        match self {
            Self::InitError(error)
            | Self::ClientError(error)
            | Self::ServerError(error)
            | Self::NotFound(error)
            | Self::TooManyRequests(error) => error.into(),
        }
    }
}

impl IntoResponse for DiffServerError {
    fn into_response(self) -> Response {
        let body = Json(self.serialize());

        match self {
            Self::InitError(_) | Self::ServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            Self::ClientError(_) => (StatusCode::BAD_REQUEST, body).into_response(),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, body).into_response(),
            Self::TooManyRequests(_) => (StatusCode::TOO_MANY_REQUESTS, body).into_response(),
        }
    }
}

/// The error envelope every failed request carries: `success` is always
/// false, `details` holds the cause chain when there is one.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SerializedError {
    pub success: bool,
    pub error: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl From<&anyhow::Error> for SerializedError {
    fn from(error: &anyhow::Error) -> SerializedError {
        let mut details = vec![];
        let mut current_error = error.source();
        while let Some(error) = current_error {
            details.push(error.to_string());
            current_error = error.source();
        }

        SerializedError {
            success: false,
            error: error.to_string(),
            details,
        }
    }
}

impl OperationOutput for DiffServerError {
    type Inner = Self;
}

pub const fn init_error(error: anyhow::Error) -> DiffServerError {
    DiffServerError::InitError(error)
}

pub fn server_error(error: anyhow::Error) -> DiffServerError {
    error!("Server error: {:?}", error);
    DiffServerError::ServerError(error)
}

pub fn client_error(error: anyhow::Error) -> DiffServerError {
    info!("Client error: {:?}", error);
    DiffServerError::ClientError(error)
}

pub fn not_found_error(error: anyhow::Error) -> DiffServerError {
    info!("Not found error: {:?}", error);
    DiffServerError::NotFound(error)
}

pub fn too_many_requests_error(error: anyhow::Error) -> DiffServerError {
    warn!("Too many requests: {:?}", error);
    DiffServerError::TooManyRequests(error)
}
