use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("wallet not connected")]
    NotConnected,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("token creation failed: {0}")]
    CreationFailed(String),

    #[error("minting failed: {0}")]
    MintFailed(String),

    #[error("insufficient balance: {available} lamports available, {required} lamports required")]
    InsufficientBalance { available: u64, required: u64 },

    #[error("{0} is already in progress")]
    ActionInFlight(&'static str),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotConnected => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::InsufficientBalance { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::ActionInFlight(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::Rpc(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
