//! Typed errors and HTTP mapping.

use crate::response::error_body;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {key} = '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("unknown table")]
    UnknownTable,
    #[error("not valid url for put query, try to use /{table}/")]
    InvalidPath { table: String },
    /// `expected` differs between reads (`number > 0`) and writes (`number`).
    #[error("/{table}/value must be {expected}")]
    InvalidIdentifier { table: String, expected: &'static str },
    #[error("record not found")]
    RecordNotFound,
    #[error("field {field} have invalid type")]
    InvalidFieldType { field: String },
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("request body too large")]
    BodyTooLarge,
    #[error("table {table} has {count} primary key columns, expected exactly one")]
    MissingPrimaryKey { table: String, count: usize },
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("executor: {0}")]
    Executor(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownTable | AppError::InvalidPath { .. } | AppError::RecordNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::InvalidIdentifier { .. } | AppError::InvalidFieldType { .. } => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MalformedBody(_) | AppError::MissingPrimaryKey { .. } | AppError::Executor(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the error envelope. Internal causes stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::MalformedBody(_) => "malformed request body".to_string(),
            AppError::MissingPrimaryKey { .. } | AppError::Executor(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(error_body(self.public_message()))).into_response()
    }
}
