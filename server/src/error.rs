use std::path::PathBuf;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sweeper_core::{ErrorKind, GameError, RepositoryError};
use sweeper_protocol::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed game record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("stale revision: expected {expected}, found {found}")]
    Conflict { expected: u64, found: u64 },
    #[error("storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

impl From<StorageError> for RepositoryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict { expected, found } => Self::Conflict { expected, found },
            StorageError::Json(err) => Self::Marshal(err.to_string()),
            other => Self::Backend(other.to_string()),
        }
    }
}

/// Error half of every handler: rendered as an [`ApiError`] body with a matching status.
#[derive(Debug)]
pub struct ApiFailure {
    kind: ErrorKind,
    message: String,
}

impl ApiFailure {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        GameError::NotFound.into()
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        log::error!("{message}");
        Self {
            kind: ErrorKind::Internal,
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GameError> for ApiFailure {
    fn from(err: GameError) -> Self {
        if let GameError::Internal { source, .. } = &err {
            log::error!("{err}: {source}");
        }
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.status();
        log::debug!("Responding {status}: {}", self.message);

        let body = ApiError {
            status: status.as_u16(),
            code: self.kind.code().to_owned(),
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}
