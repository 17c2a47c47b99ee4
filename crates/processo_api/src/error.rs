//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"message": ...}` with the status below:
//! validation 400, duplicate 409, not found 404, other storage failure 400,
//! background task failure 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use processo_core::{ProcessoValidationError, ServiceError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MSG_DUPLICATE: &str = "número de processo já cadastrado";
pub const MSG_NOT_FOUND: &str = "processo não encontrado";
const MSG_INTERNAL: &str = "erro interno ao processar a requisição";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    Validation(ProcessoValidationError),
    Conflict(String),
    NotFound(String),
    /// Storage failure; carries the client-facing message with detail.
    Persistence(String),
    /// Blocking task panicked or was cancelled.
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Maps a failed create; storage failures name the save that failed.
    pub fn on_create(err: ServiceError) -> Self {
        match err {
            ServiceError::Persistence(err) => Self::Persistence(format!(
                "não foi possível salvar o novo processo: {err}"
            )),
            other => Self::from(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Persistence(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Conflict(_) => MSG_DUPLICATE.to_string(),
            Self::NotFound(_) => MSG_NOT_FOUND.to_string(),
            Self::Persistence(message) => message.clone(),
            Self::Internal(_) => MSG_INTERNAL.to_string(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::Conflict(numero) => write!(f, "duplicate numero: {numero}"),
            Self::NotFound(numero) => write!(f, "processo not found: {numero}"),
            Self::Persistence(message) => write!(f, "{message}"),
            Self::Internal(details) => write!(f, "internal error: {details}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProcessoValidationError> for ApiError {
    fn from(value: ProcessoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(err) => Self::Validation(err),
            ServiceError::DuplicateNumero(numero) => Self::Conflict(numero),
            ServiceError::NotFound(numero) => Self::NotFound(numero),
            ServiceError::Persistence(err) => Self::Persistence(format!(
                "não foi possível acessar a base de processos: {err}"
            )),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_error module=api status={} error={}",
                status.as_u16(),
                self
            );
        } else {
            warn!(
                "event=http_error module=api status={} error={}",
                status.as_u16(),
                self
            );
        }

        let body = ErrorBody {
            message: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}
