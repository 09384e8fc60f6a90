use hyper::StatusCode;
use shared::types::ErrorResponse;
use thiserror::Error;
use tracing::error;

use crate::database::StoreError;

/// Every failure the server can surface to a caller.
///
/// Handlers map variants to transport responses via [`AppError::status`] and
/// [`AppError::to_response`]; nothing matches on message strings.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field was empty or missing. Carries the field name.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// The request body could not be read or parsed.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("an account with that email or username already exists")]
    Conflict,

    /// Bad credentials, or a missing/invalid access token. Deliberately
    /// carries no detail about which.
    #[error("authentication failed")]
    Authentication,

    #[error("this account has been banned")]
    Banned,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => Self::Conflict,
            StoreError::NotFound => Self::NotFound("credential"),
            other => Self::Store(other),
        }
    }
}

impl AppError {
    pub fn to_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "MISSING_FIELD",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict => "CONFLICT",
            Self::Authentication => "AUTHENTICATION_FAILED",
            Self::Banned => "USER_BANNED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Store(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Authentication => StatusCode::UNAUTHORIZED,
            Self::Banned => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Configuration(_) | Self::Store(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Caller-visible message. Server-side failures are logged here and
    /// replaced with a generic message.
    pub fn to_message(&self) -> String {
        match self {
            Self::Configuration(_) | Self::Store(_) | Self::Internal(_) => {
                error!("Internal failure: {}", self);
                "Internal server error, please see log in server for more details".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.to_code(), self.to_message())
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}
