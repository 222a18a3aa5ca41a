use crate::config::ConfigError;
use crate::matching::MatchingServiceError;
use crate::talent::{DirectoryError, RosterImportError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Roster(RosterImportError),
    Matching(MatchingServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Roster(err) => write!(f, "roster import error: {}", err),
            AppError::Matching(err) => write!(f, "matching error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Roster(err) => Some(err),
            AppError::Matching(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Roster(_) => StatusCode::BAD_REQUEST,
            AppError::Matching(
                MatchingServiceError::VacancyNotFound(_) | MatchingServiceError::ProfileNotFound(_),
            ) => StatusCode::NOT_FOUND,
            AppError::Matching(MatchingServiceError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            AppError::Matching(MatchingServiceError::Directory(DirectoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Matching(MatchingServiceError::Directory(DirectoryError::Unavailable(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RosterImportError> for AppError {
    fn from(value: RosterImportError) -> Self {
        Self::Roster(value)
    }
}

impl From<DirectoryError> for AppError {
    fn from(value: DirectoryError) -> Self {
        Self::Matching(MatchingServiceError::Directory(value))
    }
}

impl From<MatchingServiceError> for AppError {
    fn from(value: MatchingServiceError) -> Self {
        Self::Matching(value)
    }
}
