use crate::config::ConfigError;
use crate::guests::{GuestImportError, GuestListServiceError, RepositoryError};
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
    Import(GuestImportError),
    Guests(GuestListServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Guests(err) => write!(f, "guest list error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Guests(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Guests(GuestListServiceError::Submission(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Guests(GuestListServiceError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            AppError::Guests(GuestListServiceError::Repository(RepositoryError::UnknownWedding(
                _,
            ))) => StatusCode::NOT_FOUND,
            AppError::Guests(GuestListServiceError::Repository(RepositoryError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Guests(GuestListServiceError::Repository(
                RepositoryError::Unavailable(_),
            )) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
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

impl From<GuestImportError> for AppError {
    fn from(value: GuestImportError) -> Self {
        Self::Import(value)
    }
}

impl From<GuestListServiceError> for AppError {
    fn from(value: GuestListServiceError) -> Self {
        Self::Guests(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guests::{SubmissionError, WeddingId};

    #[test]
    fn client_faults_map_to_4xx() {
        let import = AppError::from(GuestImportError::InvalidAttendance {
            row: 2,
            value: "maybe".to_string(),
        });
        assert_eq!(import.status(), StatusCode::BAD_REQUEST);

        let submission = AppError::from(GuestListServiceError::from(
            SubmissionError::MissingAttendance,
        ));
        assert_eq!(submission.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let forbidden = AppError::from(GuestListServiceError::Forbidden { access: "guest" });
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let unknown = AppError::from(GuestListServiceError::from(
            RepositoryError::UnknownWedding(WeddingId("wedding-x".to_string())),
        ));
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_outage_is_internal() {
        let outage = AppError::from(GuestListServiceError::from(RepositoryError::Unavailable(
            "offline".to_string(),
        )));
        assert_eq!(outage.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(outage.to_string().contains("offline"));
    }
}
