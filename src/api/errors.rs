//! Error type for the HTTP handlers
//!
//! Every failure a handler can produce maps to exactly one status code and a
//! `{"error": "..."}` body. Infrastructure causes are logged server-side and
//! never leak into the response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::database::DatabaseError;

use super::responses::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Path parameter absent or blank
    #[error("Station ID is required")]
    MissingStationId,

    /// Path parameter is not an integer
    #[error("Invalid station ID")]
    InvalidStationId(String),

    #[error("Station not found")]
    StationNotFound(i32),

    /// No route matched the request
    #[error("Invalid route")]
    InvalidRoute,

    /// Persistence failure; `resource` names what was being read
    #[error("Failed to retrieve {resource}")]
    Database {
        resource: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl ApiError {
    /// Wrap a persistence error for the given resource
    pub fn database(resource: &'static str) -> impl FnOnce(DatabaseError) -> Self {
        move |source| ApiError::Database { resource, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingStationId | ApiError::InvalidStationId(_) => StatusCode::BAD_REQUEST,
            ApiError::StationNotFound(_) | ApiError::InvalidRoute => StatusCode::NOT_FOUND,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Database { source, .. } => tracing::error!("{}: {}", self, source),
            ApiError::InvalidStationId(raw) => tracing::debug!("Rejected station ID {:?}", raw),
            ApiError::StationNotFound(id) => tracing::debug!("Station {} not found", id),
            _ => {}
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingStationId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidStationId("abc".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::StationNotFound(999).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidRoute.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::database("stations")(DatabaseError::QueryError("boom".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_database_message_hides_cause() {
        let err = ApiError::database("measurements")(DatabaseError::QueryError(
            "no such table: measurement".into(),
        ));
        assert_eq!(err.to_string(), "Failed to retrieve measurements");
    }
}
