use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::database::repositories::{
    MeasurementRepository, MeasurementRepositoryImpl, StationRepository, StationRepositoryImpl,
    VariableRepository, VariableRepositoryImpl,
};
use crate::database::{DatabaseError, DatabasePool};

use super::errors::ApiError;
use super::responses::*;

/// Shared state for the station API handlers
///
/// Built once at start-up from the connection pool; no handler reaches for a
/// global database handle.
#[derive(Clone)]
pub struct AppState {
    pub station_repository: Arc<dyn StationRepository>,
    pub variable_repository: Arc<dyn VariableRepository>,
    pub measurement_repository: Arc<dyn MeasurementRepository>,
}

impl AppState {
    /// Wire diesel repositories onto a pool
    pub fn from_pool(pool: DatabasePool) -> Self {
        let stations = pool.clone();
        let variables = pool.clone();
        let measurements = pool;

        Self {
            station_repository: Arc::new(StationRepositoryImpl::new(move || stations.get_conn())),
            variable_repository: Arc::new(VariableRepositoryImpl::new(move || {
                variables.get_conn()
            })),
            measurement_repository: Arc::new(MeasurementRepositoryImpl::new(move || {
                measurements.get_conn()
            })),
        }
    }
}

/// Run a synchronous repository call on the blocking pool
async fn run_blocking<T, F>(f: F) -> Result<T, DatabaseError>
where
    F: FnOnce() -> Result<T, DatabaseError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DatabaseError::QueryError(format!("Blocking task failed: {}", e)))?
}

/// Parse an integer-like station ID from the path
fn parse_station_id(raw: &str) -> Result<i32, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::MissingStationId);
    }

    trimmed
        .parse::<i32>()
        .map_err(|_| ApiError::InvalidStationId(raw.to_string()))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Get all weather stations
#[utoipa::path(
    get,
    path = "/api/station",
    tag = "Stations",
    responses(
        (status = 200, description = "List of all stations", body = StationListResponse),
        (status = 500, description = "Failed to retrieve stations", body = ErrorResponse)
    )
)]
pub async fn get_stations(
    State(state): State<AppState>,
) -> Result<Json<StationListResponse>, ApiError> {
    let repo = state.station_repository.clone();
    let stations = run_blocking(move || repo.get_all())
        .await
        .map_err(ApiError::database("stations"))?;

    Ok(Json(StationListResponse {
        data: stations.into_iter().map(StationResponse::from).collect(),
    }))
}

/// Get the latest reading set for a station
///
/// All variables sharing the station's most recent timestamp are returned
/// together; variables with no reading at that instant are omitted.
#[utoipa::path(
    get,
    path = "/api/measurement/{station_id}",
    tag = "Measurements",
    params(
        ("station_id" = i32, Path, description = "Station ID")
    ),
    responses(
        (status = 200, description = "Latest measurements (possibly empty)", body = MeasurementListResponse),
        (status = 400, description = "Missing or invalid station ID", body = ErrorResponse),
        (status = 404, description = "Station not found", body = ErrorResponse),
        (status = 500, description = "Failed to retrieve measurements", body = ErrorResponse)
    )
)]
pub async fn get_latest_measurements(
    State(state): State<AppState>,
    station_id: Result<Path<String>, PathRejection>,
) -> Result<Json<MeasurementListResponse>, ApiError> {
    let Path(station_id) = station_id.map_err(|rejection| {
        ApiError::InvalidStationId(rejection.body_text())
    })?;
    let station_id = parse_station_id(&station_id)?;

    let stations = state.station_repository.clone();
    let measurements = state.measurement_repository.clone();

    let readings = run_blocking(move || match stations.find_by_id(station_id)? {
        Some(_) => measurements.latest_readings(station_id).map(Some),
        None => Ok(None),
    })
    .await
    .map_err(ApiError::database("measurements"))?
    .ok_or(ApiError::StationNotFound(station_id))?;

    Ok(Json(MeasurementListResponse {
        data: readings.into_iter().map(MeasurementView::from).collect(),
    }))
}

/// Measurement route hit without a station ID
pub async fn missing_station_id() -> ApiError {
    ApiError::MissingStationId
}

/// Get all variables
#[utoipa::path(
    get,
    path = "/api/variable",
    tag = "Variables",
    responses(
        (status = 200, description = "List of all variables", body = VariableListResponse),
        (status = 500, description = "Failed to retrieve variables", body = ErrorResponse)
    )
)]
pub async fn get_variables(
    State(state): State<AppState>,
) -> Result<Json<VariableListResponse>, ApiError> {
    let repo = state.variable_repository.clone();
    let variables = run_blocking(move || repo.get_all())
        .await
        .map_err(ApiError::database("variables"))?;

    Ok(Json(VariableListResponse {
        data: variables.into_iter().map(VariableResponse::from).collect(),
    }))
}

/// Fallback for anything the router does not know
pub async fn invalid_route() -> ApiError {
    ApiError::InvalidRoute
}
