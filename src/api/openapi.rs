use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::responses::*;

/// OpenAPI specification for the station API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather Station API",
        version = "0.1.0",
        description = "Read-only access to weather station metadata and their latest measurements",
        license(
            name = "MIT"
        )
    ),
    paths(
        handlers::health_check,
        handlers::get_stations,
        handlers::get_latest_measurements,
        handlers::get_variables,
    ),
    components(
        schemas(
            StationResponse,
            StationListResponse,
            MeasurementView,
            MeasurementListResponse,
            VariableResponse,
            VariableListResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Stations", description = "Weather station metadata"),
        (name = "Measurements", description = "Latest station readings"),
        (name = "Variables", description = "Measured quantities per station"),
    )
)]
pub struct ApiDoc;
