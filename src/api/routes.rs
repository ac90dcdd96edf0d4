use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::*;
use super::openapi::ApiDoc;

/// Create the station API router
///
/// Unknown paths, and known paths hit with the wrong method, answer
/// 404 `{"error": "Invalid route"}`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_check).fallback(invalid_route))
        .route("/api/station", get(get_stations).fallback(invalid_route))
        .route("/api/variable", get(get_variables).fallback(invalid_route))
        .route(
            "/api/measurement/:station_id",
            get(get_latest_measurements).fallback(invalid_route),
        )
        // The frontend may build the URL before a station is chosen
        .route("/api/measurement", get(missing_station_id).fallback(invalid_route))
        .route("/api/measurement/", get(missing_station_id).fallback(invalid_route))
        .fallback(invalid_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
