//! End-to-end checks of the station API against a seeded SQLite file

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use diesel::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use weather_station_api::database::models::{LatestReading, Measurement, NewMeasurement, Station};
use weather_station_api::database::repositories::{MeasurementRepository, StationRepository};
use weather_station_api::database::schema::measurement;
use weather_station_api::database::seed_sample_data;
use weather_station_api::{
    create_router, establish_connection_pool, AppState, DatabaseError, DatabasePool,
};

fn seeded_pool() -> (TempDir, DatabasePool) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weather.db");

    let pool = establish_connection_pool(path.to_str().unwrap(), 2).unwrap();
    pool.run_migrations().unwrap();
    seed_sample_data(&mut pool.get_conn().unwrap()).unwrap();

    (dir, pool)
}

fn seeded_state() -> (TempDir, AppState) {
    let (dir, pool) = seeded_pool();
    (dir, AppState::from_pool(pool))
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

#[tokio::test]
async fn test_list_stations() {
    let (_dir, state) = seeded_state();
    let (status, body) = get(create_router(state), "/api/station").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 10);

    let first = data[0].as_object().unwrap();
    assert_eq!(first.len(), 7);
    for key in ["id", "ws_name", "site", "portfolio", "state", "latitude", "longitude"] {
        assert!(first.contains_key(key), "missing {}", key);
    }
    assert_eq!(first["id"], 1);
    assert_eq!(first["ws_name"], "Cohuna North");
    assert_eq!(first["state"], "VIC");
}

#[tokio::test]
async fn test_latest_measurements_share_one_timestamp() {
    let (_dir, state) = seeded_state();
    let (status, body) = get(create_router(state), "/api/measurement/1").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    for item in data {
        assert_eq!(item["timestamp"], "29/08/2023 06:55:00");
        for key in ["value", "variableName", "longName", "unit"] {
            assert!(item[key].is_string(), "{} should be a string", key);
        }
    }
    assert_eq!(data[0]["variableName"], "AirT_inst");
    assert_eq!(data[0]["value"], "17.54");
    assert_eq!(data[1]["unit"], "W/m^2");
}

#[tokio::test]
async fn test_latest_set_omits_variables_without_reading_at_that_instant() {
    let (_dir, pool) = seeded_pool();

    // Station 10 gets a newer solar reading but no matching air temperature
    diesel::insert_into(measurement::table)
        .values(NewMeasurement::parse(101, "752.3", "2023-08-28T02:15:00.000Z").unwrap())
        .execute(&mut pool.get_conn().unwrap())
        .unwrap();

    let app = create_router(AppState::from_pool(pool));
    let (status, body) = get(app, "/api/measurement/10").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["variableName"], "GHI_inst");
    assert_eq!(data[0]["value"], "752.3");
    assert_eq!(data[0]["timestamp"], "28/08/2023 02:15:00");
}

#[tokio::test]
async fn test_station_without_measurements_returns_empty_list() {
    let (_dir, state) = seeded_state();
    let (status, body) = get(create_router(state), "/api/measurement/2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "data": [] }));
}

#[tokio::test]
async fn test_unknown_station() {
    let (_dir, state) = seeded_state();
    let (status, body) = get(create_router(state), "/api/measurement/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Station not found");
}

#[tokio::test]
async fn test_bad_station_ids() {
    let (_dir, state) = seeded_state();
    let app = create_router(state);

    let (status, body) = get(app.clone(), "/api/measurement/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid station ID");

    let (status, body) = get(app.clone(), "/api/measurement").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Station ID is required");

    let (status, _) = get(app.clone(), "/api/measurement/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Percent-decodes to a byte sequence that is not UTF-8
    let (status, body) = get(app, "/api/measurement/%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid station ID");
}

#[tokio::test]
async fn test_unknown_routes_and_methods() {
    let (_dir, state) = seeded_state();
    let app = create_router(state);

    let (status, body) = get(app.clone(), "/api/stations/invalid").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "error": "Invalid route" }));

    let (status, body) = send(app, Method::POST, "/api/station").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invalid route");
}

#[tokio::test]
async fn test_variables_and_health() {
    let (_dir, state) = seeded_state();
    let app = create_router(state);

    let (status, body) = get(app.clone(), "/api/variable").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 17);
    assert_eq!(body["data"][0]["long_name"], "Air Temp.");

    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

struct BrokenStore;

impl StationRepository for BrokenStore {
    fn get_all(&self) -> Result<Vec<Station>, DatabaseError> {
        Err(DatabaseError::ConnectionPoolError("pool exhausted".into()))
    }

    fn find_by_id(&self, _station_id: i32) -> Result<Option<Station>, DatabaseError> {
        Err(DatabaseError::ConnectionPoolError("pool exhausted".into()))
    }
}

impl MeasurementRepository for BrokenStore {
    fn get_all(&self) -> Result<Vec<Measurement>, DatabaseError> {
        Err(DatabaseError::QueryError("no such table: measurement".into()))
    }

    fn latest_readings(&self, _station_id: i32) -> Result<Vec<LatestReading>, DatabaseError> {
        Err(DatabaseError::QueryError("no such table: measurement".into()))
    }
}

#[tokio::test]
async fn test_persistence_failures_are_generic_500s() {
    let (_dir, mut state) = seeded_state();
    state.station_repository = Arc::new(BrokenStore);

    let (status, body) = get(create_router(state.clone()), "/api/station").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "Failed to retrieve stations" }));

    // Station lookup succeeds, measurement query fails
    let (_dir, mut state) = seeded_state();
    state.measurement_repository = Arc::new(BrokenStore);

    let (status, body) = get(create_router(state), "/api/measurement/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to retrieve measurements");
}
