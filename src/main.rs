use weather_station_api::telemetry::init_tracing;
use weather_station_api::{
    create_router, establish_connection_pool, load_dotenv, AppConfig, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env / .env.test first so RUST_LOG from the file applies
    let dotenv = load_dotenv();
    init_tracing();
    dotenv.log();

    let config = AppConfig::from_env()?;

    // One pool for the whole process, injected into the handlers
    let pool = establish_connection_pool(&config.database_url, config.pool_max_size)?;
    let applied = pool.run_migrations()?;
    if applied > 0 {
        tracing::info!("Applied {} pending migration(s)", applied);
    }

    let app = create_router(AppState::from_pool(pool));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Weather station API running on http://{}", addr);
    tracing::info!("Stations: http://{}/api/station", addr);
    tracing::info!("Latest measurements: http://{}/api/measurement/{{station_id}}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
