//! Print every station, variable and measurement as pretty JSON

use weather_station_api::database::repositories::{
    MeasurementRepository, MeasurementRepositoryImpl, StationRepository, StationRepositoryImpl,
    VariableRepository, VariableRepositoryImpl,
};
use weather_station_api::telemetry::init_tracing;
use weather_station_api::{establish_connection_pool, load_dotenv, AppConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = load_dotenv();
    init_tracing();
    dotenv.log();

    let config = AppConfig::from_env()?;

    let pool = establish_connection_pool(&config.database_url, 1)?;

    let stations = {
        let pool = pool.clone();
        StationRepositoryImpl::new(move || pool.get_conn()).get_all()?
    };
    let variables = {
        let pool = pool.clone();
        VariableRepositoryImpl::new(move || pool.get_conn()).get_all()?
    };
    let measurements = MeasurementRepositoryImpl::new(move || pool.get_conn()).get_all()?;

    println!("Stations: {}", serde_json::to_string_pretty(&stations)?);
    println!("Variables: {}", serde_json::to_string_pretty(&variables)?);
    println!("Measurements: {}", serde_json::to_string_pretty(&measurements)?);

    Ok(())
}
