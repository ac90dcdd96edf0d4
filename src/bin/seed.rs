//! Load the sample station dataset into the configured database
//!
//! Runs pending migrations first. Seeding is all-or-nothing: running it
//! against an already seeded database fails and leaves the data untouched.

use weather_station_api::database::seed_sample_data;
use weather_station_api::telemetry::init_tracing;
use weather_station_api::{establish_connection_pool, load_dotenv, AppConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = load_dotenv();
    init_tracing();
    dotenv.log();

    let config = AppConfig::from_env()?;

    let pool = establish_connection_pool(&config.database_url, 1)?;
    pool.run_migrations()?;

    let mut conn = pool.get_conn()?;
    match seed_sample_data(&mut conn) {
        Ok(summary) => {
            tracing::info!(
                "Seeded {}: {} stations, {} variables, {} measurements",
                config.database_url,
                summary.stations,
                summary.variables,
                summary.measurements
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Error seeding database: {}", e);
            Err(e.into())
        }
    }
}
