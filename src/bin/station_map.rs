//! Headless station map: list markers for a region and print a station popup
//!
//! Needs `WEATHER_API_BASE_URL` and `MAPS_API_KEY`; a missing value aborts
//! start-up.

use clap::Parser;
use std::sync::Arc;

use weather_station_api::client::{ClientConfig, HttpWeatherApi, MapApp};
use weather_station_api::load_dotenv;
use weather_station_api::telemetry::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "station_map", about = "Weather station map client")]
struct Args {
    /// Region filter: All, VIC, NSW, SA or QLD
    #[arg(long, default_value = "All")]
    state: String,

    /// Open the popup for this station
    #[arg(long)]
    station: Option<i32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let dotenv = load_dotenv();
    init_tracing();
    dotenv.log();

    let config = ClientConfig::from_env()?;

    let app = MapApp::new(Arc::new(HttpWeatherApi::from_config(&config)));
    app.mount().await;
    app.change_state(&args.state)?;

    println!("Stations ({}):", app.filter());
    for station in app.visible_stations() {
        println!(
            "  [{}] {} ({}) at {:.6}, {:.6}",
            station.id, station.ws_name, station.state, station.position.lat, station.position.lng
        );
    }

    if let Some(station_id) = args.station {
        app.click_marker(station_id).await?;
        if let Some(lines) = app.popup() {
            println!();
            for line in lines {
                println!("{}", line);
            }
        }
    }

    if let Some(url) = app.static_map_url(&config.maps_api_key) {
        println!();
        println!("Map: {}", url);
    }

    Ok(())
}
