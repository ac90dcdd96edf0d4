use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::responses::StationResponse;
use crate::client::api::WeatherApi;

/// Map coordinates in the shape the map widget expects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// Station ready to be drawn as a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStation {
    pub id: i32,
    pub ws_name: String,
    pub site: String,
    pub portfolio: String,
    pub state: String,
    pub position: Position,
}

impl From<StationResponse> for MapStation {
    fn from(station: StationResponse) -> Self {
        Self {
            id: station.id,
            ws_name: station.ws_name,
            site: station.site,
            portfolio: station.portfolio,
            state: station.state,
            position: Position {
                lat: station.latitude,
                lng: station.longitude,
            },
        }
    }
}

/// Fetch the station list once and map it for the marker layer
///
/// Failures are logged and yield an empty list; nothing is surfaced to the UI.
pub async fn fetch_stations<A>(api: &A) -> Vec<MapStation>
where
    A: WeatherApi + ?Sized,
{
    match api.fetch_stations().await {
        Ok(stations) => {
            tracing::info!("Stations data loaded: {} stations", stations.len());
            stations.into_iter().map(MapStation::from).collect()
        }
        Err(e) => {
            tracing::error!("Error fetching stations: {}", e);
            Vec::new()
        }
    }
}

/// Station list view state; fetched at most once per mount
#[derive(Debug, Default)]
pub struct StationsHook {
    stations: RwLock<Vec<MapStation>>,
    mounted: AtomicBool,
}

impl StationsHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the one-shot fetch; later calls are no-ops
    pub async fn mount<A>(&self, api: &A) -> Vec<MapStation>
    where
        A: WeatherApi + ?Sized,
    {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return self.stations();
        }

        let stations = fetch_stations(api).await;
        *self.stations.write() = stations.clone();
        stations
    }

    pub fn stations(&self) -> Vec<MapStation> {
        self.stations.read().clone()
    }
}
