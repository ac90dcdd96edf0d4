use parking_lot::Mutex;
use reqwest::Url;
use std::sync::Arc;

use super::api::WeatherApi;
use super::error::ClientError;
use super::hooks::{MapStation, MeasurementHook, MeasurementState, Position, StationsHook};
use super::info_window::render_info_window;
use super::map_view::{MapView, MarkerClick};
use super::side_nav::{SideNav, StateFilter};

/// The station map screen: sidebar, markers and popup wired to one API
///
/// Locks are only held for synchronous state updates, never across a fetch.
pub struct MapApp<A: WeatherApi + ?Sized> {
    api: Arc<A>,
    stations: StationsHook,
    view: Mutex<MapView>,
    side_nav: Mutex<SideNav>,
    measurements: MeasurementHook<A>,
}

impl<A: WeatherApi + ?Sized> MapApp<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            measurements: MeasurementHook::new(api.clone()),
            api,
            stations: StationsHook::new(),
            view: Mutex::new(MapView::new()),
            side_nav: Mutex::new(SideNav::new()),
        }
    }

    /// Load the station list into the marker layer
    pub async fn mount(&self) -> usize {
        let stations = self.stations.mount(self.api.as_ref()).await;
        let count = stations.len();
        self.view.lock().set_stations(stations);
        count
    }

    /// Sidebar dropdown changed
    pub fn change_state(&self, value: &str) -> Result<(), ClientError> {
        let changed = self.side_nav.lock().change(value)?;

        if let Some(filter) = changed {
            tracing::debug!("Filtering stations by {}", filter);
            self.view.lock().set_filter(filter);
        }
        Ok(())
    }

    pub fn filter(&self) -> StateFilter {
        self.side_nav.lock().selected().clone()
    }

    pub fn visible_stations(&self) -> Vec<MapStation> {
        self.view.lock().visible_stations().into_iter().cloned().collect()
    }

    pub fn center(&self) -> Position {
        self.view.lock().center()
    }

    pub fn selected(&self) -> Option<MapStation> {
        self.view.lock().selected().cloned()
    }

    pub fn info_window_id(&self) -> Option<String> {
        self.view.lock().info_window_id()
    }

    pub fn measurement_state(&self) -> MeasurementState {
        self.measurements.state()
    }

    /// Select a visible marker and load its latest readings
    pub async fn click_marker(&self, station_id: i32) -> Result<(), ClientError> {
        let click = {
            let mut view = self.view.lock();
            let station = view
                .find_visible(station_id)
                .cloned()
                .ok_or(ClientError::UnknownStation(station_id))?;
            view.click_marker(station)
        };

        if let MarkerClick::ReopenAfter(delay, station) = click {
            self.measurements.load(None).await;
            tokio::time::sleep(delay).await;
            self.view.lock().finish_reopen(station);
        }

        self.measurements.load(Some(station_id)).await;
        Ok(())
    }

    /// Popup close button
    pub async fn close_popup(&self) {
        self.view.lock().close_info_window();
        self.measurements.load(None).await;
    }

    /// Popup text for the selected station, if any
    pub fn popup(&self) -> Option<Vec<String>> {
        let station = self.selected()?;
        Some(render_info_window(&station, &self.measurements.state()))
    }

    pub fn static_map_url(&self, api_key: &str) -> Option<Url> {
        self.view.lock().static_map_url(api_key)
    }
}
