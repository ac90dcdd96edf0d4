use reqwest::Url;
use std::time::Duration;

use super::hooks::{MapStation, Position};
use super::side_nav::StateFilter;

/// Initial map centre (south-eastern Australia)
pub const DEFAULT_CENTER: Position = Position {
    lat: -31.2744,
    lng: 140.7751,
};
pub const DEFAULT_ZOOM: u8 = 6;

/// Delay between closing and reopening the popup on a repeat click
pub const REOPEN_DELAY: Duration = Duration::from_millis(10);

/// The map pans slightly up and left of a selected marker to fit the popup
const POPUP_LAT_OFFSET: f64 = 0.03;
const POPUP_LNG_OFFSET: f64 = 0.05;

const STATIC_MAP_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Result of clicking a marker
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerClick {
    /// Popup opened for a newly selected station
    Opened,
    /// Same station clicked again: the popup was closed and must be
    /// reopened with [`MapView::finish_reopen`] after the delay
    ReopenAfter(Duration, MapStation),
}

/// Map, marker and popup state
#[derive(Debug, Clone)]
pub struct MapView {
    stations: Vec<MapStation>,
    filter: StateFilter,
    selected: Option<MapStation>,
    info_window_key: u64,
    has_selected_station: bool,
    center: Position,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            stations: Vec::new(),
            filter: StateFilter::All,
            selected: None,
            info_window_key: 0,
            has_selected_station: false,
            center: DEFAULT_CENTER,
        }
    }
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stations(&mut self, stations: Vec<MapStation>) {
        self.stations = stations;
    }

    pub fn set_filter(&mut self, filter: StateFilter) {
        self.filter = filter;
    }

    /// Stations that get a marker under the current filter
    pub fn visible_stations(&self) -> Vec<&MapStation> {
        self.stations
            .iter()
            .filter(|station| self.filter.matches(&station.state))
            .collect()
    }

    pub fn find_visible(&self, station_id: i32) -> Option<&MapStation> {
        self.visible_stations()
            .into_iter()
            .find(|station| station.id == station_id)
    }

    pub fn selected(&self) -> Option<&MapStation> {
        self.selected.as_ref()
    }

    pub fn center(&self) -> Position {
        self.center
    }

    /// Remount key for the popup; a new key means a fresh popup instance
    pub fn info_window_id(&self) -> Option<String> {
        self.selected
            .as_ref()
            .map(|station| format!("info-window-{}-{}", station.id, self.info_window_key))
    }

    pub fn click_marker(&mut self, station: MapStation) -> MarkerClick {
        self.has_selected_station = true;

        let same_station = self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.id == station.id);

        if same_station {
            // The map widget keeps a stale popup unless it is torn down first
            self.selected = None;
            return MarkerClick::ReopenAfter(REOPEN_DELAY, station);
        }

        self.open(station);
        MarkerClick::Opened
    }

    /// Second half of a repeat click
    pub fn finish_reopen(&mut self, station: MapStation) {
        self.open(station);
    }

    pub fn close_info_window(&mut self) {
        self.selected = None;

        if !self.has_selected_station {
            self.center = DEFAULT_CENTER;
        }
    }

    fn open(&mut self, station: MapStation) {
        self.info_window_key += 1;
        self.center = Position {
            lat: station.position.lat - POPUP_LAT_OFFSET,
            lng: station.position.lng - POPUP_LNG_OFFSET,
        };
        self.selected = Some(station);
    }

    /// Static map image of the current viewport with one marker per visible station
    pub fn static_map_url(&self, api_key: &str) -> Option<Url> {
        let center = format!("{},{}", self.center.lat, self.center.lng);
        let zoom = DEFAULT_ZOOM.to_string();

        let mut url = Url::parse(STATIC_MAP_ENDPOINT).ok()?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("center", &center)
                .append_pair("zoom", &zoom)
                .append_pair("size", "640x640");
            for station in self.visible_stations() {
                query.append_pair(
                    "markers",
                    &format!("color:red|{},{}", station.position.lat, station.position.lng),
                );
            }
            query.append_pair("key", api_key);
        }
        Some(url)
    }
}
