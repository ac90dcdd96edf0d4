//! Data-fetching hooks behind the map and its popup

pub mod measurements;
pub mod stations;

pub use measurements::{MeasurementHook, MeasurementState};
pub use stations::{fetch_stations, MapStation, Position, StationsHook};
