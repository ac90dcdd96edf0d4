//! Headless station map client
//!
//! Everything the browser frontend does except drawing: typed API access,
//! the station and measurement fetch hooks, map/popup view state and the
//! region filter sidebar.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod hooks;
pub mod info_window;
pub mod map_view;
pub mod side_nav;

pub use api::{HttpWeatherApi, WeatherApi};
pub use app::MapApp;
pub use config::ClientConfig;
pub use error::ClientError;
pub use hooks::{MapStation, MeasurementHook, MeasurementState, Position, StationsHook};
pub use map_view::{MapView, MarkerClick};
pub use side_nav::{SideNav, StateFilter};
