use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::api::responses::MeasurementView;
use crate::client::api::WeatherApi;
use crate::client::error::ClientError;

pub const LOAD_ERROR_MESSAGE: &str = "Error loading measurement data";
pub const NO_DATA_MESSAGE: &str = "No measurement data available";

/// What the popup renders from
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementState {
    pub measurements: Vec<MeasurementView>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for MeasurementState {
    /// Nothing fetched yet: the popup shows its loading line
    fn default() -> Self {
        Self {
            measurements: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// Latest-measurement fetcher for the selected station
///
/// Every `load` takes a new generation number; a response is applied only if
/// no newer `load` started while it was in flight.
pub struct MeasurementHook<A: WeatherApi + ?Sized> {
    api: Arc<A>,
    state: RwLock<MeasurementState>,
    generation: AtomicU64,
}

impl<A: WeatherApi + ?Sized> MeasurementHook<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: RwLock::new(MeasurementState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> MeasurementState {
        self.state.read().clone()
    }

    /// Fetch the latest readings for `station_id`; `None` clears without a request
    pub async fn load(&self, station_id: Option<i32>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(station_id) = station_id else {
            let mut state = self.state.write();
            state.measurements.clear();
            state.loading = false;
            return;
        };

        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.api.fetch_measurements(station_id).await;

        let mut state = self.state.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                "Dropping stale measurements for station {} (generation {})",
                station_id,
                generation
            );
            return;
        }

        match result {
            Ok(measurements) => {
                state.measurements = measurements;
            }
            Err(ClientError::MalformedPayload(reason)) => {
                tracing::warn!("Malformed measurements for station {}: {}", station_id, reason);
                state.measurements.clear();
                state.error = Some(NO_DATA_MESSAGE.to_string());
            }
            Err(e) => {
                tracing::error!("Error fetching measurements: {}", e);
                state.measurements.clear();
                state.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        state.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::responses::StationResponse;
    use async_trait::async_trait;
    use std::time::Duration;

    fn reading(value: &str) -> MeasurementView {
        MeasurementView {
            value: value.into(),
            timestamp: "29/08/2023 06:55:00".into(),
            variable_name: "AirT_inst".into(),
            long_name: "Air Temp.".into(),
            unit: "Deg C".into(),
        }
    }

    /// Station 1 answers slowly, 404 is unknown, 13 returns a bad payload
    struct FakeApi;

    #[async_trait]
    impl WeatherApi for FakeApi {
        async fn fetch_stations(&self) -> Result<Vec<StationResponse>, ClientError> {
            Ok(Vec::new())
        }

        async fn fetch_measurements(
            &self,
            station_id: i32,
        ) -> Result<Vec<MeasurementView>, ClientError> {
            match station_id {
                1 => {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(vec![reading("17.54")])
                }
                404 => Err(ClientError::Status(404)),
                13 => Err(ClientError::MalformedPayload("`data` is not an array".into())),
                id => Ok(vec![reading(&id.to_string())]),
            }
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let hook = MeasurementHook::new(Arc::new(FakeApi));
        let state = hook.state();
        assert!(state.loading);
        assert!(state.measurements.is_empty());
        assert_eq!(state.error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_success() {
        let hook = MeasurementHook::new(Arc::new(FakeApi));
        hook.load(Some(1)).await;

        let state = hook.state();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.measurements, vec![reading("17.54")]);
    }

    #[tokio::test]
    async fn test_http_error_sets_message_and_clears() {
        let hook = MeasurementHook::new(Arc::new(FakeApi));
        hook.load(Some(3)).await;
        hook.load(Some(404)).await;

        let state = hook.state();
        assert!(!state.loading);
        assert!(state.measurements.is_empty());
        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_malformed_payload_sets_no_data_message() {
        let hook = MeasurementHook::new(Arc::new(FakeApi));
        hook.load(Some(13)).await;

        let state = hook.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(NO_DATA_MESSAGE));
    }

    #[tokio::test]
    async fn test_error_cleared_on_next_load() {
        let hook = MeasurementHook::new(Arc::new(FakeApi));
        hook.load(Some(404)).await;
        hook.load(Some(5)).await;

        let state = hook.state();
        assert_eq!(state.error, None);
        assert_eq!(state.measurements, vec![reading("5")]);
    }

    #[tokio::test]
    async fn test_no_station_short_circuits() {
        let hook = MeasurementHook::new(Arc::new(FakeApi));
        hook.load(Some(5)).await;
        hook.load(None).await;

        let state = hook.state();
        assert!(!state.loading);
        assert!(state.measurements.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_dropped() {
        let hook = MeasurementHook::new(Arc::new(FakeApi));

        // Station 1 is still in flight when station 7 is selected
        tokio::join!(hook.load(Some(1)), hook.load(Some(7)));

        let state = hook.state();
        assert!(!state.loading);
        assert_eq!(state.measurements, vec![reading("7")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deselect_discards_in_flight_response() {
        let hook = MeasurementHook::new(Arc::new(FakeApi));

        tokio::join!(hook.load(Some(1)), hook.load(None));

        assert!(hook.state().measurements.is_empty());
    }
}
