use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::hooks::measurements::NO_DATA_MESSAGE;
use super::hooks::{MapStation, MeasurementState};

pub const LOADING_MESSAGE: &str = "Loading measurement data...";

/// Render the popup for `station` as plain text lines
pub fn render_info_window(station: &MapStation, state: &MeasurementState) -> Vec<String> {
    let mut lines = vec![
        station.ws_name.clone(),
        format!("Site: {}", station.site),
        format!("Portfolio: {}", station.portfolio),
        format!("State: {}", station.state),
        "Latest Measurements".to_string(),
    ];

    if state.loading {
        lines.push(LOADING_MESSAGE.to_string());
    }

    if let Some(error) = &state.error {
        lines.push(error.clone());
    }

    if state.loading || state.error.is_some() {
        return lines;
    }

    match state.measurements.first() {
        Some(first) => {
            lines.push(format!("Time: {}", first.timestamp));
            lines.extend(state.measurements.iter().map(|m| {
                format!("{}: {} {}", m.long_name, two_places(&m.value), m.unit)
            }));
        }
        None => lines.push(NO_DATA_MESSAGE.to_string()),
    }

    lines
}

/// Display a stored decimal with exactly two places; non-numeric values pass through
fn two_places(value: &str) -> String {
    match Decimal::from_str(value.trim()) {
        Ok(decimal) => format!(
            "{:.2}",
            decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        Err(_) => value.to_string(),
    }
}
